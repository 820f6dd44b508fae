//! Dashboard page assembly
//!
//! The dashboard is six sections of `{title, value?, url?}` entries. All
//! probes are independent, so they run concurrently within the request.

use crate::status::files::{count_files, count_presets};
use crate::status::git::{git_info, GitInfo, ZYNTHIAN_REPOS};
use crate::status::memory::{memory_info, MemoryInfo};
use crate::status::service::{is_service_active, wifi_mode};
use crate::status::system::{
    build_info, gpio_expander, ip_addresses, os_info, read_hostname, temperature, HOSTNAME_PATH,
    UNKNOWN,
};
use crate::status::volume::{media_info, sd_card_info, VolumeInfo};
use indexmap::IndexMap;
use reqwest::Url;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zwc_common::config::Settings;
use zwc_common::{CommandRunner, EnvStore, Error, Result};

pub const ISSUE_TRACKER_URL: &str = "https://github.com/zynthian/zynthian-issue-tracking/issues/new";
pub const USB_MEDIA_PATH: &str = "/media/usb0";

/// One dashboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InfoItem {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: None,
            url: None,
        }
    }

    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::title(title)
        }
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub icon: &'static str,
    pub info: IndexMap<String, InfoItem>,
}

impl Section {
    fn new(icon: &'static str) -> Self {
        Self {
            icon,
            info: IndexMap::new(),
        }
    }

    fn item(mut self, key: &str, item: InfoItem) -> Self {
        self.info.insert(key.to_string(), item);
        self
    }
}

/// Section name → section, in display order
pub type Dashboard = IndexMap<String, Section>;

/// `on` / `off` for a boolean-ish setting
///
/// Accepts the usual spellings (`1`, `yes`, `true`, `on`, ...). Anything
/// unrecognised reads as `off`.
pub fn bool2onoff(value: &str) -> &'static str {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => "on",
        "n" | "no" | "f" | "false" | "off" | "0" => "off",
        other => {
            debug!("Not a boolean value: '{}'", other);
            "off"
        }
    }
}

/// MIDI master channel for display, `off` when disabled (0)
pub fn midi_master_channel(env: &dyn EnvStore) -> String {
    let mmc = env.get_or("ZYNTHIAN_MIDI_MASTER_CHANNEL", "16");
    match mmc.trim().parse::<i32>() {
        Ok(0) => "off".to_string(),
        _ => mmc,
    }
}

/// Final path component, as shown for the MIDI profile script
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `branch (short-hash)`
fn git_summary(info: &GitInfo) -> String {
    format!("{} ({})", info.branch, info.short_commit())
}

/// Counts shown in the library section
#[derive(Debug, Clone, Default)]
struct LibraryCounts {
    snapshots: String,
    presets: String,
    soundfonts: String,
    audio_captures: String,
    midi_captures: String,
}

impl LibraryCounts {
    fn collect(my_data_dir: &Path) -> Self {
        let show = |what: &str, result: Result<usize>| match result {
            Ok(n) => n.to_string(),
            Err(e) => {
                warn!("Can't count {}: {}", what, e);
                UNKNOWN.to_string()
            }
        };
        let capture = my_data_dir.join("capture");
        Self {
            snapshots: show("snapshots", count_files(&my_data_dir.join("snapshots"), None)),
            presets: show("presets", count_presets(&my_data_dir.join("presets"))),
            soundfonts: show("soundfonts", count_files(&my_data_dir.join("soundfonts"), None)),
            audio_captures: show("audio captures", count_files(&capture, Some("*.wav"))),
            midi_captures: show("MIDI captures", count_files(&capture, Some("*.mid"))),
        }
    }
}

/// Values shared by the dashboard and the issue report
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    /// Repository name → git info, in [`ZYNTHIAN_REPOS`] order
    pub git: IndexMap<&'static str, GitInfo>,
    pub memory: MemoryInfo,
    pub sd_card: VolumeInfo,
    pub gpio_expander: &'static str,
    pub os_info: String,
    pub build_timestamp: String,
}

/// Builds the dashboard and issue report for one request
pub struct DashboardBuilder<'a> {
    env: &'a dyn EnvStore,
    settings: &'a Settings,
    runner: &'a CommandRunner,
}

impl<'a> DashboardBuilder<'a> {
    pub fn new(env: &'a dyn EnvStore, settings: &'a Settings, runner: &'a CommandRunner) -> Self {
        Self {
            env,
            settings,
            runner,
        }
    }

    async fn git_infos(&self) -> IndexMap<&'static str, GitInfo> {
        let paths: Vec<PathBuf> = ZYNTHIAN_REPOS
            .iter()
            .map(|repo| self.settings.zynthian_dir.join(repo))
            .collect();
        let runner = self.runner;
        let (zyncoder, ui, sys, data, webconf) = tokio::join!(
            git_info(runner, &paths[0]),
            git_info(runner, &paths[1]),
            git_info(runner, &paths[2]),
            git_info(runner, &paths[3]),
            git_info(runner, &paths[4]),
        );
        ZYNTHIAN_REPOS
            .into_iter()
            .zip([zyncoder, ui, sys, data, webconf].map(|probe| probe.into_value()))
            .collect()
    }

    /// Probe everything the issue report needs
    pub async fn snapshot(&self) -> SystemSnapshot {
        let runner = self.runner;
        let build_info_path = self.settings.build_info_path();
        let (git, memory, sd_card, expander, os, build_timestamp) = tokio::join!(
            self.git_infos(),
            memory_info(runner),
            sd_card_info(runner),
            gpio_expander(runner),
            os_info(runner),
            tokio::task::spawn_blocking(move || {
                build_info(&build_info_path).into_value().get("Timestamp").cloned()
            }),
        );
        let build_timestamp = build_timestamp
            .unwrap_or_else(|e| {
                warn!("Build info task failed: {}", e);
                None
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        SystemSnapshot {
            git,
            memory: memory.into_value(),
            sd_card: sd_card.into_value(),
            gpio_expander: expander,
            os_info: os.into_value(),
            build_timestamp,
        }
    }

    pub async fn build(&self) -> Dashboard {
        let runner = self.runner;
        let env = self.env;
        let my_data_dir = self.settings.my_data_dir.clone();

        let (snapshot, temp, wifi, ip, rtpmidi, qmidinet, touchosc, usb, library, hostname) =
            tokio::join!(
                self.snapshot(),
                temperature(runner),
                wifi_mode(runner),
                ip_addresses(runner),
                is_service_active(runner, "jackrtpmidid"),
                is_service_active(runner, "qmidinet"),
                is_service_active(runner, "touchosc2midi"),
                media_info(runner, Path::new(USB_MEDIA_PATH)),
                tokio::task::spawn_blocking(move || LibraryCounts::collect(&my_data_dir)),
                tokio::task::spawn_blocking(|| read_hostname(Path::new(HOSTNAME_PATH)).into_value()),
            );
        let library = library.unwrap_or_else(|e| {
            warn!("Library count task failed: {}", e);
            LibraryCounts::default()
        });
        let hostname = hostname.unwrap_or_else(|e| {
            warn!("Hostname task failed: {}", e);
            String::new()
        });

        let mut dashboard = Dashboard::new();

        dashboard.insert(
            "HARDWARE".to_string(),
            Section::new("glyphicon glyphicon-cog")
                .item("RBPI_VERSION", InfoItem::title(env.get_or_empty("RBPI_VERSION")))
                .item(
                    "SOUNDCARD_NAME",
                    InfoItem::new("Soundcard", env.get_or_empty("SOUNDCARD_NAME")).link("/hw-audio"),
                )
                .item(
                    "DISPLAY_NAME",
                    InfoItem::new("Display", env.get_or_empty("DISPLAY_NAME")).link("/hw-display"),
                )
                .item(
                    "WIRING_LAYOUT",
                    InfoItem::new("Wiring", env.get_or_empty("ZYNTHIAN_WIRING_LAYOUT"))
                        .link("/hw-wiring"),
                )
                .item(
                    "GPIO_EXPANDER",
                    InfoItem::new("GPIO Expander", snapshot.gpio_expander).link("/hw-wiring"),
                ),
        );

        let mut system = Section::new("glyphicon glyphicon-tasks")
            .item("OS_INFO", InfoItem::title(snapshot.os_info.clone()))
            .item("BUILD_DATE", InfoItem::new("Build Date", snapshot.build_timestamp.clone()))
            .item("RAM", InfoItem::new("Memory", snapshot.memory.summary()))
            .item("SD CARD", InfoItem::new("SD Card", snapshot.sd_card.summary()))
            .item("TEMPERATURE", InfoItem::new("Temperature", temp.into_value()));
        if let Some(usb) = usb {
            system = system.item(
                "MEDIA_USB0",
                InfoItem::new("USB Storage", usb.value().summary()).link("/lib-captures"),
            );
        }
        dashboard.insert("SYSTEM".to_string(), system);

        dashboard.insert(
            "MIDI".to_string(),
            Section::new("glyphicon glyphicon-music")
                .item(
                    "PROFILE",
                    InfoItem::new(
                        "Profile",
                        basename(&env.get_or_empty("ZYNTHIAN_SCRIPT_MIDI_PROFILE")),
                    )
                    .link("/ui-midi-options"),
                )
                .item(
                    "FINE_TUNING",
                    InfoItem::new(
                        "Fine Tuning",
                        format!("{} Hz", env.get_or("ZYNTHIAN_MIDI_FINE_TUNING", "440")),
                    )
                    .link("/ui-midi-options"),
                )
                .item(
                    "MASTER_CHANNEL",
                    InfoItem::new("Master Channel", midi_master_channel(env)).link("/ui-midi-options"),
                )
                .item(
                    "SINGLE_ACTIVE_CHANNEL",
                    InfoItem::new(
                        "Single Active Channel",
                        bool2onoff(&env.get_or("ZYNTHIAN_MIDI_SINGLE_ACTIVE_CHANNEL", "0")),
                    )
                    .link("/ui-midi-options"),
                )
                .item(
                    "ZS3_SUBSNAPSHOTS",
                    InfoItem::new(
                        "ZS3 SubSnapShots",
                        bool2onoff(&env.get_or("ZYNTHIAN_MIDI_PROG_CHANGE_ZS3", "1")),
                    )
                    .link("/ui-midi-options"),
                ),
        );

        let mut software = Section::new("glyphicon glyphicon-random");
        for (repo, key) in ZYNTHIAN_REPOS
            .iter()
            .zip(["ZYNCODER", "UI", "SYS", "DATA", "WEBCONF"])
        {
            if let Some(info) = snapshot.git.get(repo) {
                software = software.item(
                    key,
                    InfoItem::new(*repo, git_summary(info)).link(info.commit_url(repo)),
                );
            }
        }
        dashboard.insert("SOFTWARE".to_string(), software);

        dashboard.insert(
            "LIBRARY".to_string(),
            Section::new("glyphicon glyphicon-book")
                .item(
                    "SNAPSHOTS",
                    InfoItem::new("Snapshots", library.snapshots).link("/lib-snapshot"),
                )
                .item(
                    "USER_PRESETS",
                    InfoItem::new("User Presets", library.presets).link("/lib-presets"),
                )
                .item(
                    "USER_SOUNDFONTS",
                    InfoItem::new("User Soundfonts", library.soundfonts).link("/lib-soundfont"),
                )
                .item(
                    "AUDIO_CAPTURES",
                    InfoItem::new("Audio Captures", library.audio_captures).link("/lib-captures"),
                )
                .item(
                    "MIDI_CAPTURES",
                    InfoItem::new("MIDI Captures", library.midi_captures).link("/lib-captures"),
                ),
        );

        let mut network = Section::new("glyphicon glyphicon-link")
            .item(
                "HOSTNAME",
                InfoItem::new("Hostname", hostname).link("/sys-security"),
            )
            .item("WIFI", InfoItem::new("Wifi", wifi).link("/sys-wifi"))
            .item("IP", InfoItem::new("IP", ip.into_value()).link("/sys-wifi"))
            .item(
                "RTPMIDI",
                InfoItem::new("RTP-MIDI", bool2onoff(&rtpmidi.to_string())).link("/ui-midi-options"),
            )
            .item(
                "QMIDINET",
                InfoItem::new("QMidiNet", bool2onoff(&qmidinet.to_string())).link("/ui-midi-options"),
            );
        if touchosc {
            network = network.item(
                "TOUCHOSC",
                InfoItem::new("TouchOSC", "on").link("/ui-midi-options"),
            );
        }
        dashboard.insert("NETWORK".to_string(), network);

        dashboard
    }

    /// New-issue URL with the bug report template pre-filled
    pub async fn issue_url(&self) -> Result<String> {
        let snapshot = self.snapshot().await;
        let body = issue_body(self.env, &snapshot);
        Url::parse_with_params(ISSUE_TRACKER_URL, &[("body", body)])
            .map(String::from)
            .map_err(|e| Error::Internal(format!("issue URL: {}", e)))
    }
}

/// Bug report template filled with hardware, system and software details
pub fn issue_body(env: &dyn EnvStore, snapshot: &SystemSnapshot) -> String {
    let mut software = String::new();
    for (repo, info) in &snapshot.git {
        software.push_str(&format!("- {}: {}\n", repo, git_summary(info)));
    }

    format!(
        "**Describe the bug**\n\
         \n\
         A clear and concise description of what the bug is.\n\
         \n\
         **To Reproduce**\n\
         Steps to reproduce the behaviour:\n\
         1. Go to '...'\n\
         2. Click on '....'\n\
         3. Scroll down to '....'\n\
         4. See error\n\
         \n\
         **Expected behaviour**\n\
         A clear and concise description of what you expected to happen.\n\
         \n\
         **Actual behaviour**\n\
         A clear and concise description of what actually happens.\n\
         \n\
         **Screenshots**\n\
         If applicable, add screenshots to help explain your problem.\n\
         \n\
         **Hardware**\n\
         - {rbpi}\n\
         - Soundcard: {soundcard}\n\
         - Display: {display}\n\
         - Wiring: {wiring}\n\
         - GPIO Expander: {expander}\n\
         \n\
         **System**\n\
         - {os}\n\
         - Build Date: {build}\n\
         - Memory: {memory}\n\
         - SD Card: {sd_card}\n\
         \n\
         **Software**\n\
         {software}\
         \n\
         **Additional context**\n\
         Add any other context about the problem here.\n",
        rbpi = env.get_or_empty("RBPI_VERSION"),
        soundcard = env.get_or_empty("SOUNDCARD_NAME"),
        display = env.get_or_empty("DISPLAY_NAME"),
        wiring = env.get_or_empty("ZYNTHIAN_WIRING_LAYOUT"),
        expander = snapshot.gpio_expander,
        os = snapshot.os_info,
        build = snapshot.build_timestamp,
        memory = snapshot.memory.summary(),
        sd_card = snapshot.sd_card.summary(),
        software = software,
    )
}
