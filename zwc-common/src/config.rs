//! Configuration loading and settings resolution
//!
//! Every setting is resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable TOML file is never fatal: a warning is logged and
//! the remaining tiers apply.

use crate::env::EnvStore;
use crate::process::DEFAULT_COMMAND_TIMEOUT;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ZWC_CONFIG";

/// Listen address used when nothing else is configured
pub const DEFAULT_BIND: &str = "0.0.0.0:80";

/// Appliance install root used when nothing else is configured
pub const DEFAULT_ZYNTHIAN_DIR: &str = "/zynthian";

/// Optional settings read from the TOML config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub bind: Option<String>,
    pub zynthian_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub my_data_dir: Option<PathBuf>,
    /// Time budget for each external program, in seconds
    pub probe_timeout_secs: Option<u64>,
    /// Session cookie value required on protected routes
    pub session_token: Option<String>,
    pub logging: LoggingConfig,
}

/// Logging section of the TOML config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub zynthian_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub my_data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: String,
    pub zynthian_dir: PathBuf,
    pub config_dir: PathBuf,
    pub my_data_dir: PathBuf,
    pub probe_timeout: Duration,
    pub session_token: Option<String>,
    pub log_level: String,
}

impl Settings {
    /// Settings rooted at `zynthian_dir` with every other value defaulted
    pub fn with_root(zynthian_dir: impl Into<PathBuf>) -> Self {
        let zynthian_dir = zynthian_dir.into();
        Self {
            bind: DEFAULT_BIND.to_string(),
            config_dir: zynthian_dir.join("config"),
            my_data_dir: zynthian_dir.join("zynthian-my-data"),
            zynthian_dir,
            probe_timeout: DEFAULT_COMMAND_TIMEOUT,
            session_token: None,
            log_level: "info".to_string(),
        }
    }

    /// Directory holding wiring customization profiles
    pub fn profiles_dir(&self) -> PathBuf {
        self.config_dir.join("wiring-profiles")
    }

    /// Keyboard binding file
    pub fn keybinding_path(&self) -> PathBuf {
        self.config_dir.join("keybinding.yaml")
    }

    /// Image build description written at flash time
    pub fn build_info_path(&self) -> PathBuf {
        self.zynthian_dir.join("build_info.txt")
    }
}

/// Resolves [`Settings`] from the four configuration tiers
pub struct SettingsResolver<'a> {
    cli: &'a CliOverrides,
    env: &'a dyn EnvStore,
    toml: &'a TomlConfig,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(cli: &'a CliOverrides, env: &'a dyn EnvStore, toml: &'a TomlConfig) -> Self {
        Self { cli, env, toml }
    }

    pub fn resolve(&self) -> Settings {
        let zynthian_dir = self.path(
            self.cli.zynthian_dir.as_ref(),
            "ZYNTHIAN_DIR",
            self.toml.zynthian_dir.as_ref(),
            || PathBuf::from(DEFAULT_ZYNTHIAN_DIR),
        );
        let config_dir = self.path(
            self.cli.config_dir.as_ref(),
            "ZYNTHIAN_CONFIG_DIR",
            self.toml.config_dir.as_ref(),
            || zynthian_dir.join("config"),
        );
        let my_data_dir = self.path(
            self.cli.my_data_dir.as_ref(),
            "ZYNTHIAN_MY_DATA_DIR",
            self.toml.my_data_dir.as_ref(),
            || zynthian_dir.join("zynthian-my-data"),
        );

        let bind = self
            .cli
            .bind
            .clone()
            .or_else(|| self.env.get("ZWC_BIND"))
            .or_else(|| self.toml.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let probe_timeout = self
            .env
            .get("ZWC_PROBE_TIMEOUT_SECS")
            .and_then(|v| match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                Ok(_) => {
                    warn!("Ignoring zero ZWC_PROBE_TIMEOUT_SECS");
                    None
                }
                Err(e) => {
                    warn!("Ignoring invalid ZWC_PROBE_TIMEOUT_SECS '{}': {}", v, e);
                    None
                }
            })
            .or(self.toml.probe_timeout_secs.filter(|secs| *secs > 0))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT);

        let session_token = self
            .env
            .get("ZWC_SESSION_TOKEN")
            .or_else(|| self.toml.session_token.clone())
            .filter(|t| !t.trim().is_empty());

        let log_level = self
            .cli
            .log_level
            .clone()
            .unwrap_or_else(|| self.toml.logging.level.clone());

        Settings {
            bind,
            zynthian_dir,
            config_dir,
            my_data_dir,
            probe_timeout,
            session_token,
            log_level,
        }
    }

    fn path(
        &self,
        cli: Option<&PathBuf>,
        env_var: &str,
        toml: Option<&PathBuf>,
        default: impl FnOnce() -> PathBuf,
    ) -> PathBuf {
        if let Some(path) = cli {
            return path.clone();
        }
        if let Some(path) = self.env.get(env_var).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        if let Some(path) = toml {
            return path.clone();
        }
        default()
    }
}

/// Find the config file to load, if any
///
/// Explicit path (CLI or `ZWC_CONFIG`) first, then the user config directory,
/// then `/etc/zwc/config.toml`.
pub fn locate_config_file(explicit: Option<&Path>, env: &dyn EnvStore) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env.get(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("zwc").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/zwc/config.toml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the TOML config, falling back to defaults on any problem
///
/// The problem is returned instead of logged, so a caller that loads the
/// config before tracing is initialised can report it afterwards.
pub fn load_toml_config(path: Option<&Path>) -> (TomlConfig, Option<Error>) {
    let Some(path) = path else {
        return (TomlConfig::default(), None);
    };

    match read_toml_config(path) {
        Ok(config) => (config, None),
        Err(e) => (TomlConfig::default(), Some(e)),
    }
}
