//! Filesystem usage from `df -h`

use super::Probe;
use std::path::Path;
use zwc_common::{CommandRunner, Error};

pub const NOT_AVAILABLE: &str = "NA";

/// Usage of the filesystem holding a path, as printed by `df -h`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub total: String,
    pub used: String,
    pub free: String,
    pub usage: String,
}

impl VolumeInfo {
    pub fn unavailable() -> Self {
        Self {
            total: NOT_AVAILABLE.to_string(),
            used: NOT_AVAILABLE.to_string(),
            free: NOT_AVAILABLE.to_string(),
            usage: NOT_AVAILABLE.to_string(),
        }
    }

    /// `usage (used/total)`
    pub fn summary(&self) -> String {
        format!("{} ({}/{})", self.usage, self.used, self.total)
    }
}

/// Parse `df -h <path>` output
///
/// Only one filesystem is listed. Long device names make `df` wrap the
/// record onto a second line, so the columns are read from every line after
/// the header.
pub fn parse_df(output: &str) -> Option<VolumeInfo> {
    let cols: Vec<&str> = output
        .lines()
        .skip(1)
        .flat_map(|line| line.split_whitespace())
        .collect();
    if cols.len() < 5 {
        return None;
    }
    Some(VolumeInfo {
        total: cols[1].to_string(),
        used: cols[2].to_string(),
        free: cols[3].to_string(),
        usage: cols[4].to_string(),
    })
}

pub async fn volume_info(runner: &CommandRunner, path: &Path) -> Probe<VolumeInfo> {
    let path_arg = path.to_string_lossy();
    let result = runner
        .run("df", &["-h", path_arg.as_ref()])
        .await
        .and_then(|out| {
            parse_df(&out).ok_or_else(|| Error::CommandFailed {
                program: "df".to_string(),
                reason: "unexpected output".to_string(),
            })
        });
    Probe::from_result(
        &format!("volume info for {}", path.display()),
        result,
        VolumeInfo::unavailable,
    )
}

/// Root filesystem (SD card) usage
pub async fn sd_card_info(runner: &CommandRunner) -> Probe<VolumeInfo> {
    volume_info(runner, Path::new("/")).await
}

/// Usage of removable media mounted at `path`, `None` when nothing is mounted there
pub async fn media_info(runner: &CommandRunner, path: &Path) -> Option<Probe<VolumeInfo>> {
    let path_arg = path.to_string_lossy();
    // `mountpoint` exits non-zero when the path is not a mountpoint
    let out = runner.run("mountpoint", &[path_arg.as_ref()]).await.ok()?;
    if !out.starts_with(&format!("{} is a mountpoint", path_arg)) {
        return None;
    }
    Some(volume_info(runner, path).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        let out = "Filesystem      Size  Used Avail Use% Mounted on\n\
                   /dev/root        29G  5.1G   23G  19% /\n";
        let info = parse_df(out).unwrap();
        assert_eq!(info.total, "29G");
        assert_eq!(info.used, "5.1G");
        assert_eq!(info.free, "23G");
        assert_eq!(info.usage, "19%");
        assert_eq!(info.summary(), "19% (5.1G/29G)");
    }

    #[test]
    fn test_parse_wrapped_record() {
        let out = "Filesystem      Size  Used Avail Use% Mounted on\n\
                   /dev/mapper/very-long-volume-name\n\
                                    59G   12G   44G  22% /media/usb0\n";
        let info = parse_df(out).unwrap();
        assert_eq!(info.total, "59G");
        assert_eq!(info.usage, "22%");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_df("").is_none());
        assert!(parse_df("Filesystem Size\n").is_none());
    }

    #[tokio::test]
    async fn test_missing_path_is_not_available() {
        let probe = volume_info(
            &CommandRunner::default(),
            Path::new("/nonexistent/zwc/volume"),
        )
        .await;
        assert!(probe.is_degraded());
        assert_eq!(probe.value(), &VolumeInfo::unavailable());
    }

    #[tokio::test]
    async fn test_unmounted_media_is_none() {
        let info = media_info(&CommandRunner::default(), Path::new("/nonexistent/zwc/usb0")).await;
        assert!(info.is_none());
    }
}
