//! RAM usage from `free -m`

use super::Probe;
use zwc_common::{CommandRunner, Error};

pub const NOT_AVAILABLE: &str = "NA";

/// Memory totals, formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total: String,
    pub used: String,
    pub free: String,
    pub usage: String,
}

impl MemoryInfo {
    pub fn unavailable() -> Self {
        Self {
            total: NOT_AVAILABLE.to_string(),
            used: NOT_AVAILABLE.to_string(),
            free: NOT_AVAILABLE.to_string(),
            usage: NOT_AVAILABLE.to_string(),
        }
    }

    /// Totals in megabytes; usage is `round(100 * used / total)` percent
    pub fn from_megabytes(total: u64, used: u64, free: u64) -> Self {
        let usage = if total == 0 {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{}%", (100.0 * used as f64 / total as f64).round() as u64)
        };
        Self {
            total: format!("{}M", total),
            used: format!("{}M", used),
            free: format!("{}M", free),
            usage,
        }
    }

    /// `usage (used/total)`
    pub fn summary(&self) -> String {
        format!("{} ({}/{})", self.usage, self.used, self.total)
    }
}

/// Parse the `Mem:` row of `free -m` output
pub fn parse_free(output: &str) -> Option<MemoryInfo> {
    let row = output.lines().find(|line| line.starts_with("Mem:"))?;
    let mut cols = row.split_whitespace().skip(1).map(|c| c.parse::<u64>());
    let total = cols.next()?.ok()?;
    let used = cols.next()?.ok()?;
    let free = cols.next()?.ok()?;
    Some(MemoryInfo::from_megabytes(total, used, free))
}

pub async fn memory_info(runner: &CommandRunner) -> Probe<MemoryInfo> {
    let result = runner.run("free", &["-m"]).await.and_then(|out| {
        parse_free(&out).ok_or_else(|| Error::CommandFailed {
            program: "free".to_string(),
            reason: "unexpected output".to_string(),
        })
    });
    Probe::from_result("memory info", result, MemoryInfo::unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE_OUTPUT: &str = "\
               total        used        free      shared  buff/cache   available
Mem:            1000         250         500          10         250         700
Swap:             99           0          99
";

    #[test]
    fn test_quarter_usage() {
        let info = parse_free(FREE_OUTPUT).unwrap();
        assert_eq!(info.total, "1000M");
        assert_eq!(info.used, "250M");
        assert_eq!(info.free, "500M");
        assert_eq!(info.usage, "25%");
        assert_eq!(info.summary(), "25% (250M/1000M)");
    }

    #[test]
    fn test_usage_rounds() {
        assert_eq!(MemoryInfo::from_megabytes(3, 2, 1).usage, "67%");
        assert_eq!(MemoryInfo::from_megabytes(8, 1, 7).usage, "13%");
        assert_eq!(MemoryInfo::from_megabytes(0, 0, 0).usage, "NA");
    }

    #[test]
    fn test_unexpected_output() {
        assert!(parse_free("").is_none());
        assert!(parse_free("Mem: lots\n").is_none());
    }
}
