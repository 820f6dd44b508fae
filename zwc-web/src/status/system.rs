//! Host and board information

use super::Probe;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use zwc_common::{CommandRunner, Error};

pub const UNKNOWN: &str = "???";
pub const HOSTNAME_PATH: &str = "/etc/hostname";
pub const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// `temp=48.3'C` → `48.3ºC`
pub fn parse_vcgencmd_temp(output: &str) -> Option<String> {
    let value = output.trim().strip_prefix("temp=")?;
    let value = value.strip_suffix("'C").unwrap_or(value);
    Some(format!("{}ºC", value))
}

/// Millidegrees from the kernel thermal zone → `48.3ºC`
pub fn parse_thermal_zone(content: &str) -> Option<String> {
    let millis: i64 = content.trim().parse().ok()?;
    Some(format!("{:.1}ºC", millis as f64 / 1000.0))
}

/// SoC temperature, from `vcgencmd` or the kernel thermal zone
pub async fn temperature(runner: &CommandRunner) -> Probe<String> {
    if let Some(temp) = runner
        .run("vcgencmd", &["measure_temp"])
        .await
        .ok()
        .and_then(|out| parse_vcgencmd_temp(&out))
    {
        return Probe::Measured(temp);
    }
    let result = fs::read_to_string(THERMAL_ZONE_PATH)
        .map_err(Error::from)
        .and_then(|content| {
            parse_thermal_zone(&content)
                .ok_or_else(|| Error::Internal(format!("unexpected content in {}", THERMAL_ZONE_PATH)))
        });
    Probe::from_result("temperature", result, || UNKNOWN.to_string())
}

/// First line of a hostname file
pub fn read_hostname(path: &Path) -> Probe<String> {
    let result = fs::read_to_string(path)
        .map(|content| content.lines().next().unwrap_or("").trim().to_string());
    Probe::from_result("hostname", result, String::new)
}

/// Operating system description from `lsb_release -ds`
pub async fn os_info(runner: &CommandRunner) -> Probe<String> {
    let result = runner
        .run("lsb_release", &["-ds"])
        .await
        .map(|out| out.trim().to_string());
    Probe::from_result("OS info", result, || UNKNOWN.to_string())
}

/// Space separated host addresses from `hostname -I`
pub async fn ip_addresses(runner: &CommandRunner) -> Probe<String> {
    let result = runner
        .run("hostname", &["-I"])
        .await
        .map(|out| out.trim().to_string());
    Probe::from_result("IP addresses", result, String::new)
}

/// Parse `key: value` rows of a build info file; other rows are ignored
pub fn parse_build_info(content: &str) -> IndexMap<String, String> {
    content
        .lines()
        .filter_map(|row| row.split_once(": "))
        .map(|(k, v)| {
            debug!("Build info => {}: {}", k, v);
            (k.to_string(), v.to_string())
        })
        .collect()
}

/// Image build information; a missing file yields `Timestamp = ???`
pub fn build_info(path: &Path) -> Probe<IndexMap<String, String>> {
    let result = fs::read_to_string(path).map(|content| parse_build_info(&content));
    Probe::from_result("build info", result, || {
        let mut info = IndexMap::new();
        info.insert("Timestamp".to_string(), UNKNOWN.to_string());
        info
    })
}

/// Whether `gpio i2cd` output shows a device at address 0x20
pub fn expander_present(i2c_map: &str) -> bool {
    i2c_map
        .lines()
        .nth(3)
        .map(|row| row.starts_with("20: 20"))
        .unwrap_or(false)
}

/// MCP23008 / MCP23017 expander on I2C bus 1, or `Not detected`
pub async fn gpio_expander(runner: &CommandRunner) -> &'static str {
    let present = runner
        .run("gpio", &["i2cd"])
        .await
        .map(|out| expander_present(&out))
        .unwrap_or(false);
    if !present {
        return "Not detected";
    }
    // Register 0x10 only exists on the 16-bit part
    match runner.run("i2cget", &["-y", "1", "0x20", "0x10"]).await {
        Ok(out) if out.trim() == "0x00" => "MCP23008",
        Ok(_) => "MCP23017",
        Err(e) => {
            debug!("Can't probe GPIO expander: {}", e);
            "Not detected"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vcgencmd_temp() {
        assert_eq!(parse_vcgencmd_temp("temp=48.3'C\n"), Some("48.3ºC".to_string()));
        assert_eq!(parse_vcgencmd_temp("error"), None);
    }

    #[test]
    fn test_thermal_zone() {
        assert_eq!(parse_thermal_zone("48312\n"), Some("48.3ºC".to_string()));
        assert_eq!(parse_thermal_zone("hot"), None);
    }

    #[test]
    fn test_build_info_rows() {
        let info = parse_build_info("Timestamp: 2024-02-01\nOptimized for: RPi4\nnot a row\n");
        assert_eq!(info["Timestamp"], "2024-02-01");
        assert_eq!(info["Optimized for"], "RPi4");
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn test_missing_build_info() {
        let probe = build_info(Path::new("/nonexistent/zwc/build_info.txt"));
        assert!(probe.is_degraded());
        assert_eq!(probe.value()["Timestamp"], "???");
    }

    #[test]
    fn test_read_hostname() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hostname");
        fs::write(&path, "zynthian\n").unwrap();
        assert_eq!(read_hostname(&path), Probe::Measured("zynthian".to_string()));
        assert!(read_hostname(&dir.path().join("missing")).is_degraded());
    }

    #[test]
    fn test_expander_present() {
        let map = "     0  1  2  3\n\
                   00:          -- --\n\
                   10: -- -- -- --\n\
                   20: 20 -- -- --\n";
        assert!(expander_present(map));
        assert!(!expander_present("     0  1\n00: --\n10: --\n20: -- --\n"));
        assert!(!expander_present(""));
    }
}
