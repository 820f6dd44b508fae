//! systemd unit state

use tracing::debug;
use zwc_common::CommandRunner;

/// Whether systemd unit `name` is active
///
/// Any failure (unknown unit, no systemd, timeout) counts as inactive.
pub async fn is_service_active(runner: &CommandRunner, name: &str) -> bool {
    match runner.run("systemctl", &["is-active", name]).await {
        Ok(out) => out.trim() == "active",
        Err(e) => {
            debug!("Service {} is not active: {}", name, e);
            false
        }
    }
}

/// Wi-Fi mode: `hotspot`, `on` or `off`
pub async fn wifi_mode(runner: &CommandRunner) -> &'static str {
    let (hotspot, client) = tokio::join!(
        is_service_active(runner, "hostapd"),
        is_service_active(runner, "wpa_supplicant"),
    );
    if hotspot {
        "hotspot"
    } else if client {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nonexistent_service_is_inactive() {
        let runner = CommandRunner::default();
        assert!(!is_service_active(&runner, "zwc-no-such-unit.service").await);
    }
}
