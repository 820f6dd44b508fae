//! Read-only status probes for the dashboard
//!
//! Every probe is independent and stateless. A probe never fails the page:
//! when the underlying utility is missing, times out or prints something
//! unexpected, the probe returns [`Probe::Degraded`] with the placeholder the
//! dashboard shows and the reason, which is logged.

pub mod files;
pub mod git;
pub mod memory;
pub mod service;
pub mod system;
pub mod volume;

use std::fmt::Display;
use tracing::warn;

/// Outcome of one status probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// Value read from the system
    Measured(T),
    /// Placeholder shown because the value could not be read
    Degraded { fallback: T, reason: String },
}

impl<T> Probe<T> {
    /// Wrap a probe result, degrading to `fallback` on error
    pub fn from_result<E: Display>(what: &str, result: Result<T, E>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Probe::Measured(value),
            Err(e) => {
                let reason = e.to_string();
                warn!("Can't get {}: {}", what, reason);
                Probe::Degraded {
                    fallback: fallback(),
                    reason,
                }
            }
        }
    }

    /// Value to display, measured or placeholder
    pub fn value(&self) -> &T {
        match self {
            Probe::Measured(value) => value,
            Probe::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Probe::Measured(value) => value,
            Probe::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Probe::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Probe::Measured(_) => None,
            Probe::Degraded { reason, .. } => Some(reason),
        }
    }
}
