//! Appliance environment variables
//!
//! All appliance settings (wiring layout, hardware descriptors, MIDI options)
//! live in environment variables written by a separate persistence layer.
//! Handlers only read them, through [`EnvStore`], so tests and request-local
//! overlays can stand in for the process environment.

use indexmap::IndexMap;

/// Read-only key/value view of the appliance environment
pub trait EnvStore: Send + Sync {
    /// Value of `key`, or `None` when unset
    fn get(&self, key: &str) -> Option<String>;

    /// Value of `key`, or `default` when unset
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Value of `key`, or the empty string when unset
    fn get_or_empty(&self, key: &str) -> String {
        self.get_or(key, "")
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: IndexMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Request-local overrides layered over another store
///
/// Used to re-render a page with the values a user just submitted without
/// touching the process environment.
pub struct OverlayEnv<'a> {
    base: &'a dyn EnvStore,
    overrides: IndexMap<String, String>,
}

impl<'a> OverlayEnv<'a> {
    pub fn new(base: &'a dyn EnvStore) -> Self {
        Self {
            base,
            overrides: IndexMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(key.into(), value.into());
    }

    /// Number of overridden keys
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl EnvStore for OverlayEnv<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.base.get(key))
    }
}
