//! Wiring profile schema and completion
//!
//! A profile covers four key families. Each slot (`base name`) expands into a
//! fixed list of sub-keys, and every sub-key has a default. Completing a raw
//! profile yields exactly the schema key set, in schema order.

use indexmap::IndexMap;

pub const CUSTOM_SWITCH_COUNT: usize = 36;
pub const ZYNAPTIK_AD_COUNT: usize = 4;
pub const ZYNAPTIK_DA_COUNT: usize = 4;
pub const ZYNTOF_COUNT: usize = 4;

/// Key families that belong in a wiring profile
///
/// Only keys starting with one of these prefixes are written when a profile
/// is saved.
pub const PROFILE_KEY_PREFIXES: [&str; 3] = [
    "ZYNTHIAN_WIRING_CUSTOM_SWITCH_",
    "ZYNTHIAN_WIRING_ZYNAPTIK",
    "ZYNTHIAN_WIRING_ZYNTOF",
];

/// Sub-keys of a custom switch slot with their defaults
const SWITCH_SUBKEYS: [(&str, &str); 8] = [
    ("", "NONE"),
    ("__UI_SHORT", "NONE"),
    ("__UI_BOLD", "NONE"),
    ("__UI_LONG", "NONE"),
    ("__MIDI_CHAN", "0"),
    ("__MIDI_NUM", "0"),
    ("__MIDI_VAL", "0"),
    ("__CV_CHAN", "0"),
];

/// Sub-keys of an analog in/out or distance sensor slot with their defaults
const SENSOR_SUBKEYS: [(&str, &str); 3] = [("", "NONE"), ("__MIDI_CHAN", "0"), ("__MIDI_NUM", "0")];

/// The four slot families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFamily {
    CustomSwitch,
    ZynaptikAd,
    ZynaptikDa,
    Zyntof,
}

impl SlotFamily {
    pub const ALL: [SlotFamily; 4] = [
        SlotFamily::CustomSwitch,
        SlotFamily::ZynaptikAd,
        SlotFamily::ZynaptikDa,
        SlotFamily::Zyntof,
    ];

    pub fn slot_count(self) -> usize {
        match self {
            SlotFamily::CustomSwitch => CUSTOM_SWITCH_COUNT,
            SlotFamily::ZynaptikAd => ZYNAPTIK_AD_COUNT,
            SlotFamily::ZynaptikDa => ZYNAPTIK_DA_COUNT,
            SlotFamily::Zyntof => ZYNTOF_COUNT,
        }
    }

    /// Base variable name of slot `index` (1-based)
    pub fn base_name(self, index: usize) -> String {
        match self {
            SlotFamily::CustomSwitch => format!("ZYNTHIAN_WIRING_CUSTOM_SWITCH_{:02}", index),
            SlotFamily::ZynaptikAd => format!("ZYNTHIAN_WIRING_ZYNAPTIK_AD{:02}", index),
            SlotFamily::ZynaptikDa => format!("ZYNTHIAN_WIRING_ZYNAPTIK_DA{:02}", index),
            SlotFamily::Zyntof => format!("ZYNTHIAN_WIRING_ZYNTOF{:02}", index),
        }
    }

    fn subkeys(self) -> &'static [(&'static str, &'static str)] {
        match self {
            SlotFamily::CustomSwitch => &SWITCH_SUBKEYS,
            SlotFamily::ZynaptikAd | SlotFamily::ZynaptikDa | SlotFamily::Zyntof => &SENSOR_SUBKEYS,
        }
    }
}

/// Whether `key` belongs to one of the profile key families
pub fn is_profile_key(key: &str) -> bool {
    PROFILE_KEY_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Fixed enumeration of profile keys with defaults
#[derive(Debug, Clone)]
pub struct Schema {
    entries: IndexMap<String, &'static str>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        for family in SlotFamily::ALL {
            for index in 1..=family.slot_count() {
                let base = family.base_name(index);
                for (suffix, default) in family.subkeys() {
                    entries.insert(format!("{}{}", base, suffix), *default);
                }
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn default_for(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).copied()
    }

    /// Schema keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Fill every schema key from `raw`, using defaults for missing keys
    ///
    /// Keys in `raw` that are not part of the schema are not carried over.
    pub fn complete(&self, raw: &IndexMap<String, String>) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(key, default)| {
                let value = raw
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| default.to_string());
                (key.clone(), value)
            })
            .collect()
    }

    /// Keys in `raw` that the schema does not know
    pub fn extras(&self, raw: &IndexMap<String, String>) -> IndexMap<String, String> {
        raw.iter()
            .filter(|(k, _)| !self.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_size() {
        let schema = Schema::new();
        assert_eq!(schema.len(), 36 * 8 + 12 * 3);
    }

    #[test]
    fn test_schema_order() {
        let schema = Schema::new();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys[0], "ZYNTHIAN_WIRING_CUSTOM_SWITCH_01");
        assert_eq!(keys[1], "ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__UI_SHORT");
        assert_eq!(keys[7], "ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__CV_CHAN");
        assert_eq!(keys[8], "ZYNTHIAN_WIRING_CUSTOM_SWITCH_02");
        assert_eq!(keys[36 * 8], "ZYNTHIAN_WIRING_ZYNAPTIK_AD01");
        assert_eq!(*keys.last().unwrap(), "ZYNTHIAN_WIRING_ZYNTOF04__MIDI_NUM");
    }

    #[test]
    fn test_defaults_by_suffix() {
        let schema = Schema::new();
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_CUSTOM_SWITCH_12"), Some("NONE"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_CUSTOM_SWITCH_12__UI_BOLD"), Some("NONE"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_CUSTOM_SWITCH_12__MIDI_VAL"), Some("0"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_CUSTOM_SWITCH_12__CV_CHAN"), Some("0"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_ZYNAPTIK_DA03"), Some("NONE"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_ZYNTOF02__MIDI_CHAN"), Some("0"));
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_ZYNTOF02__MIDI_VAL"), None);
        assert_eq!(schema.default_for("ZYNTHIAN_WIRING_CUSTOM_SWITCH_37"), None);
    }

    #[test]
    fn test_complete_empty_gives_full_key_set() {
        let schema = Schema::new();
        let completed = schema.complete(&IndexMap::new());
        assert_eq!(completed.len(), schema.len());
        assert!(completed.keys().map(|k| k.as_str()).eq(schema.keys()));
        assert!(completed
            .iter()
            .all(|(k, v)| schema.default_for(k) == Some(v.as_str())));
    }

    #[test]
    fn test_complete_keeps_raw_values_and_drops_unknown() {
        let schema = Schema::new();
        let mut raw = IndexMap::new();
        raw.insert("ZYNTHIAN_WIRING_ZYNTOF01".to_string(), "MIDI_CC".to_string());
        raw.insert("SOMETHING_ELSE".to_string(), "x".to_string());

        let completed = schema.complete(&raw);
        assert_eq!(completed.len(), schema.len());
        assert_eq!(completed["ZYNTHIAN_WIRING_ZYNTOF01"], "MIDI_CC");
        assert!(!completed.contains_key("SOMETHING_ELSE"));

        let extras = schema.extras(&raw);
        assert_eq!(extras.len(), 1);
        assert_eq!(extras["SOMETHING_ELSE"], "x");
    }

    #[test]
    fn test_is_profile_key() {
        assert!(is_profile_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__MIDI_CHAN"));
        assert!(is_profile_key("ZYNTHIAN_WIRING_ZYNAPTIK_AD01"));
        assert!(is_profile_key("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG"));
        assert!(is_profile_key("ZYNTHIAN_WIRING_ZYNTOF03"));
        assert!(!is_profile_key("ZYNTHIAN_WIRING_LAYOUT"));
        assert!(!is_profile_key("zynthian_wiring_layout_saveas_fname"));
    }
}
