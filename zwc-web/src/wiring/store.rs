//! Wiring customization profile store
//!
//! Profiles are plain files in one directory; the file name is the profile
//! name. Listing never fails as a whole: an unreadable file is skipped with a
//! warning. The collection always starts with the empty-name profile, which
//! stands for "no custom profile selected".

use crate::form::FormData;
use crate::wiring::parser::{format_assignment, parse_profile};
use crate::wiring::schema::{is_profile_key, Schema};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zwc_common::{Error, Result};

/// One loaded profile
#[derive(Debug, Clone, Default, Serialize)]
pub struct Profile {
    pub name: String,
    /// Completed values, exactly the schema key set
    pub values: IndexMap<String, String>,
    /// Keys found on disk that the schema does not know
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extras: IndexMap<String, String>,
}

/// Ordered profile name → profile, always headed by the empty-name entry
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ProfileCollection {
    profiles: IndexMap<String, Profile>,
}

impl Default for ProfileCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileCollection {
    /// Collection holding only the "none selected" entry
    pub fn new() -> Self {
        let mut profiles = IndexMap::new();
        profiles.insert(String::new(), Profile::default());
        Self { profiles }
    }

    pub fn insert(&mut self, profile: Profile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Name of the first entry
    pub fn first_name(&self) -> &str {
        self.profiles
            .keys()
            .next()
            .map(|k| k.as_str())
            .unwrap_or("")
    }

    /// Remove `name` and return the profile that becomes current
    ///
    /// The empty-name entry is never removed, so the collection stays
    /// non-empty and the fallback is deterministic.
    pub fn remove(&mut self, name: &str) -> &str {
        if !name.is_empty() {
            self.profiles.shift_remove(name);
        }
        self.first_name()
    }

    /// Completed values keyed by profile name, for the profile selector
    pub fn presets(&self) -> IndexMap<&str, &IndexMap<String, String>> {
        self.profiles
            .iter()
            .map(|(name, profile)| (name.as_str(), &profile.values))
            .collect()
    }
}

/// Outcome of a successful save
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Profile keys written
    pub written: usize,
    /// Submitted keys outside the profile families, not written
    pub skipped: usize,
}

/// Directory-backed profile store
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
    schema: Schema,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            schema: Schema::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load every profile in lexical file name order
    pub fn list(&self) -> ProfileCollection {
        let mut collection = ProfileCollection::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Can't read wiring profiles directory {}: {}",
                    self.dir.display(),
                    e
                );
                return collection;
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.file_name().to_string_lossy().into_owned()),
                Err(e) => {
                    warn!("Can't read wiring profiles directory entry: {}", e);
                    None
                }
            })
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        for name in names {
            let path = self.dir.join(&name);
            match self.load_file(&name, &path) {
                Ok(profile) => {
                    debug!("Loaded wiring custom profile '{}'", path.display());
                    collection.insert(profile);
                }
                Err(e) => {
                    warn!(
                        "Invalid wiring custom profile '{}' will be ignored: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        collection
    }

    fn load_file(&self, name: &str, path: &Path) -> Result<Profile> {
        let content = fs::read_to_string(path)?;
        let parsed = parse_profile(&content);
        for warning in &parsed.warnings {
            warn!(
                "Invalid line {} in wiring custom profile '{}' will be ignored: {}",
                warning.line_no,
                path.display(),
                warning.line
            );
        }

        Ok(Profile {
            name: name.to_string(),
            values: self.schema.complete(&parsed.values),
            extras: self.schema.extras(&parsed.values),
        })
    }

    /// Write the profile-family keys of `data` to profile `name`
    ///
    /// Overwrites an existing profile. Keys outside the three profile
    /// families are dropped, which includes anything a previous version of
    /// the file carried outside them.
    ///
    /// A value spanning more than one line is rejected before anything is
    /// written, since the file format holds one assignment per line.
    pub fn save(&self, name: &str, data: &FormData) -> Result<SaveReport> {
        let path = self.profile_path(name)?;
        if let Some((key, _)) = data
            .iter_first()
            .find(|(key, value)| is_profile_key(key) && value.contains(['\n', '\r']))
        {
            return Err(Error::InvalidInput(format!(
                "value of {} must not contain line breaks",
                key
            )));
        }

        let mut content = String::new();
        let mut written = 0;
        let mut skipped = 0;
        for (key, value) in data.iter_first() {
            if is_profile_key(key) {
                content.push_str(&format_assignment(key, value));
                written += 1;
            } else {
                skipped += 1;
            }
        }

        fs::create_dir_all(&self.dir)?;
        let tmp_path = self.dir.join(format!(".{}.tmp", name));
        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(
            "Saved wiring custom profile '{}' ({} keys, {} skipped)",
            path.display(),
            written,
            skipped
        );
        Ok(SaveReport {
            path,
            written,
            skipped,
        })
    }

    /// Remove profile `name`
    ///
    /// Returns `Ok(false)` when there was nothing to delete.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.profile_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted wiring custom profile '{}'", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Can't delete wiring custom profile '{}': not found", path.display());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// File path for profile `name`, rejecting names that are not plain file names
    pub fn profile_path(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self.dir.join(name))
    }
}

/// Check that `name` can be used as a profile file name
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("profile name is empty".to_string()));
    }
    if name.starts_with('.') {
        return Err(Error::InvalidInput(format!(
            "profile name '{}' must not start with '.'",
            name
        )));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidInput(format!(
            "profile name '{}' contains a path separator",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_missing_directory_lists_only_empty_profile() {
        let store = ProfileStore::new("/nonexistent/wiring-profiles");
        let collection = store.list();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.first_name(), "");
    }

    #[test]
    fn test_list_is_sorted_and_headed_by_empty_profile() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta"), "").unwrap();
        fs::write(dir.path().join("alpha"), "").unwrap();
        fs::write(dir.path().join(".alpha.tmp"), "").unwrap();

        let collection = ProfileStore::new(dir.path()).list();
        let names: Vec<&str> = collection.names().collect();
        assert_eq!(names, vec!["", "alpha", "zeta"]);
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("binary"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("good"), "ZYNTHIAN_WIRING_ZYNTOF01=\"MIDI_CC\"\n").unwrap();

        let collection = ProfileStore::new(dir.path()).list();
        let names: Vec<&str> = collection.names().collect();
        assert_eq!(names, vec!["", "good"]);
    }

    #[test]
    fn test_loaded_profile_is_completed_and_keeps_extras() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("p"),
            "# comment\nZYNTHIAN_WIRING_ZYNAPTIK_AD02=\"MIDI_PITCH_BEND\"\nLEGACY_KEY=\"1\"\n",
        )
        .unwrap();

        let store = ProfileStore::new(dir.path());
        let collection = store.list();
        let profile = collection.get("p").unwrap();
        assert_eq!(profile.values.len(), store.schema().len());
        assert_eq!(profile.values["ZYNTHIAN_WIRING_ZYNAPTIK_AD02"], "MIDI_PITCH_BEND");
        assert_eq!(profile.extras["LEGACY_KEY"], "1");
        assert!(!profile.values.contains_key("LEGACY_KEY"));
    }

    #[test]
    fn test_save_writes_only_profile_families_in_order() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles"));
        let data = form(&[
            ("_command", "SAVEAS"),
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_02", "MIDI_NOTE"),
            ("ZYNTHIAN_WIRING_LAYOUT", "MCP23017_EXTRA"),
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_02__MIDI_NUM", "60"),
            ("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC"),
        ]);

        let report = store.save("stage", &data).unwrap();
        assert_eq!(report.written, 3);
        assert_eq!(report.skipped, 2);

        let content = fs::read_to_string(&report.path).unwrap();
        assert_eq!(
            content,
            "ZYNTHIAN_WIRING_CUSTOM_SWITCH_02=\"MIDI_NOTE\"\n\
             ZYNTHIAN_WIRING_CUSTOM_SWITCH_02__MIDI_NUM=\"60\"\n\
             ZYNTHIAN_WIRING_ZYNTOF01=\"MIDI_CC\"\n"
        );
        assert!(!dir.path().join("profiles").join(".stage.tmp").exists());
    }

    #[test]
    fn test_save_uses_first_submitted_value() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let data = form(&[
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_01", "MIDI_CC"),
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_01", "MIDI_NOTE"),
        ]);
        let report = store.save("p", &data).unwrap();
        let content = fs::read_to_string(report.path).unwrap();
        assert_eq!(content, "ZYNTHIAN_WIRING_CUSTOM_SWITCH_01=\"MIDI_CC\"\n");
    }

    #[test]
    fn test_save_then_list_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let data = form(&[
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_05", "CVGATE_OUT"),
            ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_05__CV_CHAN", "2"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_DA01__MIDI_NUM", "74"),
        ]);
        store.save("live", &data).unwrap();

        let collection = store.list();
        let values = &collection.get("live").unwrap().values;
        assert_eq!(values["ZYNTHIAN_WIRING_CUSTOM_SWITCH_05"], "CVGATE_OUT");
        assert_eq!(values["ZYNTHIAN_WIRING_CUSTOM_SWITCH_05__CV_CHAN"], "2");
        assert_eq!(values["ZYNTHIAN_WIRING_ZYNAPTIK_DA01__MIDI_NUM"], "74");
        assert_eq!(values["ZYNTHIAN_WIRING_CUSTOM_SWITCH_05__MIDI_CHAN"], "0");
        assert_eq!(values["ZYNTHIAN_WIRING_ZYNAPTIK_DA01"], "NONE");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        store
            .save("p", &form(&[("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC")]))
            .unwrap();
        store
            .save("p", &form(&[("ZYNTHIAN_WIRING_ZYNTOF02", "MIDI_CC")]))
            .unwrap();

        let values = store.list().get("p").unwrap().values.clone();
        assert_eq!(values["ZYNTHIAN_WIRING_ZYNTOF01"], "NONE");
        assert_eq!(values["ZYNTHIAN_WIRING_ZYNTOF02"], "MIDI_CC");
    }

    #[test]
    fn test_multiline_value_is_refused_and_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        store
            .save("p", &form(&[("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC")]))
            .unwrap();
        let before = fs::read_to_string(dir.path().join("p")).unwrap();

        for value in [
            "POWER_OFF\nZYNTHIAN_WIRING_ZYNTOF01=\"MIDI_CC\"",
            "POWER_OFF\r\nZYNTHIAN_WIRING_ZYNTOF02=\"MIDI_CC\"",
            "POWER_OFF\r",
        ] {
            let err = store
                .save(
                    "p",
                    &form(&[
                        ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_01", "UI_ACTION"),
                        ("ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__UI_SHORT", value),
                    ]),
                )
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "value {:?}", value);
        }

        assert_eq!(fs::read_to_string(dir.path().join("p")).unwrap(), before);
        let values = store.list().get("p").unwrap().values.clone();
        assert_eq!(values["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__UI_SHORT"], "NONE");
        assert_eq!(values["ZYNTHIAN_WIRING_ZYNTOF02"], "NONE");
    }

    #[test]
    fn test_multiline_value_in_skipped_key_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let report = store
            .save(
                "p",
                &form(&[
                    ("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC"),
                    ("zynthian_notes", "two\nlines"),
                ]),
            )
            .unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_unsafe_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        let data = form(&[("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC")]);
        for name in ["", "  ", "../escape", "a/b", ".hidden", ".."] {
            let err = store.save(name, &data).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "name {:?}", name);
        }
        assert!(store.delete("../x").is_err());
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        store
            .save("p", &form(&[("ZYNTHIAN_WIRING_ZYNTOF01", "MIDI_CC")]))
            .unwrap();

        assert!(store.delete("p").unwrap());
        assert!(!dir.path().join("p").exists());
        assert!(!store.delete("p").unwrap());
    }

    #[test]
    fn test_collection_remove_falls_back_to_first() {
        let mut collection = ProfileCollection::new();
        for name in ["a", "b"] {
            collection.insert(Profile {
                name: name.to_string(),
                ..Default::default()
            });
        }

        assert_eq!(collection.remove("a"), "");
        assert_eq!(collection.len(), 2);
        // The synthetic entry survives any removal
        assert_eq!(collection.remove(""), "");
        assert_eq!(collection.remove("b"), "");
        assert_eq!(collection.len(), 1);
        assert!(collection.contains(""));
    }

    #[test]
    fn test_presets_map_names_to_values() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("p"), "ZYNTHIAN_WIRING_ZYNTOF01=\"MIDI_CC\"\n").unwrap();
        let collection = ProfileStore::new(dir.path()).list();
        let presets = collection.presets();
        assert!(presets[""].is_empty());
        assert_eq!(presets["p"]["ZYNTHIAN_WIRING_ZYNTOF01"], "MIDI_CC");
    }
}
