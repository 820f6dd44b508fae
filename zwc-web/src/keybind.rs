//! Keyboard binding editor
//!
//! Each UI action (CUIA) is bound to a key symbol plus a modifier mask. The
//! map lives in a YAML file next to the other appliance configuration and is
//! loaded fresh for every request.

use crate::form::FormData;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use zwc_common::{Error, Result};

pub const MOD_SHIFT: u8 = 1;
pub const MOD_CAPS: u8 = 2;
pub const MOD_CTRL: u8 = 4;
pub const MOD_ALT: u8 = 8;

pub const PAGE_TITLE: &str = "Keyboard Binding";
/// Form field naming the action to run on POST
pub const ACTION_KEY: &str = "ZYNTHIAN_KEYBIND_ACTION";
pub const SAVE_ACTION: &str = "SAVE_KEYBIND";

/// Key symbol and modifier mask for one CUIA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub keysym: String,
    #[serde(default)]
    pub modifier: u8,
}

impl KeyBinding {
    pub fn new(keysym: &str, modifier: u8) -> Self {
        Self {
            keysym: keysym.to_string(),
            modifier,
        }
    }
}

const DEFAULT_BINDINGS: [(&str, &str, u8); 24] = [
    ("POWER_OFF", "F12", MOD_CTRL),
    ("REBOOT", "F11", MOD_CTRL),
    ("RESTART_UI", "F10", MOD_CTRL),
    ("RELOAD_MIDI_CONFIG", "F9", MOD_CTRL),
    ("ALL_NOTES_OFF", "space", 0),
    ("ALL_SOUNDS_OFF", "space", MOD_SHIFT),
    ("ALL_OFF", "space", MOD_CTRL),
    ("TOGGLE_AUDIO_RECORD", "r", MOD_CTRL),
    ("TOGGLE_AUDIO_PLAY", "p", MOD_CTRL),
    ("TOGGLE_MIDI_RECORD", "r", MOD_ALT),
    ("TOGGLE_MIDI_PLAY", "p", MOD_ALT),
    ("SELECT", "Return", 0),
    ("SELECT_UP", "Up", 0),
    ("SELECT_DOWN", "Down", 0),
    ("BACK_UP", "BackSpace", 0),
    ("BACK_DOWN", "Escape", 0),
    ("LAYER_UP", "Prior", 0),
    ("LAYER_DOWN", "Next", 0),
    ("SNAPSHOT_UP", "Prior", MOD_SHIFT),
    ("SNAPSHOT_DOWN", "Next", MOD_SHIFT),
    ("SWITCH_LAYER_SHORT", "l", 0),
    ("SWITCH_BACK_SHORT", "b", 0),
    ("SWITCH_SNAPSHOT_SHORT", "s", 0),
    ("SWITCH_SELECT_SHORT", "Return", MOD_SHIFT),
];

/// Built-in bindings used when no binding file exists
pub fn default_bindings() -> IndexMap<String, KeyBinding> {
    DEFAULT_BINDINGS
        .iter()
        .map(|(cuia, keysym, modifier)| (cuia.to_string(), KeyBinding::new(keysym, *modifier)))
        .collect()
}

/// Keybinding map backed by one YAML file
#[derive(Debug, Clone)]
pub struct KeybindingMap {
    path: PathBuf,
    map: IndexMap<String, KeyBinding>,
}

impl KeybindingMap {
    /// Map for `path`, holding the defaults until [`load`](Self::load) is called
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            map: default_bindings(),
        }
    }

    pub fn bindings(&self) -> &IndexMap<String, KeyBinding> {
        &self.map
    }

    pub fn get(&self, cuia: &str) -> Option<&KeyBinding> {
        self.map.get(cuia)
    }

    /// Replace the in-memory map with the file content
    ///
    /// A missing file loads the defaults.
    pub fn load(&mut self) -> Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No keybinding file at {}, using defaults", self.path.display());
                self.map = default_bindings();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        self.map = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!("invalid keybinding file {}: {}", self.path.display(), e))
        })?;
        debug!("Loaded {} key bindings from {}", self.map.len(), self.path.display());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_yaml::to_string(&self.map)
            .map_err(|e| Error::Internal(format!("keybinding serialization: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        info!("Saved keyboard binding to {}", self.path.display());
        Ok(())
    }

    /// Clear every modifier mask
    ///
    /// Modifier checkboxes are only submitted when checked, so a save starts
    /// from a clean mask.
    pub fn reset_modifiers(&mut self) {
        for binding in self.map.values_mut() {
            binding.modifier = 0;
        }
    }

    /// Apply one posted `CUIA:param` field
    ///
    /// `param` is one of `shift`, `ctrl`, `alt`, `caps` (set the modifier
    /// bit) or `keysym` (set the key).
    pub fn update_binding(&mut self, field: &str, value: &str) -> Result<()> {
        let (cuia, param) = field
            .split_once(':')
            .ok_or_else(|| Error::InvalidInput(format!("'{}' is not a CUIA:param field", field)))?;
        debug!("Update binding for {} with param {} value {}", cuia, param, value);

        let binding = self
            .map
            .get_mut(cuia)
            .ok_or_else(|| Error::NotFound(format!("CUIA '{}'", cuia)))?;
        match param {
            "shift" => binding.modifier |= MOD_SHIFT,
            "caps" => binding.modifier |= MOD_CAPS,
            "ctrl" => binding.modifier |= MOD_CTRL,
            "alt" => binding.modifier |= MOD_ALT,
            "keysym" => binding.keysym = value.to_string(),
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown binding parameter '{}' for {}",
                    other, cuia
                )))
            }
        }
        Ok(())
    }

    /// Reset modifiers, then apply every `CUIA:param` field of `data`
    ///
    /// Fields that do not name a known CUIA and parameter are logged and
    /// skipped. Returns how many fields were applied.
    pub fn apply_form(&mut self, data: &FormData) -> usize {
        self.reset_modifiers();
        let mut applied = 0;
        for (field, value) in data.iter_first() {
            if !field.contains(':') {
                continue;
            }
            match self.update_binding(field, value) {
                Ok(()) => applied += 1,
                Err(e) => warn!("Skipping key binding field '{}': {}", field, e),
            }
        }
        applied
    }
}

/// Rendered keybinding page
#[derive(Debug, Clone, Serialize)]
pub struct KeybindPage {
    pub title: &'static str,
    pub config: KeybindConfig,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeybindConfig {
    #[serde(rename = "UI_KEYBINDINGS")]
    pub bindings: IndexMap<String, KeyBinding>,
}

impl KeybindPage {
    pub fn new(map: &KeybindingMap, errors: Vec<String>) -> Self {
        Self {
            title: PAGE_TITLE,
            config: KeybindConfig {
                bindings: map.bindings().clone(),
            },
            errors,
        }
    }
}
