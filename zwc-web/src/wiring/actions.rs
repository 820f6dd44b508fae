//! Action types selectable for switches, analog I/O and sensors
//!
//! Each enum maps to the token stored in the environment / profile files and
//! to a display label for the form.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Error for a token that names no known action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($token:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Token stored in configuration
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }

            /// Human readable label
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Tokens of every variant, in display order
            pub fn tokens() -> Vec<&'static str> {
                Self::ALL.iter().map(|a| a.as_str()).collect()
            }

            /// token → label pairs, in display order
            pub fn labels() -> Vec<(&'static str, &'static str)> {
                Self::ALL.iter().map(|a| (a.as_str(), a.label())).collect()
            }
        }

        impl FromStr for $name {
            type Err = UnknownAction;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    other => Err(UnknownAction(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

action_enum! {
    /// What a custom switch does when pushed
    CustomSwitchAction {
        None => ("NONE", "None"),
        UiAction => ("UI_ACTION", "UI Action"),
        MidiCc => ("MIDI_CC", "MIDI CC"),
        MidiNote => ("MIDI_NOTE", "MIDI Note"),
        MidiProgChange => ("MIDI_PROG_CHANGE", "MIDI Program Change"),
        CvGateIn => ("CVGATE_IN", "CV/Gate In"),
        CvGateOut => ("CVGATE_OUT", "CV/Gate Out"),
    }
}

action_enum! {
    /// UI action triggered by a custom switch push
    UiAction {
        None => ("NONE", "None"),
        PowerOff => ("POWER_OFF", "Power Off"),
        Reboot => ("REBOOT", "Reboot"),
        RestartUi => ("RESTART_UI", "Restart UI"),
        ReloadMidiConfig => ("RELOAD_MIDI_CONFIG", "Reload MIDI Config"),
        ReloadKeyBinding => ("RELOAD_KEY_BINDING", "Reload Key Binding"),
        LastStateAction => ("LAST_STATE_ACTION", "Last State Action"),
        AllNotesOff => ("ALL_NOTES_OFF", "All Notes Off"),
        AllSoundsOff => ("ALL_SOUNDS_OFF", "All Sounds Off"),
        AllOff => ("ALL_OFF", "All Off"),
        ToggleAudioRecord => ("TOGGLE_AUDIO_RECORD", "Toggle Audio Record"),
        ToggleAudioPlay => ("TOGGLE_AUDIO_PLAY", "Toggle Audio Play"),
        ToggleMidiRecord => ("TOGGLE_MIDI_RECORD", "Toggle MIDI Record"),
        ToggleMidiPlay => ("TOGGLE_MIDI_PLAY", "Toggle MIDI Play"),
        Select => ("SELECT", "Select"),
        SelectUp => ("SELECT_UP", "Select Up"),
        SelectDown => ("SELECT_DOWN", "Select Down"),
        BackUp => ("BACK_UP", "Back Up"),
        BackDown => ("BACK_DOWN", "Back Down"),
        LayerUp => ("LAYER_UP", "Layer Up"),
        LayerDown => ("LAYER_DOWN", "Layer Down"),
        SnapshotUp => ("SNAPSHOT_UP", "Snapshot Up"),
        SnapshotDown => ("SNAPSHOT_DOWN", "Snapshot Down"),
        SwitchLayerShort => ("SWITCH_LAYER_SHORT", "Layer Switch Short"),
        SwitchLayerBold => ("SWITCH_LAYER_BOLD", "Layer Switch Bold"),
        SwitchLayerLong => ("SWITCH_LAYER_LONG", "Layer Switch Long"),
        SwitchBackShort => ("SWITCH_BACK_SHORT", "Back Switch Short"),
        SwitchBackBold => ("SWITCH_BACK_BOLD", "Back Switch Bold"),
        SwitchBackLong => ("SWITCH_BACK_LONG", "Back Switch Long"),
        SwitchSnapshotShort => ("SWITCH_SNAPSHOT_SHORT", "Snapshot Switch Short"),
        SwitchSnapshotBold => ("SWITCH_SNAPSHOT_BOLD", "Snapshot Switch Bold"),
        SwitchSnapshotLong => ("SWITCH_SNAPSHOT_LONG", "Snapshot Switch Long"),
        SwitchSelectShort => ("SWITCH_SELECT_SHORT", "Select Switch Short"),
        SwitchSelectBold => ("SWITCH_SELECT_BOLD", "Select Switch Bold"),
        SwitchSelectLong => ("SWITCH_SELECT_LONG", "Select Switch Long"),
        ScreenMainMenu => ("SCREEN_MAIN", "Main Menu"),
        ScreenAdmin => ("SCREEN_ADMIN", "Admin Menu"),
        ScreenAudioMixer => ("SCREEN_AUDIO_MIXER", "Audio Mixer"),
    }
}

action_enum! {
    /// What an analog input, analog output or distance sensor drives
    SensorAction {
        None => ("NONE", "None"),
        MidiCc => ("MIDI_CC", "MIDI CC"),
        MidiPitchBend => ("MIDI_PITCH_BEND", "MIDI Pitch Bend"),
        MidiChanPress => ("MIDI_CHAN_PRESS", "MIDI Channel Pressure"),
    }
}

impl CustomSwitchAction {
    /// Whether the switch takes a MIDI channel
    pub fn uses_midi_channel(self) -> bool {
        matches!(
            self,
            CustomSwitchAction::MidiCc
                | CustomSwitchAction::MidiNote
                | CustomSwitchAction::MidiProgChange
                | CustomSwitchAction::CvGateIn
                | CustomSwitchAction::CvGateOut
        )
    }

    /// Whether the switch drives a CV channel
    pub fn uses_cv_channel(self) -> bool {
        matches!(self, CustomSwitchAction::CvGateIn | CustomSwitchAction::CvGateOut)
    }
}

/// Space separated tokens, as used by a field's `enabling_options`
pub fn enabling_tokens<T: Copy + fmt::Display>(actions: &[T]) -> String {
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
