//! Wiring page form builder
//!
//! Which fields appear depends on the wiring layout, the Zynaptik and Zyntof
//! add-on configuration and the selected customization profile, all read
//! from the environment.

use crate::form::{FormConfig, FormField};
use crate::wiring::actions::{CustomSwitchAction, SensorAction, UiAction};
use crate::wiring::presets::{all_presets, layout_names};
use crate::wiring::schema::{SlotFamily, ZYNTOF_COUNT};
use crate::wiring::store::ProfileCollection;
use tracing::warn;
use zwc_common::EnvStore;

pub const LAYOUT_KEY: &str = "ZYNTHIAN_WIRING_LAYOUT";
pub const CUSTOM_PROFILE_KEY: &str = "ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE";
pub const SAVEAS_FNAME_KEY: &str = "zynthian_wiring_layout_saveas_fname";

const DIV_CLASS: &str = "col-sm-3";
/// Custom switches available on Z2 layouts
const Z2_EXTRA_SWITCHES: usize = 32;
const ZYNAPTIK_SWITCHES: usize = 16;

const INT_PIN_LABELS: [(&str, &str); 10] = [
    ("", "Default"),
    ("0", "WPi-GPIO 0 (pin 11)"),
    ("2", "WPi-GPIO 2 (pin 13)"),
    ("3", "WPi-GPIO 3 (pin 15)"),
    ("4", "WPi-GPIO 4 (pin 16)"),
    ("5", "WPi-GPIO 5 (pin 18)"),
    ("6", "WPi-GPIO 6 (pin 22)"),
    ("7", "WPi-GPIO 7 (pin 7)"),
    ("25", "WPi-GPIO 25 (pin 37)"),
    ("27", "WPi-GPIO 27 (pin 36)"),
];

const ZYNAPTIK_CONFIGS: [&str; 9] = [
    "",
    "Custom 16xDIO",
    "Custom 4xAD",
    "Custom 4xDA",
    "Custom 16xDIO + 4xAD",
    "Custom 16xDIO + 4xDA",
    "Custom 4xAD + 4xDA",
    "Custom 16xDIO + 4xAD + 4xDA",
    "Zynaptik-2 (16xDIO + 4xAD + 4xDA)",
];

const KIT_WARNING: &str = "<div class='alert alert-warning'>Some config options are disabled. \
You may want to <a href='/hw-kit'>choose Custom Kit</a> for enabling all options.</div>";

fn midi_channel_options() -> Vec<String> {
    std::iter::once("Active".to_string())
        .chain((1..=16).map(|c| c.to_string()))
        .collect()
}

fn midi_number_options() -> Vec<String> {
    (0..128).map(|n| n.to_string()).collect()
}

/// Number of custom switches driven by spare encoder-board inputs
///
/// Four switches belong to the encoders; up to four more are free.
pub fn extra_switch_count(layout: &str, switches: &str) -> usize {
    if layout.starts_with("Z2") {
        return Z2_EXTRA_SWITCHES;
    }
    switches.split(',').count().saturating_sub(4).min(4)
}

/// Number of distance sensors configured, 0 when unset or invalid
pub fn zyntof_count(config: &str) -> usize {
    if config.is_empty() {
        return 0;
    }
    match config.trim().parse::<usize>() {
        Ok(n) => n.min(ZYNTOF_COUNT),
        Err(e) => {
            warn!("Invalid distance sensor count '{}': {}", config, e);
            0
        }
    }
}

/// CV channel of a switch; unset or invalid reads as channel 1
fn cv_channel(env: &dyn EnvStore, base: &str) -> usize {
    let key = format!("{}__CV_CHAN", base);
    match env.get(&key) {
        None => 1,
        Some(v) => v.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid CV channel {}='{}': {}", key, v, e);
            1
        }),
    }
}

/// Builds the wiring page for one request
pub struct WiringFormBuilder<'a> {
    env: &'a dyn EnvStore,
    current_profile: &'a str,
    profiles: &'a ProfileCollection,
}

impl<'a> WiringFormBuilder<'a> {
    pub fn new(
        env: &'a dyn EnvStore,
        current_profile: &'a str,
        profiles: &'a ProfileCollection,
    ) -> Self {
        Self {
            env,
            current_profile,
            profiles,
        }
    }

    pub fn build(&self) -> FormConfig {
        let env = self.env;
        let mut config = FormConfig::new();

        let disabled = env.get_or_empty("ZYNTHIAN_KIT_VERSION") != "Custom";
        if disabled {
            config.insert("ZYNTHIAN_MESSAGE".to_string(), FormField::html(KIT_WARNING));
        }

        let layout = env.get_or_empty(LAYOUT_KEY);
        let switches = env.get_or_empty("ZYNTHIAN_WIRING_SWITCHES");
        let zynaptik_config = env.get_or_empty("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG");
        let zyntof_config = env.get_or_empty("ZYNTHIAN_WIRING_ZYNTOF_CONFIG");

        config.insert(
            LAYOUT_KEY.to_string(),
            FormField::select("Wiring Layout", Some(layout.clone()))
                .options(layout_names())
                .presets(serde_json::to_value(all_presets()).unwrap_or_default())
                .disabled(disabled),
        );

        let is_z2 = layout.starts_with("Z2");
        // Free text UI actions when a profile owns the switch setup
        let ui_action_select = !is_z2 && self.current_profile.is_empty();
        let n_extra = extra_switch_count(&layout, &switches);

        self.pin_fields(&mut config, !is_z2, disabled);
        if layout.starts_with("MCP23017") || layout.starts_with("I2C") {
            self.expander_fields(&mut config, &zynaptik_config, &zyntof_config, disabled);
        } else {
            for key in [
                "ZYNTHIAN_WIRING_MCP23017_INTA_PIN",
                "ZYNTHIAN_WIRING_MCP23017_INTB_PIN",
            ] {
                config.insert(key.to_string(), FormField::hidden(env.get(key)));
            }
            config.insert(
                "ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG".to_string(),
                FormField::hidden(Some(zynaptik_config.clone())),
            );
            config.insert(
                "ZYNTHIAN_WIRING_ZYNTOF_CONFIG".to_string(),
                FormField::hidden(Some(zyntof_config.clone())),
            );
        }

        self.profile_fields(&mut config);

        let n_zynaptik = if zynaptik_config.contains("16xDIO") {
            ZYNAPTIK_SWITCHES
        } else {
            0
        };
        let (cvgate_in, cvgate_out) =
            self.custom_switch_fields(&mut config, n_extra, n_zynaptik, ui_action_select);

        if zynaptik_config.contains("4xAD") {
            self.analog_fields(&mut config, SlotFamily::ZynaptikAd, &cvgate_in);
        }
        if zynaptik_config.contains("4xDA") {
            self.analog_fields(&mut config, SlotFamily::ZynaptikDa, &cvgate_out);
        }

        let n_zyntofs = zyntof_count(&zyntof_config);
        if n_zyntofs > 0 {
            section(&mut config, "_SECTION_ZYNTOF_", "Distance Sensors");
            for i in 1..=n_zyntofs {
                let base = SlotFamily::Zyntof.base_name(i);
                self.sensor_fields(&mut config, &base, &format!("TOF-{} Action", i));
                separator(&mut config, &format!("_SEP_ZT_{}_", i - 1));
            }
        }

        config.insert("_SPACER_".to_string(), FormField::html("<br>"));
        config
    }

    fn pin_fields(&self, config: &mut FormConfig, editable: bool, disabled: bool) {
        let fields = [
            ("ZYNTHIAN_WIRING_ENCODER_A", "Encoders A-pins"),
            ("ZYNTHIAN_WIRING_ENCODER_B", "Encoders B-pins"),
            ("ZYNTHIAN_WIRING_SWITCHES", "Switches Pins"),
        ];
        for (key, title) in fields {
            let field = if editable {
                FormField::text(title, self.env.get(key))
                    .advanced()
                    .disabled(disabled)
            } else {
                FormField::hidden(self.env.get(key))
            };
            config.insert(key.to_string(), field);
        }
    }

    fn expander_fields(
        &self,
        config: &mut FormConfig,
        zynaptik_config: &str,
        zyntof_config: &str,
        disabled: bool,
    ) {
        for (key, title) in [
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "MCP23017 INT-A Pin"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "MCP23017 INT-B Pin"),
        ] {
            config.insert(
                key.to_string(),
                FormField::select(title, self.env.get(key))
                    .options(INT_PIN_LABELS.iter().map(|(v, _)| *v))
                    .option_labels(INT_PIN_LABELS)
                    .advanced()
                    .disabled(disabled),
            );
        }
        config.insert(
            "ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG".to_string(),
            FormField::select("Zynaptik Config", Some(zynaptik_config.to_string()))
                .options(ZYNAPTIK_CONFIGS)
                .advanced()
                .refresh_on_change(),
        );
        config.insert(
            "ZYNTHIAN_WIRING_ZYNTOF_CONFIG".to_string(),
            FormField::select("Num. of Distance Sensors", Some(zyntof_config.to_string()))
                .options(["", "1", "2", "3", "4"])
                .option_labels([("", "0"), ("1", "1"), ("2", "2"), ("3", "3"), ("4", "4")])
                .advanced()
                .refresh_on_change(),
        );
    }

    fn profile_fields(&self, config: &mut FormConfig) {
        config.insert(
            CUSTOM_PROFILE_KEY.to_string(),
            FormField::select("Customization Profile", Some(self.current_profile.to_string()))
                .options(self.profiles.names())
                .presets(serde_json::to_value(self.profiles.presets()).unwrap_or_default())
                .refresh_on_change()
                .div_class("col-xs-8"),
        );
        config.insert(
            "zynthian_wiring_layout_saveas_script".to_string(),
            FormField::button("Save as ...", "button")
                .class("btn-theme btn-block")
                .icon("fa fa-plus")
                .script_file("wiring_layout_saveas.js")
                .div_class("col-sm-2")
                .inline(),
        );
        config.insert(
            "zynthian_wiring_layout_delete_script".to_string(),
            FormField::button("Delete", "submit")
                .class("btn-danger btn-block")
                .icon("fa fa-trash-o")
                .script_file("wiring_layout_delete.js")
                .div_class("col-sm-2")
                .inline(),
        );
        config.insert(
            SAVEAS_FNAME_KEY.to_string(),
            FormField::hidden(Some(String::new())),
        );
    }

    /// Returns the CV channels reserved as CV/Gate inputs and outputs
    fn custom_switch_fields(
        &self,
        config: &mut FormConfig,
        n_extra: usize,
        n_zynaptik: usize,
        ui_action_select: bool,
    ) -> (Vec<usize>, Vec<usize>) {
        let env = self.env;
        let mut cvgate_in = Vec::new();
        let mut cvgate_out = Vec::new();

        let total = n_extra + n_zynaptik;
        if total == 0 {
            return (cvgate_in, cvgate_out);
        }
        section(config, "_SECTION_CUSTOM_SWITCHES_", "Customizable Switches");

        for i in 0..total {
            let base = SlotFamily::CustomSwitch.base_name(i + 1);
            let title = if i < n_extra {
                format!("Extra Switch-{} Action", i + 1)
            } else {
                format!("Zynaptik Switch-{} Action", i + 1 - n_extra)
            };

            let action = env.get(&base);
            let cvchan = cv_channel(env, &base);
            match action.as_deref().map(str::parse::<CustomSwitchAction>) {
                Some(Ok(CustomSwitchAction::CvGateIn)) => cvgate_in.push(cvchan),
                Some(Ok(CustomSwitchAction::CvGateOut)) => cvgate_out.push(cvchan),
                Some(Err(e)) => warn!("{}: {}", base, e),
                _ => {}
            }

            config.insert(
                base.clone(),
                FormField::select(title, action)
                    .options(CustomSwitchAction::tokens())
                    .option_labels(CustomSwitchAction::labels())
                    .refresh_on_change()
                    .div_class(DIV_CLASS)
                    .advanced(),
            );

            for (suffix, title) in [
                ("__UI_SHORT", "Short-push"),
                ("__UI_BOLD", "Bold-push"),
                ("__UI_LONG", "Long-push"),
            ] {
                let key = format!("{}{}", base, suffix);
                let field = if ui_action_select {
                    // Stored UI actions may carry parameters after the action name
                    let value = env
                        .get_or_empty(&key)
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .to_string();
                    FormField::select(title, Some(value))
                        .options(UiAction::tokens())
                        .option_labels(UiAction::labels())
                } else {
                    FormField::text(title, env.get(&key))
                };
                config.insert(
                    key,
                    field
                        .enabling_options("UI_ACTION")
                        .div_class(DIV_CLASS)
                        .advanced(),
                );
            }

            config.insert(
                format!("{}__MIDI_CHAN", base),
                FormField::select("MIDI Channel", env.get(&format!("{}__MIDI_CHAN", base)))
                    .options(midi_channel_options())
                    .enabling_options("MIDI_CC MIDI_NOTE MIDI_PROG_CHANGE CVGATE_IN CVGATE_OUT")
                    .div_class(DIV_CLASS)
                    .advanced(),
            );
            config.insert(
                format!("{}__MIDI_NUM", base),
                FormField::select("MIDI Number", env.get(&format!("{}__MIDI_NUM", base)))
                    .options(midi_number_options())
                    .enabling_options("MIDI_CC MIDI_NOTE MIDI_PROG_CHANGE")
                    .div_class(DIV_CLASS)
                    .advanced(),
            );
            config.insert(
                format!("{}__MIDI_VAL", base),
                FormField::select(
                    "MIDI Value",
                    Some(env.get_or(&format!("{}__MIDI_VAL", base), "127")),
                )
                .options(midi_number_options())
                .enabling_options("MIDI_CC MIDI_NOTE CVGATE_IN")
                .div_class(DIV_CLASS)
                .advanced(),
            );
            config.insert(
                format!("{}__CV_CHAN", base),
                FormField::select("CV Channel", Some(cvchan.to_string()))
                    .options(["0", "1", "2", "3"])
                    .option_labels([("0", "1"), ("1", "2"), ("2", "3"), ("3", "4")])
                    .enabling_options("CVGATE_IN CVGATE_OUT")
                    .refresh_on_change()
                    .div_class(DIV_CLASS)
                    .advanced(),
            );
            separator(config, &format!("_SEP_SW_{}_", i));
        }

        (cvgate_in, cvgate_out)
    }

    /// Zynaptik analog input or output section
    ///
    /// Channels reserved by a CV/Gate switch are shown as such and keep a
    /// fixed hidden action.
    fn analog_fields(&self, config: &mut FormConfig, family: SlotFamily, reserved: &[usize]) {
        let (tag, heading, reserved_action) = match family {
            SlotFamily::ZynaptikAd => ("AD", "Zynaptik Analog Input", CustomSwitchAction::CvGateIn),
            _ => ("DA", "Zynaptik Analog Output", CustomSwitchAction::CvGateOut),
        };
        section(config, &format!("_SECTION_ZYNAPTIK_{}_", tag), heading);

        for i in 0..family.slot_count() {
            let base = family.base_name(i + 1);
            if reserved.contains(&i) {
                config.insert(
                    format!("_ZYNAPTIK_{}{:02}_", tag, i + 1),
                    FormField::html(format!(
                        "<label>{}-{} Action</label>: Reserved for CV/Gate<br>",
                        tag,
                        i + 1
                    ))
                    .advanced(),
                );
                config.insert(
                    base,
                    FormField::hidden(Some(reserved_action.as_str().to_string())).advanced(),
                );
            } else {
                self.sensor_fields(config, &base, &format!("{}-{} Action", tag, i + 1));
            }
            separator(config, &format!("_SEP_{}_{}_", tag, i));
        }
    }

    fn sensor_fields(&self, config: &mut FormConfig, base: &str, title: &str) {
        let env = self.env;
        config.insert(
            base.to_string(),
            FormField::select(title, env.get(base))
                .options(SensorAction::tokens())
                .option_labels(SensorAction::labels())
                .div_class(DIV_CLASS)
                .advanced(),
        );
        config.insert(
            format!("{}__MIDI_CHAN", base),
            FormField::select("Channel", env.get(&format!("{}__MIDI_CHAN", base)))
                .options(midi_channel_options())
                .enabling_options("MIDI_CC MIDI_PITCH_BEND MIDI_CHAN_PRESS")
                .div_class(DIV_CLASS)
                .advanced(),
        );
        config.insert(
            format!("{}__MIDI_NUM", base),
            FormField::select("Number", env.get(&format!("{}__MIDI_NUM", base)))
                .options(midi_number_options())
                .enabling_options("MIDI_CC")
                .div_class(DIV_CLASS)
                .advanced(),
        );
    }
}

fn section(config: &mut FormConfig, key: &str, heading: &str) {
    config.insert(
        key.to_string(),
        FormField::html(format!("<h3>{}</h3>", heading)).advanced(),
    );
}

fn separator(config: &mut FormConfig, key: &str) {
    config.insert(key.to_string(), FormField::html("<hr>").advanced());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldType;
    use zwc_common::MapEnv;

    fn build(env: &MapEnv, profile: &str) -> FormConfig {
        let profiles = ProfileCollection::new();
        WiringFormBuilder::new(env, profile, &profiles).build()
    }

    #[test]
    fn test_extra_switch_count() {
        assert_eq!(extra_switch_count("Z2_V2", ""), 32);
        assert_eq!(extra_switch_count("MCP23017_EXTRA", "100,103,108,111,106,107,114,115"), 4);
        assert_eq!(extra_switch_count("MCP23017_ENCODERS", "100,103,108,111"), 0);
        assert_eq!(extra_switch_count("PROTOTYPE-4", "1,2,3,4,5,6"), 2);
        assert_eq!(extra_switch_count("CUSTOM", ""), 0);
    }

    #[test]
    fn test_zyntof_count() {
        assert_eq!(zyntof_count(""), 0);
        assert_eq!(zyntof_count("2"), 2);
        assert_eq!(zyntof_count("9"), 4);
        assert_eq!(zyntof_count("two"), 0);
    }

    #[test]
    fn test_non_custom_kit_disables_options() {
        let env = MapEnv::new()
            .with("ZYNTHIAN_KIT_VERSION", "V4")
            .with(LAYOUT_KEY, "PROTOTYPE-4");
        let config = build(&env, "");
        assert_eq!(config.get_index_of("ZYNTHIAN_MESSAGE"), Some(0));
        assert!(config[LAYOUT_KEY].disabled);
        assert!(config["ZYNTHIAN_WIRING_ENCODER_A"].disabled);
    }

    #[test]
    fn test_custom_kit_has_no_message() {
        let env = MapEnv::new()
            .with("ZYNTHIAN_KIT_VERSION", "Custom")
            .with(LAYOUT_KEY, "PROTOTYPE-4");
        let config = build(&env, "");
        assert!(!config.contains_key("ZYNTHIAN_MESSAGE"));
        assert!(!config[LAYOUT_KEY].disabled);
        assert_eq!(config.keys().last().map(|k| k.as_str()), Some("_SPACER_"));
    }

    #[test]
    fn test_z2_hides_pins_and_uses_text_ui_actions() {
        let env = MapEnv::new().with(LAYOUT_KEY, "Z2_V2");
        let config = build(&env, "");
        assert_eq!(config["ZYNTHIAN_WIRING_ENCODER_A"].field_type, FieldType::Hidden);
        assert_eq!(config["ZYNTHIAN_WIRING_MCP23017_INTA_PIN"].field_type, FieldType::Hidden);
        assert!(config.contains_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_32"));
        assert!(!config.contains_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_33"));
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__UI_SHORT"].field_type,
            FieldType::Text
        );
    }

    #[test]
    fn test_ui_action_select_strips_parameters() {
        let env = MapEnv::new()
            .with(LAYOUT_KEY, "MCP23017_EXTRA")
            .with("ZYNTHIAN_WIRING_SWITCHES", "100,103,108,111,106,107,114,115")
            .with("ZYNTHIAN_WIRING_CUSTOM_SWITCH_02__UI_SHORT", "ZYNSWITCH 4 S");
        let config = build(&env, "");
        let field = &config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_02__UI_SHORT"];
        assert_eq!(field.field_type, FieldType::Select);
        assert_eq!(field.value.as_deref(), Some("ZYNSWITCH"));
        assert_eq!(field.enabling_options.as_deref(), Some("UI_ACTION"));
        assert!(!config.contains_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_05"));
    }

    #[test]
    fn test_selected_profile_switches_ui_actions_to_text() {
        let env = MapEnv::new()
            .with(LAYOUT_KEY, "MCP23017_EXTRA")
            .with("ZYNTHIAN_WIRING_SWITCHES", "100,103,108,111,106,107,114,115");
        let config = build(&env, "v4_stage");
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__UI_LONG"].field_type,
            FieldType::Text
        );
        assert_eq!(config[CUSTOM_PROFILE_KEY].value.as_deref(), Some("v4_stage"));
    }

    #[test]
    fn test_switch_defaults() {
        let env = MapEnv::new()
            .with(LAYOUT_KEY, "PROTOTYPE-4")
            .with("ZYNTHIAN_WIRING_SWITCHES", "1,2,3,4,5");
        let config = build(&env, "");
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__MIDI_VAL"].value.as_deref(),
            Some("127")
        );
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__CV_CHAN"].value.as_deref(),
            Some("1")
        );
        assert_eq!(config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01__MIDI_CHAN"].options.len(), 17);
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_01"].div_class.as_deref(),
            Some("col-sm-3")
        );
    }

    #[test]
    fn test_zynaptik_sections_and_cv_gate_reservation() {
        let env = MapEnv::new()
            .with(LAYOUT_KEY, "MCP23017_ZynScreen_Zynaptik")
            .with("ZYNTHIAN_WIRING_SWITCHES", "100,103,108,111,106,107,114,115")
            .with("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", "Zynaptik-2 (16xDIO + 4xAD + 4xDA)")
            .with("ZYNTHIAN_WIRING_CUSTOM_SWITCH_05", "CVGATE_IN")
            .with("ZYNTHIAN_WIRING_CUSTOM_SWITCH_05__CV_CHAN", "2")
            .with("ZYNTHIAN_WIRING_CUSTOM_SWITCH_06", "CVGATE_OUT")
            .with("ZYNTHIAN_WIRING_CUSTOM_SWITCH_06__CV_CHAN", "0");
        let config = build(&env, "");

        // 4 extra + 16 zynaptik switches
        assert!(config.contains_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_20"));
        assert!(!config.contains_key("ZYNTHIAN_WIRING_CUSTOM_SWITCH_21"));
        assert_eq!(
            config["ZYNTHIAN_WIRING_CUSTOM_SWITCH_05"].title.as_deref(),
            Some("Zynaptik Switch-1 Action")
        );

        let ad3 = &config["ZYNTHIAN_WIRING_ZYNAPTIK_AD03"];
        assert_eq!(ad3.field_type, FieldType::Hidden);
        assert_eq!(ad3.value.as_deref(), Some("CVGATE_IN"));
        assert!(config.contains_key("_ZYNAPTIK_AD03_"));
        assert!(!config.contains_key("ZYNTHIAN_WIRING_ZYNAPTIK_AD03__MIDI_CHAN"));
        assert_eq!(config["ZYNTHIAN_WIRING_ZYNAPTIK_AD01"].field_type, FieldType::Select);

        let da1 = &config["ZYNTHIAN_WIRING_ZYNAPTIK_DA01"];
        assert_eq!(da1.value.as_deref(), Some("CVGATE_OUT"));
        assert!(config.contains_key("_SECTION_ZYNAPTIK_DA_"));
    }

    #[test]
    fn test_zyntof_section() {
        let env = MapEnv::new()
            .with(LAYOUT_KEY, "MCP23017_ZynScreen")
            .with("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", "2");
        let config = build(&env, "");
        assert!(config.contains_key("_SECTION_ZYNTOF_"));
        assert!(config.contains_key("ZYNTHIAN_WIRING_ZYNTOF02__MIDI_NUM"));
        assert!(!config.contains_key("ZYNTHIAN_WIRING_ZYNTOF03"));
        assert_eq!(
            config["ZYNTHIAN_WIRING_ZYNTOF_CONFIG"].field_type,
            FieldType::Select
        );
    }

    #[test]
    fn test_profile_selector_lists_collection() {
        let env = MapEnv::new().with(LAYOUT_KEY, "DUMMIES");
        let mut profiles = ProfileCollection::new();
        profiles.insert(crate::wiring::store::Profile {
            name: "stage".to_string(),
            ..Default::default()
        });
        let config = WiringFormBuilder::new(&env, "stage", &profiles).build();
        let field = &config[CUSTOM_PROFILE_KEY];
        assert_eq!(field.options, vec!["".to_string(), "stage".to_string()]);
        assert!(field.presets.as_ref().unwrap().get("stage").is_some());
        assert_eq!(config[SAVEAS_FNAME_KEY].value.as_deref(), Some(""));
    }
}
