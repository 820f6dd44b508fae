//! Built-in wiring layouts
//!
//! Selecting a layout fills the encoder, switch and expander fields with the
//! values below. `CUSTOM` leaves every field as it is.

use indexmap::IndexMap;

type Preset = (&'static str, &'static [(&'static str, &'static str)]);

const Z2: &[(&str, &str)] = &[
    ("ZYNTHIAN_WIRING_ENCODER_A", ""),
    ("ZYNTHIAN_WIRING_ENCODER_B", ""),
    ("ZYNTHIAN_WIRING_SWITCHES", ""),
    ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", ""),
    ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", ""),
    ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
    ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
    ("ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE", "z2_v1"),
];

type GpioLayout = [(&'static str, &'static str); 7];

const V4_ENCODER_A: &str = "102,105,110,113";
const V4_ENCODER_B: &str = "101,104,109,112";
const V4_SWITCHES: &str = "100,103,108,111,106,107,114,115";
const ZYNAPTIK_2: &str = "Zynaptik-2 (16xDIO + 4xAD + 4xDA)";

const PROTOTYPE_5: GpioLayout = gpio("26,25,0,4", "21,27,7,3", "107,105,106,104");
const PROTOTYPE_4: GpioLayout = gpio("26,25,0,4", "21,27,7,3", "107,23,106,2");
const PROTOTYPE_4B: GpioLayout = gpio("25,26,4,0", "27,21,3,7", "23,107,2,106");
const PROTOTYPE_4_WS32: GpioLayout = gpio("26,25,5,4", "21,27,7,31", "107,23,106,6");
const PROTOTYPE_3: GpioLayout = gpio("27,21,3,7", "25,26,4,0", "107,23,106,2");
const PROTOTYPE_3H: GpioLayout = gpio("21,27,7,3", "26,25,0,4", "107,23,106,2");
const PROTOTYPE_2: GpioLayout = gpio("27,21,4,0", "25,26,3,7", "23,107,2,106");
const PROTOTYPE_1: GpioLayout = gpio("27,21,3,7", "25,26,4,0", "23,None,2,None");
const EMULATOR: GpioLayout = gpio("4,5,6,7", "8,9,10,11", "0,1,2,3");
const DUMMIES: GpioLayout = gpio("0,0,0,0", "0,0,0,0", "0,0,0,0");

/// Layout name → variable presets, in display order
const PRESETS: &[Preset] = &[
    ("Z2_V2", Z2),
    ("Z2_V1", Z2),
    (
        "MCP23017_ZynScreen_Zynface",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", V4_ENCODER_A),
            ("ZYNTHIAN_WIRING_ENCODER_B", V4_ENCODER_B),
            ("ZYNTHIAN_WIRING_SWITCHES", V4_SWITCHES),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "2"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "7"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ZYNAPTIK_2),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", "2"),
            ("ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE", "v4_studio"),
        ],
    ),
    (
        "MCP23017_ZynScreen_Zynaptik",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", V4_ENCODER_A),
            ("ZYNTHIAN_WIRING_ENCODER_B", V4_ENCODER_B),
            ("ZYNTHIAN_WIRING_SWITCHES", V4_SWITCHES),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "2"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "7"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ZYNAPTIK_2),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
            ("ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE", "v4_studio"),
        ],
    ),
    (
        "MCP23017_ZynScreen",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", V4_ENCODER_A),
            ("ZYNTHIAN_WIRING_ENCODER_B", V4_ENCODER_B),
            ("ZYNTHIAN_WIRING_SWITCHES", V4_SWITCHES),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "2"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "7"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
            ("ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE", "v4_studio"),
        ],
    ),
    (
        "MCP23017_EXTRA",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", V4_ENCODER_A),
            ("ZYNTHIAN_WIRING_ENCODER_B", V4_ENCODER_B),
            ("ZYNTHIAN_WIRING_SWITCHES", V4_SWITCHES),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "27"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "25"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
            ("ZYNTHIAN_WIRING_LAYOUT_CUSTOM_PROFILE", "v4_stage"),
        ],
    ),
    (
        "MCP23017_ENCODERS",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", V4_ENCODER_A),
            ("ZYNTHIAN_WIRING_ENCODER_B", V4_ENCODER_B),
            ("ZYNTHIAN_WIRING_SWITCHES", "100,103,108,111"),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "27"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "25"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
        ],
    ),
    (
        "MCP23017_EPDF",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", "103,100,111,108"),
            ("ZYNTHIAN_WIRING_ENCODER_B", "104,101,112,109"),
            ("ZYNTHIAN_WIRING_SWITCHES", "105,102,113,110,106,107,114,115"),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "27"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "25"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
        ],
    ),
    (
        "MCP23017_EPDF_REVERSE",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", "104,101,112,109"),
            ("ZYNTHIAN_WIRING_ENCODER_B", "103,100,111,108"),
            ("ZYNTHIAN_WIRING_SWITCHES", "105,102,113,110,106,107,114,115"),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "27"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "25"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
        ],
    ),
    ("PROTOTYPE-5", &PROTOTYPE_5),
    ("PROTOTYPE-4", &PROTOTYPE_4),
    ("PROTOTYPE-4B", &PROTOTYPE_4B),
    ("PROTOTYPE-4-WS32", &PROTOTYPE_4_WS32),
    ("PROTOTYPE-3", &PROTOTYPE_3),
    ("PROTOTYPE-3H", &PROTOTYPE_3H),
    ("PROTOTYPE-2", &PROTOTYPE_2),
    ("PROTOTYPE-1", &PROTOTYPE_1),
    (
        "I2C_HWC",
        &[
            ("ZYNTHIAN_WIRING_ENCODER_A", "1,2,3,4"),
            ("ZYNTHIAN_WIRING_ENCODER_B", "0,0,0,0"),
            ("ZYNTHIAN_WIRING_SWITCHES", "1,2,3,4"),
            ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", "7"),
            ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", "0"),
            ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
            ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
        ],
    ),
    ("EMULATOR", &EMULATOR),
    ("DUMMIES", &DUMMIES),
    ("CUSTOM", &[]),
];

/// Plain GPIO layout without expander interrupts or add-ons
const fn gpio(
    encoder_a: &'static str,
    encoder_b: &'static str,
    switches: &'static str,
) -> GpioLayout {
    [
        ("ZYNTHIAN_WIRING_ENCODER_A", encoder_a),
        ("ZYNTHIAN_WIRING_ENCODER_B", encoder_b),
        ("ZYNTHIAN_WIRING_SWITCHES", switches),
        ("ZYNTHIAN_WIRING_MCP23017_INTA_PIN", ""),
        ("ZYNTHIAN_WIRING_MCP23017_INTB_PIN", ""),
        ("ZYNTHIAN_WIRING_ZYNAPTIK_CONFIG", ""),
        ("ZYNTHIAN_WIRING_ZYNTOF_CONFIG", ""),
    ]
}

/// Layout names in display order
pub fn layout_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// Variables set by `layout`, or `None` for an unknown layout
pub fn preset(layout: &str) -> Option<IndexMap<&'static str, &'static str>> {
    PRESETS
        .iter()
        .find(|(name, _)| *name == layout)
        .map(|(_, vars)| vars.iter().copied().collect())
}

/// Every layout with its variables, as handed to the layout selector
pub fn all_presets() -> IndexMap<&'static str, IndexMap<&'static str, &'static str>> {
    PRESETS
        .iter()
        .map(|(name, vars)| (*name, vars.iter().copied().collect()))
        .collect()
}
