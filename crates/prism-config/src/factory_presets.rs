//! Factory presets bundled with prism.
//!
//! Built-in starting points for each meta-operation, always available
//! without external files.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "all_channels",
    "red_shift",
    "inverted_foil",
    "soft_rainbow",
];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("all_channels", ALL_CHANNELS_PRESET),
    ("red_shift", RED_SHIFT_PRESET),
    ("inverted_foil", INVERTED_FOIL_PRESET),
    ("soft_rainbow", SOFT_RAINBOW_PRESET),
];

const ALL_CHANNELS_PRESET: &str = r#"
name = "All Channels"
operation = "prism:chromatic-aberration"
description = "Every channel offset by a strong zoom"

[params]
red_channel = true
green_channel = true
blue_channel = true
distortion_zoom = 4.0
"#;

const RED_SHIFT_PRESET: &str = r#"
name = "Red Shift"
operation = "prism:chromatic-aberration"
description = "Only the red channel is offset"

[params]
red_channel = true
green_channel = false
blue_channel = false
distortion_zoom = 6.0
"#;

const INVERTED_FOIL_PRESET: &str = r#"
name = "Inverted Foil"
operation = "prism:holographic-effect"
description = "Inverted metal with a heavy sheen"

[params]
invert = true
metallic_effect = 3.0
shadow_opacity = 0.8
"#;

const SOFT_RAINBOW_PRESET: &str = r#"
name = "Soft Rainbow"
operation = "prism:holographic-effect"
description = "Low-frequency rainbow with faint highlights"

[params]
red_frequency = 2.0
green_frequency = 1.5
blue_frequency = 1.0
light_opacity = 0.3
"#;

/// Get all factory presets.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by key or display name, case-insensitively.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let wanted = name.to_lowercase();
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(key, toml)| Some((*key, Preset::from_toml(toml).ok()?)))
        .find(|(key, preset)| *key == wanted || preset.name.to_lowercase() == wanted)
        .map(|(_, preset)| preset)
}

/// Get the list of factory preset names.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// Check if a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

/// Factory presets for one operation.
pub fn factory_presets_for(operation: &str) -> Vec<Preset> {
    factory_presets()
        .into_iter()
        .filter(|p| p.operation == operation)
        .collect()
}
