//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use prism_config::{Preset, find_preset as config_find_preset, get_factory_preset};
use prism_core::ParamValue;
use prism_meta::OperationWrapper;
use prism_registry::OperationRegistry;

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, ParamValue), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected key=value)"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing parameter name in '{s}'"));
    }
    Ok((key.to_string(), parse_value(raw)?))
}

/// Parse a literal as a boolean, integer or double, in that order.
///
/// Integers written into double parameters are widened by the schema, so
/// `distortion_zoom=4` works as well as `distortion_zoom=4.0`.
pub fn parse_value(raw: &str) -> Result<ParamValue, String> {
    let raw = raw.trim();
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => return Ok(ParamValue::Bool(true)),
        "false" | "off" | "no" => return Ok(ParamValue::Bool(false)),
        _ => {}
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(ParamValue::Int(v));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(ParamValue::Double(v)),
        _ => Err(format!("Invalid value: '{raw}' (expected a number or true/false)")),
    }
}

/// Load a preset by name or path.
///
/// Searches in this order:
/// 1. Factory presets (by key or name)
/// 2. User presets (by file stem)
/// 3. File path
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = config_find_preset(name) {
        return Preset::load(&path).with_context(|| format!("loading {}", path.display()));
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return Preset::load(&path).with_context(|| format!("loading {}", path.display()));
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'prism presets list' to see available presets.",
        name
    )
}

/// Create and attach a wrapper, apply an optional preset, then overrides.
pub fn build_wrapper(
    operation: &str,
    preset: Option<&Preset>,
    overrides: &[(String, ParamValue)],
) -> anyhow::Result<OperationWrapper> {
    let mut wrapper = prism_ops::create(operation).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown operation: {}. Use 'prism ops' to list meta-operations.",
            operation
        )
    })?;
    wrapper.attach(OperationRegistry::global())?;

    if let Some(preset) = preset {
        preset.apply(&mut wrapper)?;
        tracing::debug!(preset = %preset.name, "applied preset");
    }

    if !overrides.is_empty() {
        let values: Vec<(&str, ParamValue)> = overrides
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        wrapper.set_many(&values)?;
    }

    Ok(wrapper)
}
