//! Preset file format and operations.

use std::collections::BTreeMap;
use std::path::Path;

use prism_core::ParamValue;
use prism_meta::OperationWrapper;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation;

/// Saved exposed-parameter values for one meta-operation.
///
/// Only exposed values are persisted; the sub-graph is rebuilt from them on
/// attach.
///
/// # TOML Format
///
/// ```toml
/// name = "Red Shift"
/// operation = "prism:chromatic-aberration"
/// description = "Only the red channel is offset"
///
/// [params]
/// red_channel = true
/// green_channel = false
/// blue_channel = false
/// distortion_zoom = 6.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Meta-operation the values belong to.
    pub operation: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Exposed parameter values. Parameters not listed keep their defaults.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl Preset {
    /// Create a new preset with no values.
    pub fn new(name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operation: operation.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Capture every current exposed value of a wrapper.
    pub fn capture(name: impl Into<String>, wrapper: &OperationWrapper) -> Self {
        let mut preset = Self::new(name, wrapper.name());
        for (spec, value) in wrapper.values().iter() {
            preset.params.insert(spec.name.to_string(), value);
        }
        preset
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the operation exists and every value fits its schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let operation = validation::validate_operation(&self.operation)?;
        validation::validate_params(operation.as_ref(), &self.params)?;
        Ok(())
    }

    /// Write the values into a wrapper, then run its update once.
    ///
    /// Values are clamped like any other write. Nothing is written if the
    /// preset belongs to another operation.
    pub fn apply(&self, wrapper: &mut OperationWrapper) -> Result<(), ConfigError> {
        if self.operation != wrapper.name() {
            return Err(ConfigError::OperationMismatch {
                preset: self.name.clone(),
                expected: self.operation.clone(),
                found: wrapper.name().to_string(),
            });
        }
        let values: Vec<(&str, ParamValue)> = self
            .params
            .iter()
            .map(|(name, &value)| (name.as_str(), value))
            .collect();
        wrapper.set_many(&values)?;
        Ok(())
    }

    /// Get one stored value.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).copied()
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the preset stores no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
