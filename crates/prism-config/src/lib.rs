//! Preset management for prism meta-operations.
//!
//! A preset stores the exposed parameter values of one meta-operation in a
//! TOML file. Presets are validated against the operation's schema and
//! applied to an [`OperationWrapper`](prism_meta::OperationWrapper) like any
//! other batch of writes.
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Check operation names, parameter names, kinds and ranges
//! - **Paths**: Platform-specific user preset directory
//! - **Factory Presets**: Built-in presets for each meta-operation
//!
//! # Example
//!
//! ```rust,no_run
//! use prism_config::{Preset, user_presets_dir};
//!
//! let preset = Preset::new("Red Shift", "prism:chromatic-aberration")
//!     .with_description("Only the red channel is offset")
//!     .with_param("red_channel", true)
//!     .with_param("green_channel", false)
//!     .with_param("distortion_zoom", 6.0);
//! preset.validate().unwrap();
//!
//! let path = user_presets_dir().join("red_shift.toml");
//! preset.save(&path).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, factory_presets_for,
    get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_presets_dir,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, validate_operation, validate_params, validate_value,
};
