//! Parameter schemas and value sets.
//!
//! Every primitive operation and every meta-operation declares its parameters
//! as a static slice of [`ParamSpec`]. A [`ParamSpec`] carries everything the
//! host needs to present and validate a parameter:
//!
//! - name and label, plus an optional description
//! - [`ParamKind`] and default value
//! - a numeric `[min, max]` range used for clamping
//! - UI hints (step sizes, displayed digits) that this layer never interprets
//!
//! A [`ParamSet`] holds the current values for one schema, initialized from
//! the defaults. Writes go through [`ParamSpec::accept`], which checks the kind
//! and clamps into range.
//!
//! # Example
//!
//! ```rust
//! use prism_core::{ParamSet, ParamSpec, ParamValue};
//!
//! static SCHEMA: &[ParamSpec] = &[
//!     ParamSpec::double("zoom", "Zoom", 0.0).with_range(-100.0, 100.0),
//!     ParamSpec::boolean("invert", "Invert", false),
//! ];
//!
//! let mut params = ParamSet::new(SCHEMA);
//! params.set("zoom", ParamValue::Double(250.0)).unwrap();
//! assert_eq!(params.get("zoom"), Some(ParamValue::Double(100.0)));
//! ```

use thiserror::Error;

use crate::value::{ParamKind, ParamValue};

/// Why a parameter write was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamRejection {
    /// The schema has no parameter with this name.
    #[error("not declared in the schema")]
    Unknown,
    /// The value's kind does not match the declared kind.
    #[error("expected {expected}, got {found}")]
    KindMismatch {
        /// Declared kind.
        expected: ParamKind,
        /// Kind of the offered value.
        found: ParamKind,
    },
    /// A double parameter was offered NaN or an infinity.
    #[error("value is not finite")]
    NotFinite,
}

/// Describes a single parameter: identity, type, default, range and UI hints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable identifier used for lookup, redirection and persistence.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Longer description for tooltips. Empty when not provided.
    pub description: &'static str,
    /// Declared type.
    pub kind: ParamKind,
    /// Value a fresh [`ParamSet`] starts with.
    pub default: ParamValue,
    /// Lower bound for numeric kinds.
    pub min: f64,
    /// Upper bound for numeric kinds.
    pub max: f64,
    /// Small and large UI step increments.
    pub ui_steps: (f64, f64),
    /// Number of digits a UI should display, if specified.
    pub ui_digits: Option<u8>,
}

impl ParamSpec {
    /// Unbounded double parameter.
    pub const fn double(name: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            name,
            label,
            description: "",
            kind: ParamKind::Double,
            default: ParamValue::Double(default),
            min: f64::MIN,
            max: f64::MAX,
            ui_steps: (0.1, 1.0),
            ui_digits: None,
        }
    }

    /// Unbounded integer parameter.
    pub const fn int(name: &'static str, label: &'static str, default: i64) -> Self {
        Self {
            name,
            label,
            description: "",
            kind: ParamKind::Int,
            default: ParamValue::Int(default),
            min: i64::MIN as f64,
            max: i64::MAX as f64,
            ui_steps: (1.0, 10.0),
            ui_digits: Some(0),
        }
    }

    /// Boolean toggle.
    pub const fn boolean(name: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            name,
            label,
            description: "",
            kind: ParamKind::Bool,
            default: ParamValue::Bool(default),
            min: 0.0,
            max: 1.0,
            ui_steps: (1.0, 1.0),
            ui_digits: None,
        }
    }

    /// Sets the valid range.
    ///
    /// Call after a constructor.
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the UI step increments.
    pub const fn with_ui_steps(mut self, small: f64, big: f64) -> Self {
        self.ui_steps = (small, big);
        self
    }

    /// Sets the number of digits shown by a UI.
    pub const fn with_ui_digits(mut self, digits: u8) -> Self {
        self.ui_digits = Some(digits);
        self
    }

    /// Sets the description.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Returns `true` if the range is narrower than the kind's natural range.
    pub fn is_bounded(&self) -> bool {
        match self.kind {
            ParamKind::Double => self.min > f64::MIN || self.max < f64::MAX,
            ParamKind::Int => self.min > i64::MIN as f64 || self.max < i64::MAX as f64,
            ParamKind::Bool => false,
        }
    }

    /// Clamps a number to this parameter's range.
    ///
    /// ```rust
    /// use prism_core::ParamSpec;
    ///
    /// let spec = ParamSpec::double("amount", "Amount", 2.0).with_range(0.0, 20.0);
    /// assert_eq!(spec.clamp(-1.0), 0.0);
    /// assert_eq!(spec.clamp(7.5), 7.5);
    /// assert_eq!(spec.clamp(25.0), 20.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Validates a value for this parameter.
    ///
    /// Integers are widened for double parameters. Numeric values are clamped
    /// into `[min, max]`. Any other kind mismatch is refused.
    pub fn accept(&self, value: ParamValue) -> Result<ParamValue, ParamRejection> {
        match (self.kind, value) {
            (ParamKind::Double, ParamValue::Double(v)) => {
                if v.is_finite() {
                    Ok(ParamValue::Double(self.clamp(v)))
                } else {
                    Err(ParamRejection::NotFinite)
                }
            }
            (ParamKind::Double, ParamValue::Int(v)) => Ok(ParamValue::Double(self.clamp(v as f64))),
            (ParamKind::Int, ParamValue::Int(v)) => {
                // Same order as `clamp`, which tolerates an inverted range.
                let (min, max) = (self.min as i64, self.max as i64);
                let v = if v < min {
                    min
                } else if v > max {
                    max
                } else {
                    v
                };
                Ok(ParamValue::Int(v))
            }
            (ParamKind::Bool, ParamValue::Bool(v)) => Ok(ParamValue::Bool(v)),
            (expected, found) => Err(ParamRejection::KindMismatch {
                expected,
                found: found.kind(),
            }),
        }
    }
}

/// Current values for a parameter schema.
///
/// Values are stored in schema order; lookups are linear, which is fine for
/// the handful of parameters an operation declares.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    schema: &'static [ParamSpec],
    values: Vec<ParamValue>,
}

impl ParamSet {
    /// Creates a set holding every parameter's default.
    pub fn new(schema: &'static [ParamSpec]) -> Self {
        Self {
            schema,
            values: schema.iter().map(|spec| spec.default).collect(),
        }
    }

    /// Returns the schema this set was built from.
    pub fn schema(&self) -> &'static [ParamSpec] {
        self.schema
    }

    /// Finds a parameter's spec by name.
    pub fn spec(&self, name: &str) -> Option<&'static ParamSpec> {
        self.schema.iter().find(|spec| spec.name == name)
    }

    /// Returns `true` if the schema declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.spec(name).is_some()
    }

    /// Returns the current value of `name`.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        let index = self.schema.iter().position(|spec| spec.name == name)?;
        Some(self.values[index])
    }

    /// Returns a boolean parameter's value, or `None` if missing or not a boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    /// Returns a numeric parameter's value as a double.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_f64())
    }

    /// Validates and stores a value.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<bool, ParamRejection> {
        let index = self
            .schema
            .iter()
            .position(|spec| spec.name == name)
            .ok_or(ParamRejection::Unknown)?;
        let accepted = self.schema[index].accept(value)?;
        let changed = self.values[index] != accepted;
        self.values[index] = accepted;
        Ok(changed)
    }

    /// Restores every parameter to its default.
    pub fn reset(&mut self) {
        for (slot, spec) in self.values.iter_mut().zip(self.schema) {
            *slot = spec.default;
        }
    }

    /// Iterates over `(spec, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static ParamSpec, ParamValue)> + '_ {
        self.schema.iter().zip(self.values.iter().copied())
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the schema declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
