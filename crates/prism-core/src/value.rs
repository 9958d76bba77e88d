//! Typed parameter values.
//!
//! Every parameter in the system, exposed or internal, holds a [`ParamValue`].
//! The set of kinds is deliberately small: the host's property system only
//! needs doubles, integers and booleans for the operations composed here.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The type of a parameter, independent of its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// 64-bit floating point value.
    Double,
    /// Signed integer value (enumerations, counts).
    Int,
    /// Boolean toggle.
    Bool,
}

impl ParamKind {
    /// Returns the lowercase name used in messages and schema dumps.
    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::Double => "double",
            ParamKind::Int => "int",
            ParamKind::Bool => "boolean",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameter value.
///
/// Serialized untagged so that presets read naturally in TOML:
/// `zoom = 2.5`, `invert = true`, `color-model = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean toggle.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Double(f64),
}

impl ParamValue {
    /// Returns the kind of this value.
    pub const fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Double(_) => ParamKind::Double,
        }
    }

    /// Returns the value as a double, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Double(v) => Some(v),
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Bool(_) => None,
        }
    }

    /// Returns the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as an integer. Doubles are not narrowed.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Double(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Double(f64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}
