//! Preset validation against a meta-operation's exposed schema.
//!
//! Applying a preset is lenient: numeric values are clamped into range the
//! same way the wrapper clamps any other write. Validation is strict and
//! reports every problem at once, so a hand-edited preset file can be fixed
//! in one pass.
//!
//! # Example
//!
//! ```rust
//! use prism_config::{validate_params, ValidationError};
//! use prism_core::ParamValue;
//! use std::collections::BTreeMap;
//!
//! let op = prism_ops::find("prism:chromatic-aberration").unwrap();
//! let mut params = BTreeMap::new();
//! params.insert("distortion_zoom".to_string(), ParamValue::Double(40.0));
//!
//! let err = validate_params(op.as_ref(), &params).unwrap_err();
//! assert!(matches!(err, ValidationError::OutOfRange { .. }));
//! ```

use std::collections::BTreeMap;

use prism_core::{ParamKind, ParamRejection, ParamSpec, ParamValue};
use prism_meta::MetaOperation;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// No built-in meta-operation has this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Unknown parameter name.
    #[error("unknown parameter '{param}' for operation '{operation}'")]
    UnknownParameter {
        /// Name of the operation.
        operation: String,
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Value of the wrong kind.
    #[error("parameter '{param}' expects {expected}, got {found}")]
    KindMismatch {
        /// Name of the parameter.
        param: String,
        /// Declared kind.
        expected: ParamKind,
        /// Kind of the supplied value.
        found: ParamKind,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// NaN or infinite value.
    #[error("parameter '{param}' is not finite")]
    NotFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks one value against its spec without clamping.
pub fn validate_value(spec: &ParamSpec, value: ParamValue) -> ValidationResult<()> {
    match spec.accept(value) {
        Err(ParamRejection::KindMismatch { expected, found }) => {
            return Err(ValidationError::KindMismatch {
                param: spec.name.to_string(),
                expected,
                found,
            });
        }
        Err(ParamRejection::NotFinite) => {
            return Err(ValidationError::NotFinite {
                param: spec.name.to_string(),
            });
        }
        Err(ParamRejection::Unknown) | Ok(_) => {}
    }

    if spec.is_bounded()
        && let Some(v) = value.as_f64()
        && (v < spec.min || v > spec.max)
    {
        return Err(ValidationError::OutOfRange {
            param: spec.name.to_string(),
            value: v,
            min: spec.min,
            max: spec.max,
        });
    }
    Ok(())
}

/// Validates a parameter map against an operation's exposed schema.
///
/// Returns the single error if there is one, [`ValidationError::Multiple`]
/// otherwise.
pub fn validate_params(
    operation: &dyn MetaOperation,
    params: &BTreeMap<String, ParamValue>,
) -> ValidationResult<()> {
    let schema = operation.params();
    let mut errors = Vec::new();

    for (name, &value) in params {
        match schema.iter().find(|spec| spec.name == name) {
            Some(spec) => {
                if let Err(err) = validate_value(spec, value) {
                    errors.push(err);
                }
            }
            None => errors.push(ValidationError::UnknownParameter {
                operation: operation.info().name.to_string(),
                param: name.clone(),
            }),
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Resolves a built-in operation by name.
pub fn validate_operation(name: &str) -> ValidationResult<Box<dyn MetaOperation>> {
    prism_ops::find(name).ok_or_else(|| ValidationError::UnknownOperation(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromatic() -> Box<dyn MetaOperation> {
        validate_operation("prism:chromatic-aberration").unwrap()
    }

    fn params(entries: &[(&str, ParamValue)]) -> BTreeMap<String, ParamValue> {
        entries
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn accepts_valid_values() {
        let p = params(&[
            ("red_channel", true.into()),
            ("distortion_zoom", 7.0.into()),
        ]);
        assert_eq!(validate_params(chromatic().as_ref(), &p), Ok(()));
    }

    #[test]
    fn integer_for_double_is_valid() {
        let p = params(&[("distortion_zoom", 3.into())]);
        assert_eq!(validate_params(chromatic().as_ref(), &p), Ok(()));
    }

    #[test]
    fn reports_unknown_parameter() {
        let p = params(&[("zoom", 1.0.into())]);
        assert_eq!(
            validate_params(chromatic().as_ref(), &p),
            Err(ValidationError::UnknownParameter {
                operation: "prism:chromatic-aberration".to_string(),
                param: "zoom".to_string(),
            })
        );
    }

    #[test]
    fn reports_kind_mismatch() {
        let p = params(&[("red_channel", 1.0.into())]);
        assert_eq!(
            validate_params(chromatic().as_ref(), &p),
            Err(ValidationError::KindMismatch {
                param: "red_channel".to_string(),
                expected: ParamKind::Bool,
                found: ParamKind::Double,
            })
        );
    }

    #[test]
    fn reports_out_of_range_and_non_finite() {
        let spec = chromatic().params()[3];
        assert!(matches!(
            validate_value(&spec, ParamValue::Double(-1.0)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            validate_value(&spec, ParamValue::Double(f64::NAN)),
            Err(ValidationError::NotFinite {
                param: "distortion_zoom".to_string()
            })
        );
    }

    #[test]
    fn collects_multiple_errors() {
        let p = params(&[
            ("blue_channel", 2.into()),
            ("distortion_zoom", 99.0.into()),
            ("volume", 1.0.into()),
        ]);
        match validate_params(chromatic().as_ref(), &p) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn unknown_operation() {
        assert!(matches!(
            validate_operation("prism:sepia"),
            Err(ValidationError::UnknownOperation(name)) if name == "prism:sepia"
        ));
    }
}
