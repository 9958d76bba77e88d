//! Primitive operation registry for prism meta-operations.
//!
//! This crate provides the catalog meta-operations instantiate their child
//! nodes from. Each entry describes a host primitive by name: its category,
//! its input ports, and its typed parameter schema. Instantiation validates
//! initial parameters against that schema, so a misspelled parameter fails
//! while the graph is being built rather than when the host evaluates it.
//!
//! # Features
//!
//! - **Discovery**: List all primitives with metadata
//! - **Factory**: Instantiate a primitive by name with initial parameters
//! - **Category System**: Primitives organized by kind (color, blend, ...)
//! - **Process-wide catalog**: [`OperationRegistry::global()`] is built once and
//!   read-only afterwards
//!
//! # Example
//!
//! ```rust
//! use prism_registry::{OperationRegistry, OperationCategory};
//! use prism_core::ParamValue;
//!
//! let registry = OperationRegistry::global();
//!
//! let mixer = registry
//!     .create("prism:channel-mixer", &[("gg-gain", 0.0.into()), ("bb-gain", 0.0.into())])
//!     .unwrap();
//! assert_eq!(mixer.params().get("gg-gain"), Some(ParamValue::Double(0.0)));
//!
//! for op in registry.in_category(OperationCategory::Blend) {
//!     println!("{}: {}", op.name, op.description);
//! }
//! ```

mod catalog;

use std::sync::OnceLock;

use prism_core::{GraphError, ParamSet, ParamSpec, ParamValue, Port, Primitive};

/// Category of primitive operation for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    /// Channel and tone manipulation (mixers, inversion, thresholds).
    Color,
    /// Geometric distortion.
    Distort,
    /// Two-input compositing modes.
    Blend,
    /// Per-channel arithmetic between input and aux.
    Arithmetic,
    /// Alpha manipulation.
    Transparency,
    /// Stylized color effects.
    Artistic,
    /// Plumbing (pass-through and the like).
    Utility,
}

impl OperationCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            OperationCategory::Color => "Color",
            OperationCategory::Distort => "Distort",
            OperationCategory::Blend => "Blend",
            OperationCategory::Arithmetic => "Arithmetic",
            OperationCategory::Transparency => "Transparency",
            OperationCategory::Artistic => "Artistic",
            OperationCategory::Utility => "Utility",
        }
    }
}

/// Describes a primitive operation in the registry.
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    /// Unique namespaced identifier (e.g. `"prism:alien-map"`, `"svg:src"`).
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Category for organization.
    pub category: OperationCategory,
    /// Input ports. Every primitive has exactly one output.
    pub ports: &'static [Port],
    /// Parameter schema.
    pub params: &'static [ParamSpec],
}

impl OperationDescriptor {
    /// Returns `true` if the operation takes an aux input.
    pub fn has_aux(&self) -> bool {
        self.ports.contains(&Port::Aux)
    }
}

/// Registry of primitive operations.
///
/// Populate it once (built-ins via [`new()`](Self::new), host extras via
/// [`register()`](Self::register)), then share it immutably.
pub struct OperationRegistry {
    entries: Vec<OperationDescriptor>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationRegistry {
    /// Creates a registry with all built-in primitives registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for descriptor in catalog::builtin() {
            registry.register(descriptor);
        }
        registry
    }

    /// Creates a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the process-wide registry of built-in primitives.
    pub fn global() -> &'static OperationRegistry {
        static GLOBAL: OnceLock<OperationRegistry> = OnceLock::new();
        GLOBAL.get_or_init(OperationRegistry::new)
    }

    /// Registers a primitive.
    ///
    /// Returns `false` and leaves the registry unchanged if the name is taken.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> bool {
        if self.contains(descriptor.name) {
            return false;
        }
        self.entries.push(descriptor);
        true
    }

    /// Returns descriptors for all registered primitives.
    pub fn all(&self) -> &[OperationDescriptor] {
        &self.entries
    }

    /// Returns descriptors for primitives in a specific category.
    pub fn in_category(&self, category: OperationCategory) -> Vec<&OperationDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Gets a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&OperationDescriptor> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Instantiates a primitive with initial parameter values.
    ///
    /// Parameters not mentioned keep their schema defaults. Values are checked
    /// and clamped by the schema.
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownOperation`] if `name` is not registered
    /// - [`GraphError::InvalidParameter`] if a key is not in the schema or its
    ///   value has the wrong kind
    pub fn create(
        &self,
        name: &str,
        initial: &[(&str, ParamValue)],
    ) -> Result<Primitive, GraphError> {
        let descriptor = self.get(name).ok_or_else(|| GraphError::UnknownOperation {
            operation: name.to_string(),
        })?;

        let mut params = ParamSet::new(descriptor.params);
        for &(key, value) in initial {
            params
                .set(key, value)
                .map_err(|reason| GraphError::InvalidParameter {
                    owner: descriptor.name.to_string(),
                    param: key.to_string(),
                    reason,
                })?;
        }
        Ok(Primitive::new(descriptor.name, descriptor.ports, params))
    }

    /// Returns the number of registered primitives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::ParamRejection;

    #[test]
    fn test_registry_creation() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.len(), 12);
        assert!(!registry.is_empty());
        assert!(OperationRegistry::empty().is_empty());
    }

    #[test]
    fn test_get_operation() {
        let registry = OperationRegistry::new();

        let lens = registry.get("prism:lens-distortion").unwrap();
        assert_eq!(lens.title, "Lens Distortion");
        assert_eq!(lens.category, OperationCategory::Distort);
        assert!(!lens.has_aux());

        assert!(registry.get("prism:does-not-exist").is_none());
    }

    #[test]
    fn test_create_with_defaults() {
        let registry = OperationRegistry::new();
        let mixer = registry.create("prism:channel-mixer", &[]).unwrap();
        assert_eq!(mixer.operation(), "prism:channel-mixer");
        assert_eq!(mixer.ports(), &[Port::Input]);
        assert_eq!(mixer.params().get_f64("rr-gain"), Some(1.0));
        assert_eq!(mixer.params().get_f64("rg-gain"), Some(0.0));
    }

    #[test]
    fn test_create_with_initial_params() {
        let registry = OperationRegistry::new();
        let alien = registry
            .create(
                "prism:alien-map",
                &[
                    ("cpn-1-frequency", 1.0.into()),
                    ("cpn-2-frequency", 1.0.into()),
                    ("color-model", 1.into()),
                ],
            )
            .unwrap();
        assert_eq!(alien.params().get("color-model"), Some(ParamValue::Int(1)));

        // Integers widen into double parameters.
        let saturation = registry
            .create("prism:saturation", &[("scale", 0.into())])
            .unwrap();
        assert_eq!(
            saturation.params().get("scale"),
            Some(ParamValue::Double(0.0))
        );
    }

    #[test]
    fn test_unknown_operation() {
        let registry = OperationRegistry::new();
        assert_eq!(
            registry.create("prism:blur", &[]).unwrap_err(),
            GraphError::UnknownOperation {
                operation: "prism:blur".to_string(),
            }
        );
    }

    #[test]
    fn test_out_of_schema_key() {
        let registry = OperationRegistry::new();
        let err = registry
            .create("prism:lens-distortion", &[("zooom", 1.0.into())])
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidParameter {
                owner: "prism:lens-distortion".to_string(),
                param: "zooom".to_string(),
                reason: ParamRejection::Unknown,
            }
        );
    }

    #[test]
    fn test_wrong_kind_initial_value() {
        let registry = OperationRegistry::new();
        let err = registry
            .create("svg:src", &[("srgb", 1.0.into())])
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = OperationRegistry::new();
        let nop = *registry.get("prism:nop").unwrap();
        assert!(!registry.register(nop));
        assert_eq!(registry.len(), 12);

        assert!(registry.register(OperationDescriptor {
            name: "host:gaussian-blur",
            title: "Gaussian Blur",
            description: "Host-provided blur",
            category: OperationCategory::Utility,
            ports: &[Port::Input],
            params: &[],
        }));
        assert!(registry.contains("host:gaussian-blur"));
    }

    #[test]
    fn test_operations_by_category() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.in_category(OperationCategory::Blend).len(), 3);
        assert_eq!(registry.in_category(OperationCategory::Color).len(), 4);
        assert_eq!(registry.in_category(OperationCategory::Distort).len(), 1);
    }

    #[test]
    fn test_all_operations_can_be_created() {
        let registry = OperationRegistry::global();
        for descriptor in registry.all() {
            let primitive = registry.create(descriptor.name, &[]);
            assert!(primitive.is_ok(), "failed to create {}", descriptor.name);
            assert_eq!(
                primitive.unwrap().params().len(),
                descriptor.params.len(),
                "{} lost parameters",
                descriptor.name
            );
        }
    }

    #[test]
    fn test_schema_defaults_within_range() {
        for descriptor in OperationRegistry::new().all() {
            for spec in descriptor.params {
                assert_eq!(
                    spec.accept(spec.default),
                    Ok(spec.default),
                    "{}.{} default out of range",
                    descriptor.name,
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_category_names() {
        assert_eq!(OperationCategory::Blend.name(), "Blend");
        assert_eq!(OperationCategory::Artistic.name(), "Artistic");
    }
}
