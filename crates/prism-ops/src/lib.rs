//! Built-in prism meta-operations.
//!
//! - [`ChromaticAberration`] - per-channel lens-zoom offset
//! - [`HolographicEffect`] - alien-map foil look with shadow and light masks
//!
//! Every operation here is a [`MetaOperation`]: wrap it in an
//! [`OperationWrapper`] and attach it against the primitive registry.
//!
//! ## Example
//!
//! ```rust
//! use prism_registry::OperationRegistry;
//!
//! let mut op = prism_ops::create("prism:chromatic-aberration").unwrap();
//! op.attach(OperationRegistry::global()).unwrap();
//! op.set("red_channel", true.into()).unwrap();
//! op.update().unwrap();
//! ```

pub mod chromatic;
pub mod holographic;

pub use chromatic::ChromaticAberration;
pub use holographic::HolographicEffect;

use prism_meta::{MetaInfo, MetaOperation, OperationWrapper};

/// Returns one instance of every built-in meta-operation.
pub fn all() -> Vec<Box<dyn MetaOperation>> {
    vec![Box::new(ChromaticAberration), Box::new(HolographicEffect)]
}

/// Metadata for every built-in meta-operation, in catalog order.
pub fn infos() -> Vec<MetaInfo> {
    all().iter().map(|op| op.info()).collect()
}

/// Looks up a built-in meta-operation by name.
pub fn find(name: &str) -> Option<Box<dyn MetaOperation>> {
    all().into_iter().find(|op| op.info().name == name)
}

/// Creates an unattached wrapper for the named meta-operation.
pub fn create(name: &str) -> Option<OperationWrapper> {
    find(name).map(OperationWrapper::from_box)
}
