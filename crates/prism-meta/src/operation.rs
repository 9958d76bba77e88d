//! The trait every meta-operation implements.

use prism_core::{GraphError, ParamSpec};

use crate::builder::MetaBuilder;

/// Static metadata the host shows for a meta-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaInfo {
    /// Unique namespaced name (e.g. `"prism:chromatic-aberration"`).
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Host menu categories.
    pub categories: &'static [&'static str],
}

/// An operation implemented as a sub-graph of primitives.
///
/// Implementors declare their exposed parameters and describe, once, how to
/// build the sub-graph: which children to create, which exposed parameters
/// redirect where, and which boolean parameters switch which edges. The
/// [`OperationWrapper`](crate::OperationWrapper) drives the lifecycle.
pub trait MetaOperation {
    /// Name, title and categories.
    fn info(&self) -> MetaInfo;

    /// Exposed parameter schema, in presentation order.
    fn params(&self) -> &'static [ParamSpec];

    /// Builds children, fixed edges, redirections and toggle rules.
    ///
    /// Called at most once per wrapper.
    fn attach(&self, builder: &mut MetaBuilder<'_>) -> Result<(), GraphError>;
}
