//! Errors surfaced to the host by an operation wrapper.

use prism_core::GraphError;
use thiserror::Error;

/// A meta-operation failed to build or rewire its graph.
///
/// Carries the operation's name so the host can report which instance broke;
/// the underlying [`GraphError`] names the node or parameter at fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// A graph, registry or redirection call failed.
    #[error("operation '{operation}': {source}")]
    Graph {
        /// Name of the failing meta-operation.
        operation: &'static str,
        /// What went wrong.
        #[source]
        source: GraphError,
    },

    /// An earlier `attach` failed; the half-built graph is never reused.
    #[error("operation '{operation}' failed to attach and cannot be used")]
    Poisoned {
        /// Name of the failed meta-operation.
        operation: &'static str,
    },
}

impl OperationError {
    /// Wraps a graph error with the operation's name.
    pub fn graph(operation: &'static str, source: GraphError) -> Self {
        OperationError::Graph { operation, source }
    }

    /// Name of the failing operation.
    pub fn operation(&self) -> &'static str {
        match self {
            OperationError::Graph { operation, .. } | OperationError::Poisoned { operation } => {
                operation
            }
        }
    }

    /// The underlying graph error, if any.
    pub fn graph_error(&self) -> Option<&GraphError> {
        match self {
            OperationError::Graph { source, .. } => Some(source),
            OperationError::Poisoned { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn graph_display_names_operation() {
        let err = OperationError::graph(
            "prism:chromatic-aberration",
            GraphError::UnknownOperation {
                operation: "prism:lens".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "operation 'prism:chromatic-aberration': unknown operation 'prism:lens'"
        );
        assert_eq!(err.operation(), "prism:chromatic-aberration");
        assert!(err.source().is_some());
        assert!(err.graph_error().is_some());
    }

    #[test]
    fn poisoned_has_no_source() {
        let err = OperationError::Poisoned { operation: "x" };
        assert!(err.source().is_none());
        assert!(err.graph_error().is_none());
        assert!(err.to_string().contains("cannot be used"));
    }
}
