//! Error types for graph construction and parameter access.
//!
//! All of these are configuration errors in a topology description, raised
//! synchronously while a graph is being built or rewired. None of them depend
//! on pixel data, and none are retried.

use thiserror::Error;

use crate::graph::{NodeId, Port};
use crate::param::ParamRejection;

/// Errors raised by the registry, the graph, and parameter redirection.
///
/// Node references are rendered as `label#index` so that a failure names the
/// offending node the way the operation author wrote it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// No primitive is registered under this name.
    #[error("unknown operation '{operation}'")]
    UnknownOperation {
        /// Requested operation name.
        operation: String,
    },

    /// A parameter write was refused by the owner's schema.
    #[error("invalid parameter '{param}' on '{owner}': {reason}")]
    InvalidParameter {
        /// Node label or operation name owning the parameter.
        owner: String,
        /// Parameter name.
        param: String,
        /// Why the write was refused.
        #[source]
        reason: ParamRejection,
    },

    /// The node was not created by this graph.
    #[error("{node} was not created by this graph")]
    DanglingNode {
        /// The foreign node.
        node: NodeId,
    },

    /// Connecting these nodes would close a cycle.
    #[error("connecting '{from}' into '{to}' would create a cycle")]
    Cycle {
        /// Source of the rejected edge.
        from: String,
        /// Target of the rejected edge.
        to: String,
    },

    /// A redirection or internal write named a parameter the node lacks.
    #[error("node '{node}' has no parameter '{param}'")]
    UnknownTargetParameter {
        /// Target node.
        node: String,
        /// Missing parameter name.
        param: String,
    },

    /// The node id is from this graph but no node exists at that index.
    #[error("{0} not found")]
    NodeNotFound(NodeId),

    /// The target node does not declare this input port.
    #[error("node '{node}' has no '{port}' input")]
    UnknownPort {
        /// Target node.
        node: String,
        /// Requested port.
        port: Port,
    },

    /// The connection is structurally invalid (e.g. consuming the output proxy).
    #[error("invalid connection: {0}")]
    InvalidConnection(String),
}
