//! Graph node types.
//!
//! Each node in a [`Graph`](super::Graph) has a [`NodeId`], a label, and a
//! [`NodeKind`] that determines its role: one of the two boundary proxies, or
//! an instance of a primitive operation. The `NodeData` struct bundles the kind
//! with adjacency bookkeeping.

use std::collections::BTreeMap;
use std::fmt;

use crate::param::ParamSet;

use super::edge::Port;

/// Identifier for a node in a graph.
///
/// Carries the owning graph's identity so that a node handed to the wrong
/// graph is caught instead of silently aliasing another node. IDs are
/// assigned sequentially and never reused; nodes live as long as their graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) graph: u32,
    pub(crate) index: u32,
}

impl NodeId {
    /// Returns the node's position within its graph.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.index)
    }
}

/// An instantiated primitive operation: its name, input ports and parameters.
///
/// Built by the operation registry from a descriptor; the graph only needs the
/// port list and the parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    operation: &'static str,
    ports: &'static [Port],
    params: ParamSet,
}

impl Primitive {
    /// Creates a primitive instance.
    pub fn new(operation: &'static str, ports: &'static [Port], params: ParamSet) -> Self {
        Self {
            operation,
            ports,
            params,
        }
    }

    /// Registered operation name.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Input ports the operation declares.
    pub fn ports(&self) -> &'static [Port] {
        self.ports
    }

    /// Current parameter values.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Mutable parameter values.
    pub fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }
}

/// The role of a node in the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pass-through placeholder where the wrapper's own input enters.
    InputProxy,
    /// Pass-through placeholder feeding the wrapper's own output.
    OutputProxy,
    /// Instance of a registered primitive operation.
    Primitive(Primitive),
}

impl NodeKind {
    /// Input ports available on this kind of node.
    pub fn ports(&self) -> &'static [Port] {
        match self {
            NodeKind::InputProxy => &[],
            NodeKind::OutputProxy => &[Port::Input],
            NodeKind::Primitive(primitive) => primitive.ports(),
        }
    }

    /// Operation name for primitives, `None` for proxies.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            NodeKind::Primitive(primitive) => Some(primitive.operation()),
            _ => None,
        }
    }

    /// Returns `true` for either proxy.
    pub fn is_proxy(&self) -> bool {
        matches!(self, NodeKind::InputProxy | NodeKind::OutputProxy)
    }
}

/// Internal bookkeeping for a node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub label: String,
    pub kind: NodeKind,
    /// Upstream node per connected input port. One entry per port at most.
    pub inputs: BTreeMap<Port, NodeId>,
    /// Downstream `(node, port)` pairs fed by this node's output.
    pub consumers: Vec<(NodeId, Port)>,
}

impl NodeData {
    pub fn new(label: String, kind: NodeKind) -> Self {
        Self {
            label,
            kind,
            inputs: BTreeMap::new(),
            consumers: Vec::new(),
        }
    }
}
