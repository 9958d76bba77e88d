//! Graph edge types.
//!
//! An [`Edge`] connects the single output of one node to a named input
//! [`Port`] of another. Edges are not stored as objects: each node records
//! the upstream node per input port, so "one incoming edge per port" holds by
//! construction and an `Edge` is just a view for inspection and comparison.

use std::fmt;

use super::node::NodeId;

/// A named input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Port {
    /// Primary input.
    Input,
    /// Secondary input used by blend and compare operations.
    Aux,
}

impl Port {
    /// Returns the port's name as used by the host.
    pub const fn name(self) -> &'static str {
        match self {
            Port::Input => "input",
            Port::Aux => "aux",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directed connection from `from`'s output to `to`'s `port` input.
///
/// Ordered by target then port then source, so a sorted edge list reads
/// naturally node by node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    /// Destination node.
    pub to: NodeId,
    /// Destination port.
    pub port: Port,
    /// Source node.
    pub from: NodeId,
}

impl Edge {
    /// Creates an edge view.
    pub const fn new(from: NodeId, to: NodeId, port: Port) -> Self {
        Self { to, port, from }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}.{}", self.from, self.to, self.port)
    }
}
