//! Node graph for meta-operations.
//!
//! A meta-operation does no pixel work itself: it builds a small DAG of
//! primitive operations supplied by the host, and the host later evaluates
//! that DAG. This module owns the DAG.
//!
//! # Model
//!
//! - [`NodeId`] - handle to a node, tagged with its owning graph
//! - [`NodeKind`] - input proxy, output proxy, or an instantiated [`Primitive`]
//! - [`Port`] - named input (`input` or `aux`); every node has one output
//! - [`Edge`] - view of a connection, comparable and sortable
//! - [`Graph`] - owns the nodes and enforces the wiring contract
//!
//! # Wiring contract
//!
//! - An input port has at most one incoming edge. Connecting into an occupied
//!   port replaces the previous edge ("last connect wins").
//! - [`Graph::link`] and [`Graph::connect_aux`] are idempotent.
//! - Ids from another graph fail with [`GraphError::DanglingNode`](crate::GraphError).
//! - An edge that would close a cycle fails with
//!   [`GraphError::Cycle`](crate::GraphError); the check is a DFS from the new
//!   edge's target looking for its source.
//!
//! # Example
//!
//! ```rust
//! use prism_core::graph::{Graph, Port, Primitive};
//! use prism_core::ParamSet;
//!
//! let mut graph = Graph::new();
//! let input = graph.add_input_proxy();
//! let output = graph.add_output_proxy();
//! let blend = graph.add_primitive(
//!     "blend",
//!     Primitive::new("svg:src", &[Port::Input, Port::Aux], ParamSet::new(&[])),
//! );
//!
//! graph.link(&[input, blend, output])?;
//! graph.connect_aux(blend, input)?;
//! assert_eq!(graph.edge_count(), 3);
//! # Ok::<(), prism_core::GraphError>(())
//! ```

mod dag;
pub mod edge;
pub mod node;

pub use dag::Graph;
pub use edge::{Edge, Port};
pub use node::{NodeId, NodeKind, Primitive};
