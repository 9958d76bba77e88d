//! Prism Core - typed parameters and node graphs for meta-operations
//!
//! This crate provides the data model that prism's composition layer is built
//! on. It implements no pixel math: every node is either a boundary proxy or
//! an instance of a primitive operation the host supplies.
//!
//! # Core Abstractions
//!
//! ## Parameters
//!
//! - [`ParamValue`] / [`ParamKind`] - Typed values (double, int, boolean)
//! - [`ParamSpec`] - Name, default, range and opaque UI hints
//! - [`ParamSet`] - Validated current values for a schema
//!
//! ## Graph
//!
//! - [`Graph`] - Owned DAG with "last connect wins" wiring and cycle checks
//! - [`NodeId`], [`NodeKind`], [`Primitive`], [`Port`], [`Edge`]
//!
//! ## Errors
//!
//! - [`GraphError`] - Construction-time failures naming the offending node or
//!   parameter
//!
//! # Features
//!
//! - `tracing` - emit `debug` events for every graph mutation

pub mod error;
pub mod graph;
pub mod param;
pub mod value;

pub use error::GraphError;
pub use graph::{Edge, Graph, NodeId, NodeKind, Port, Primitive};
pub use param::{ParamRejection, ParamSet, ParamSpec};
pub use value::{ParamKind, ParamValue};
