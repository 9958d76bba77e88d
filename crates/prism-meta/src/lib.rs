//! Meta-operations for prism: operations implemented as sub-graphs of
//! registered primitives.
//!
//! A meta-operation declares a parameter schema and, once, how to build its
//! sub-graph. The [`OperationWrapper`] then owns the instance:
//!
//! - **Builder** ([`MetaBuilder`]): instantiates children from the
//!   [`OperationRegistry`](prism_registry::OperationRegistry) and wires fixed
//!   edges
//! - **Redirector** ([`Redirector`]): binds exposed parameters to one or more
//!   child parameters, propagating synchronously on every `set`
//! - **Topology switch** ([`TopologySwitch`]): per boolean parameter, two
//!   rewiring branches; `update()` replays all of them for the current values
//!
//! The edge set after `update()` is a pure function of the current values.
//!
//! # Example
//!
//! ```rust
//! use prism_core::{GraphError, ParamSpec, Port};
//! use prism_meta::{MetaBuilder, MetaInfo, MetaOperation, OperationWrapper, Rewire};
//! use prism_registry::OperationRegistry;
//!
//! static PARAMS: &[ParamSpec] = &[ParamSpec::boolean("invert", "Invert", false)];
//!
//! struct MaybeInvert;
//!
//! impl MetaOperation for MaybeInvert {
//!     fn info(&self) -> MetaInfo {
//!         MetaInfo {
//!             name: "demo:maybe-invert",
//!             title: "Maybe Invert",
//!             description: "Inverts when asked to",
//!             categories: &["color"],
//!         }
//!     }
//!
//!     fn params(&self) -> &'static [ParamSpec] {
//!         PARAMS
//!     }
//!
//!     fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
//!         let (input, output) = (b.input(), b.output());
//!         let invert = b.node("invert", "prism:invert-linear")?;
//!         b.watch(
//!             "invert",
//!             vec![Rewire::link(&[input, invert, output])],
//!             vec![Rewire::link(&[input, output])],
//!         )
//!     }
//! }
//!
//! let mut op = OperationWrapper::new(MaybeInvert);
//! op.attach(OperationRegistry::global()).unwrap();
//! assert!(op.graph().has_edge(op.input(), op.output(), Port::Input));
//!
//! op.set("invert", true.into()).unwrap();
//! op.update().unwrap();
//! let invert = op.graph().find("invert").unwrap();
//! assert!(op.graph().has_edge(invert, op.output(), Port::Input));
//! ```

pub mod builder;
pub mod error;
pub mod operation;
pub mod redirect;
pub mod switch;
pub mod wrapper;

pub use builder::MetaBuilder;
pub use error::OperationError;
pub use operation::{MetaInfo, MetaOperation};
pub use redirect::{Redirection, Redirector};
pub use switch::{Rewire, ToggleRule, TopologySwitch};
pub use wrapper::{OperationWrapper, WrapperState};
