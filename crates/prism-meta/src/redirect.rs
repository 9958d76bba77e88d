//! Exposed-parameter to internal-parameter redirection.
//!
//! [`Redirector`] binds a wrapper's exposed parameter to `(NodeId, param)`
//! pairs inside its graph. One exposed parameter may drive several targets
//! (fan-out), e.g. a single "metallic effect" slider feeding all three
//! frequency components of an alien-map node.
//!
//! # Guarantees
//!
//! - Bindings are additive: registering a second target for the same exposed
//!   parameter keeps the first. An identical binding is a no-op.
//! - [`propagate()`](Redirector::propagate) writes targets in registration
//!   order, synchronously. Every target value is validated before the first
//!   write, so either all targets observe the new value or none do.
//! - Targets are internal child-node parameters. They are never watched by a
//!   toggle rule or redirected further, so propagation cannot recurse.

use prism_core::{Graph, GraphError, NodeId, ParamSet, ParamSpec, ParamValue};

/// A standing binding from an exposed parameter to one node parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirection {
    /// Exposed parameter name.
    pub exposed: &'static str,
    /// Target node.
    pub node: NodeId,
    /// Target parameter name on `node`.
    pub param: &'static str,
}

/// Ordered set of redirections for one wrapper.
#[derive(Debug, Clone, Default)]
pub struct Redirector {
    bindings: Vec<Redirection>,
}

impl Redirector {
    /// Creates an empty redirector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding from `exposed` to `node.param`.
    ///
    /// Returns `false` if the identical binding already exists.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DanglingNode`] if `node` is not in `graph`
    /// - [`GraphError::UnknownTargetParameter`] if `node` lacks `param`
    /// - [`GraphError::InvalidParameter`] if the exposed kind cannot be stored
    ///   in the target (e.g. a boolean redirected into a double)
    pub fn redirect(
        &mut self,
        graph: &Graph,
        exposed: &'static ParamSpec,
        node: NodeId,
        param: &'static str,
    ) -> Result<bool, GraphError> {
        let target = graph.param_spec(node, param)?;
        target
            .accept(exposed.default)
            .map_err(|reason| GraphError::InvalidParameter {
                owner: graph.describe(node),
                param: param.to_string(),
                reason,
            })?;

        let binding = Redirection {
            exposed: exposed.name,
            node,
            param,
        };
        if self.bindings.contains(&binding) {
            return Ok(false);
        }
        tracing::trace!(
            "redirect: {} -> {}.{param}",
            exposed.name,
            graph.describe(node)
        );
        self.bindings.push(binding);
        Ok(true)
    }

    /// Iterates over the bindings of one exposed parameter, in order.
    pub fn targets<'a>(&'a self, exposed: &'a str) -> impl Iterator<Item = &'a Redirection> + 'a {
        self.bindings.iter().filter(move |b| b.exposed == exposed)
    }

    /// Returns `true` if `exposed` drives at least one target.
    pub fn is_redirected(&self, exposed: &str) -> bool {
        self.targets(exposed).next().is_some()
    }

    /// Writes `value` into every target of `exposed`.
    ///
    /// Returns the number of targets written.
    pub fn propagate(
        &self,
        exposed: &str,
        value: ParamValue,
        graph: &mut Graph,
    ) -> Result<usize, GraphError> {
        let mut staged = Vec::new();
        for binding in self.targets(exposed) {
            let accepted = graph
                .param_spec(binding.node, binding.param)?
                .accept(value)
                .map_err(|reason| GraphError::InvalidParameter {
                    owner: graph.describe(binding.node),
                    param: binding.param.to_string(),
                    reason,
                })?;
            staged.push((binding, accepted));
        }
        for &(binding, accepted) in &staged {
            graph.set_param(binding.node, binding.param, accepted)?;
        }
        Ok(staged.len())
    }

    /// Pushes every exposed value in `values` to its targets.
    ///
    /// Used right after attach so the graph starts in sync with the wrapper.
    pub fn sync_all(&self, values: &ParamSet, graph: &mut Graph) -> Result<usize, GraphError> {
        let mut written = 0;
        for (spec, value) in values.iter() {
            written += self.propagate(spec.name, value, graph)?;
        }
        Ok(written)
    }

    /// All bindings in registration order.
    pub fn bindings(&self) -> &[Redirection] {
        &self.bindings
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{ParamSet, Port, Primitive};

    static NODE_PARAMS: &[ParamSpec] = &[
        ParamSpec::double("strength", "Strength", 0.0).with_range(-100.0, 100.0),
        ParamSpec::boolean("enabled", "Enabled", false),
    ];

    static EXPOSED: &[ParamSpec] = &[
        ParamSpec::double("amount", "Amount", 1.0).with_range(0.0, 20.0),
        ParamSpec::boolean("flag", "Flag", false),
    ];

    fn node(graph: &mut Graph, label: &str) -> NodeId {
        graph.add_primitive(
            label,
            Primitive::new("test:filter", &[Port::Input], ParamSet::new(NODE_PARAMS)),
        )
    }

    #[test]
    fn fan_out_reaches_every_target() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let b = node(&mut graph, "b");
        let mut redirector = Redirector::new();
        assert!(redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap());
        assert!(redirector.redirect(&graph, &EXPOSED[0], b, "strength").unwrap());

        let written = redirector
            .propagate("amount", ParamValue::Double(7.5), &mut graph)
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(graph.param(a, "strength"), Ok(ParamValue::Double(7.5)));
        assert_eq!(graph.param(b, "strength"), Ok(ParamValue::Double(7.5)));
    }

    #[test]
    fn duplicate_binding_is_noop() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let mut redirector = Redirector::new();
        assert!(redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap());
        assert!(!redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap());
        assert_eq!(redirector.len(), 1);
    }

    #[test]
    fn targets_keep_registration_order() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let b = node(&mut graph, "b");
        let mut redirector = Redirector::new();
        redirector.redirect(&graph, &EXPOSED[0], b, "strength").unwrap();
        redirector.redirect(&graph, &EXPOSED[1], a, "enabled").unwrap();
        redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap();

        let nodes: Vec<NodeId> = redirector.targets("amount").map(|r| r.node).collect();
        assert_eq!(nodes, vec![b, a]);
        assert!(redirector.is_redirected("flag"));
        assert!(!redirector.is_redirected("other"));
    }

    #[test]
    fn unknown_target_parameter_is_rejected() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let mut redirector = Redirector::new();
        assert_eq!(
            redirector.redirect(&graph, &EXPOSED[0], a, "zoom"),
            Err(GraphError::UnknownTargetParameter {
                node: "a#0".to_string(),
                param: "zoom".to_string(),
            })
        );
        assert!(redirector.is_empty());
    }

    #[test]
    fn proxy_target_is_rejected() {
        let mut graph = Graph::new();
        let input = graph.add_input_proxy();
        let mut redirector = Redirector::new();
        assert!(matches!(
            redirector.redirect(&graph, &EXPOSED[0], input, "strength"),
            Err(GraphError::UnknownTargetParameter { .. })
        ));
    }

    #[test]
    fn kind_mismatch_is_rejected_at_registration() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let mut redirector = Redirector::new();
        assert!(matches!(
            redirector.redirect(&graph, &EXPOSED[1], a, "strength"),
            Err(GraphError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn foreign_node_is_rejected() {
        let graph = Graph::new();
        let mut other = Graph::new();
        let foreign = node(&mut other, "foreign");
        let mut redirector = Redirector::new();
        assert_eq!(
            redirector.redirect(&graph, &EXPOSED[0], foreign, "strength"),
            Err(GraphError::DanglingNode { node: foreign })
        );
    }

    #[test]
    fn failed_propagation_writes_nothing() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let b = node(&mut graph, "b");
        let mut redirector = Redirector::new();
        redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap();
        redirector.redirect(&graph, &EXPOSED[0], b, "strength").unwrap();

        assert!(
            redirector
                .propagate("amount", ParamValue::Bool(true), &mut graph)
                .is_err()
        );
        assert_eq!(graph.param(a, "strength"), Ok(ParamValue::Double(0.0)));
        assert_eq!(graph.param(b, "strength"), Ok(ParamValue::Double(0.0)));
    }

    #[test]
    fn sync_all_pushes_current_values() {
        let mut graph = Graph::new();
        let a = node(&mut graph, "a");
        let mut redirector = Redirector::new();
        redirector.redirect(&graph, &EXPOSED[0], a, "strength").unwrap();
        redirector.redirect(&graph, &EXPOSED[1], a, "enabled").unwrap();

        let mut values = ParamSet::new(EXPOSED);
        values.set("amount", 3.0.into()).unwrap();
        values.set("flag", true.into()).unwrap();
        assert_eq!(redirector.sync_all(&values, &mut graph), Ok(2));
        assert_eq!(graph.param(a, "strength"), Ok(ParamValue::Double(3.0)));
        assert_eq!(graph.param(a, "enabled"), Ok(ParamValue::Bool(true)));
    }
}
