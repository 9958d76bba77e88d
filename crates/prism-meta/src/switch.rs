//! Boolean-driven topology switching.
//!
//! A [`ToggleRule`] pairs a boolean exposed parameter with two rewiring
//! actions, one per value. [`TopologySwitch::apply`] replays every rule, in
//! registration order, against the current parameter values.
//!
//! The input ports written by any branch of any rule are *switched ports*.
//! Once construction finishes, [`TopologySwitch::capture_baseline`] records
//! what feeds each switched port, if anything. `apply` first restores that
//! baseline, then runs the branches for the current values, relying on "last
//! connect wins" where branches overlap. A port written only by the inactive
//! branch therefore falls back to its construction-time source (or stays
//! unconnected), and the edge set depends only on the values, never on the
//! history of toggles that led there.

use std::collections::{BTreeMap, BTreeSet};

use prism_core::{Graph, GraphError, NodeId, ParamSet, Port};

/// One rewiring action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewire {
    /// Link a chain of nodes through their main inputs.
    Link(Vec<NodeId>),
    /// Feed `source` into `target`'s aux input.
    ConnectAux {
        /// Node whose aux port is fed.
        target: NodeId,
        /// Node providing the aux input.
        source: NodeId,
    },
}

impl Rewire {
    /// Shorthand for [`Rewire::Link`].
    pub fn link(nodes: &[NodeId]) -> Self {
        Rewire::Link(nodes.to_vec())
    }

    /// Shorthand for [`Rewire::ConnectAux`].
    pub fn aux(target: NodeId, source: NodeId) -> Self {
        Rewire::ConnectAux { target, source }
    }

    /// Nodes this action touches.
    pub fn nodes(&self) -> Vec<NodeId> {
        match self {
            Rewire::Link(nodes) => nodes.clone(),
            Rewire::ConnectAux { target, source } => vec![*target, *source],
        }
    }

    /// Input ports this action writes.
    pub fn ports(&self) -> Vec<(NodeId, Port)> {
        match self {
            Rewire::Link(nodes) => nodes.iter().skip(1).map(|&n| (n, Port::Input)).collect(),
            Rewire::ConnectAux { target, .. } => vec![(*target, Port::Aux)],
        }
    }

    fn run(&self, graph: &mut Graph) -> Result<(), GraphError> {
        match self {
            Rewire::Link(nodes) => graph.link(nodes),
            Rewire::ConnectAux { target, source } => {
                graph.connect_aux(*target, *source).map(|_| ())
            }
        }
    }
}

/// Rewiring attached to one boolean parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRule {
    /// Watched boolean parameter.
    pub param: &'static str,
    /// Actions run, in order, when the parameter is `true`.
    pub on_true: Vec<Rewire>,
    /// Actions run, in order, when the parameter is `false`.
    pub on_false: Vec<Rewire>,
}

impl ToggleRule {
    /// Actions for the given value.
    pub fn actions(&self, value: bool) -> &[Rewire] {
        if value { &self.on_true } else { &self.on_false }
    }
}

/// Ordered collection of toggle rules.
#[derive(Debug, Clone, Default)]
pub struct TopologySwitch {
    rules: Vec<ToggleRule>,
    baseline: BTreeMap<(NodeId, Port), NodeId>,
}

impl TopologySwitch {
    /// Creates an empty switch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. Rules are applied in the order they were added.
    pub fn watch(&mut self, param: &'static str, on_true: Vec<Rewire>, on_false: Vec<Rewire>) {
        self.rules.push(ToggleRule {
            param,
            on_true,
            on_false,
        });
    }

    /// Registered rules in application order.
    pub fn rules(&self) -> &[ToggleRule] {
        &self.rules
    }

    /// Returns `true` if some rule watches `param`.
    pub fn watches(&self, param: &str) -> bool {
        self.rules.iter().any(|r| r.param == param)
    }

    /// Every input port some branch of some rule writes.
    pub fn switched_ports(&self) -> BTreeSet<(NodeId, Port)> {
        self.rules
            .iter()
            .flat_map(|r| r.on_true.iter().chain(&r.on_false))
            .flat_map(Rewire::ports)
            .collect()
    }

    /// Records the current source of every switched port.
    ///
    /// Called once the fixed wiring is in place. Ports with no source are
    /// left out and restore to unconnected.
    pub fn capture_baseline(&mut self, graph: &Graph) {
        self.baseline = self
            .switched_ports()
            .into_iter()
            .filter_map(|key| graph.source_of(key.0, key.1).map(|from| (key, from)))
            .collect();
    }

    /// Source a switched port falls back to when no active branch writes it.
    pub fn baseline_source(&self, node: NodeId, port: Port) -> Option<NodeId> {
        self.baseline.get(&(node, port)).copied()
    }

    /// Restores the switched ports to their baseline, then runs every rule's
    /// action list for the current value of its parameter.
    ///
    /// A parameter missing from `values` or not boolean reads as `false`.
    /// Stops at the first failing action.
    pub fn apply(&self, values: &ParamSet, graph: &mut Graph) -> Result<(), GraphError> {
        // Restored edges are a subset of the construction-time graph.
        for (node, port) in self.switched_ports() {
            graph.disconnect(node, port)?;
        }
        for (&(node, port), &from) in &self.baseline {
            graph.connect(from, node, port)?;
        }
        for rule in &self.rules {
            let value = values.get_bool(rule.param).unwrap_or(false);
            tracing::trace!("toggle: {}={value}", rule.param);
            for action in rule.actions(value) {
                action.run(graph)?;
            }
        }
        Ok(())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
