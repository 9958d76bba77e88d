//! Owned node graph: node creation, wiring and parameter access.
//!
//! [`Graph`] owns its nodes for their whole lifetime: nodes are added, never
//! removed, and their ids stay valid until the graph is dropped. Wiring follows
//! a "last connect wins" contract: connecting into an input port that already
//! has an upstream node replaces that edge instead of failing or fanning in.
//! This is what lets a topology switch re-route a junction by simply linking
//! the new chain.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::GraphError;
use crate::param::{ParamRejection, ParamSet, ParamSpec};
use crate::value::ParamValue;

use super::edge::{Edge, Port};
use super::node::{NodeData, NodeId, NodeKind, Primitive};

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(0);

/// Directed acyclic graph of proxies and primitive nodes.
///
/// # Usage
///
/// 1. Create a graph with [`new()`](Self::new)
/// 2. Add nodes: [`add_input_proxy()`](Self::add_input_proxy),
///    [`add_output_proxy()`](Self::add_output_proxy),
///    [`add_primitive()`](Self::add_primitive)
/// 3. Wire them: [`link()`](Self::link), [`connect_aux()`](Self::connect_aux)
/// 4. Inspect: [`edges()`](Self::edges), [`source_of()`](Self::source_of),
///    [`param()`](Self::param)
///
/// Each graph has a process-unique identity; ids from another graph are
/// rejected with [`GraphError::DanglingNode`].
#[derive(Debug)]
pub struct Graph {
    id: u32,
    nodes: Vec<NodeData>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
        }
    }

    // --- Node creation ---

    /// Adds the input proxy. Labelled `"input"`.
    pub fn add_input_proxy(&mut self) -> NodeId {
        self.add_node("input", NodeKind::InputProxy)
    }

    /// Adds the output proxy. Labelled `"output"`.
    pub fn add_output_proxy(&mut self) -> NodeId {
        self.add_node("output", NodeKind::OutputProxy)
    }

    /// Adds an instantiated primitive under the given label.
    pub fn add_primitive(&mut self, label: impl Into<String>, primitive: Primitive) -> NodeId {
        self.add_node(label, NodeKind::Primitive(primitive))
    }

    /// Adds a node of any kind. Returns its id.
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId {
            graph: self.id,
            index: self.nodes.len() as u32,
        };
        self.nodes.push(NodeData::new(label.into(), kind));
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_add: {}", self.describe(id));
        id
    }

    // --- Wiring ---

    /// Connects `from`'s output to `to`'s `port`.
    ///
    /// Replaces any edge already feeding that port and returns the node it came
    /// from. Connecting the same pair twice is a no-op.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DanglingNode`] if either node belongs to another graph
    /// - [`GraphError::UnknownPort`] if `to` does not declare `port`
    /// - [`GraphError::InvalidConnection`] if `from` is the output proxy
    /// - [`GraphError::Cycle`] if `to` can already reach `from`
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        port: Port,
    ) -> Result<Option<NodeId>, GraphError> {
        let from_node = self.node(from)?;
        let to_node = self.node(to)?;

        if matches!(from_node.kind, NodeKind::OutputProxy) {
            return Err(GraphError::InvalidConnection(format!(
                "output proxy '{}' cannot feed '{}'",
                self.describe(from),
                self.describe(to)
            )));
        }
        if !to_node.kind.ports().contains(&port) {
            return Err(GraphError::UnknownPort {
                node: self.describe(to),
                port,
            });
        }

        let previous = to_node.inputs.get(&port).copied();
        if previous == Some(from) {
            return Ok(previous);
        }

        // The edge being replaced points into `to`, so it never lies on a
        // path starting at `to`; checking before removal is exact.
        if from == to || self.can_reach(to, from) {
            return Err(GraphError::Cycle {
                from: self.describe(from),
                to: self.describe(to),
            });
        }

        if let Some(prev) = previous {
            self.nodes[prev.index as usize]
                .consumers
                .retain(|&(node, p)| !(node == to && p == port));
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "graph_replace: {}.{port} was fed by {}",
                self.describe(to),
                self.describe(prev)
            );
        }
        self.nodes[to.index as usize].inputs.insert(port, from);
        self.nodes[from.index as usize].consumers.push((to, port));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "graph_connect: {} -> {}.{port}",
            self.describe(from),
            self.describe(to)
        );
        Ok(previous)
    }

    /// Connects each node's output to the next node's main input, in order.
    ///
    /// Fewer than two nodes is a no-op. Stops at the first failing pair; the
    /// pairs before it stay connected.
    pub fn link(&mut self, nodes: &[NodeId]) -> Result<(), GraphError> {
        for pair in nodes.windows(2) {
            self.connect(pair[0], pair[1], Port::Input)?;
        }
        Ok(())
    }

    /// Connects `source`'s output to `target`'s aux input, replacing any
    /// existing aux edge.
    pub fn connect_aux(
        &mut self,
        target: NodeId,
        source: NodeId,
    ) -> Result<Option<NodeId>, GraphError> {
        self.connect(source, target, Port::Aux)
    }

    /// Removes the edge feeding `to`'s `port`, returning its source.
    pub fn disconnect(&mut self, to: NodeId, port: Port) -> Result<Option<NodeId>, GraphError> {
        self.node(to)?;
        let previous = self.nodes[to.index as usize].inputs.remove(&port);
        if let Some(prev) = previous {
            self.nodes[prev.index as usize]
                .consumers
                .retain(|&(node, p)| !(node == to && p == port));
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "graph_disconnect: {} -/-> {}.{port}",
                self.describe(prev),
                self.describe(to)
            );
        }
        Ok(previous)
    }

    // --- Inspection ---

    /// Returns the node currently feeding `to`'s `port`.
    pub fn source_of(&self, to: NodeId, port: Port) -> Option<NodeId> {
        self.node(to).ok()?.inputs.get(&port).copied()
    }

    /// Returns the `(node, port)` pairs fed by `from`, sorted.
    pub fn consumers(&self, from: NodeId) -> Vec<(NodeId, Port)> {
        let mut consumers = self
            .node(from)
            .map(|n| n.consumers.clone())
            .unwrap_or_default();
        consumers.sort_unstable();
        consumers
    }

    /// Returns `true` if `from` currently feeds `to`'s `port`.
    pub fn has_edge(&self, from: NodeId, to: NodeId, port: Port) -> bool {
        self.source_of(to, port) == Some(from)
    }

    /// Returns every edge, sorted by target, port, then source.
    ///
    /// Two graphs wired the same way produce equal lists.
    pub fn edges(&self) -> Vec<Edge> {
        self.node_ids()
            .flat_map(|to| {
                self.nodes[to.index as usize]
                    .inputs
                    .iter()
                    .map(move |(&port, &from)| Edge::new(from, to, port))
            })
            .collect()
    }

    /// Number of nodes, proxies included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.inputs.len()).sum()
    }

    /// Iterates over all node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(|index| NodeId {
            graph: self.id,
            index,
        })
    }

    /// Returns `true` if `id` was created by this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Returns a node's label.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).ok().map(|n| n.label.as_str())
    }

    /// Returns a node's kind.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).ok().map(|n| &n.kind)
    }

    /// Finds the first node with the given label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.node_ids()
            .find(|&id| self.nodes[id.index as usize].label == label)
    }

    /// Renders a node as `label#index` for messages.
    pub fn describe(&self, id: NodeId) -> String {
        match self.node(id) {
            Ok(node) => format!("{}#{}", node.label, id.index),
            Err(_) => id.to_string(),
        }
    }

    /// Returns every node whose output reaches `id`, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<NodeId> = match self.node(id) {
            Ok(node) => node.inputs.values().copied().collect(),
            Err(_) => return seen,
        };
        while let Some(current) = stack.pop() {
            if seen.insert(current) {
                stack.extend(self.nodes[current.index as usize].inputs.values().copied());
            }
        }
        seen
    }

    /// Orders nodes so that every node comes after all of its inputs.
    ///
    /// Kahn's algorithm; ties resolve by creation order.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, GraphError> {
        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.inputs.len()).collect();
        let mut ready: BTreeSet<NodeId> = self
            .node_ids()
            .filter(|id| in_degree[id.index as usize] == 0)
            .collect();
        let mut sorted = Vec::with_capacity(self.nodes.len());

        while let Some(id) = ready.pop_first() {
            sorted.push(id);
            for &(consumer, _) in &self.nodes[id.index as usize].consumers {
                let degree = &mut in_degree[consumer.index as usize];
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(consumer);
                }
            }
        }

        if sorted.len() != self.nodes.len() {
            // Unreachable through `connect`, which refuses cycles up front.
            let stuck = self
                .node_ids()
                .find(|id| in_degree[id.index as usize] > 0)
                .map(|id| self.describe(id))
                .unwrap_or_default();
            return Err(GraphError::Cycle {
                from: stuck.clone(),
                to: stuck,
            });
        }
        Ok(sorted)
    }

    // --- Parameters ---

    /// Returns a primitive node's parameters, `None` for proxies.
    pub fn params(&self, id: NodeId) -> Option<&ParamSet> {
        match &self.node(id).ok()?.kind {
            NodeKind::Primitive(primitive) => Some(primitive.params()),
            _ => None,
        }
    }

    /// Looks up the spec of a node parameter.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownTargetParameter`] if the node (or a proxy) does not
    /// declare `name`.
    pub fn param_spec(&self, id: NodeId, name: &str) -> Result<&'static ParamSpec, GraphError> {
        self.node(id)?;
        self.params(id)
            .and_then(|params| params.spec(name))
            .ok_or_else(|| GraphError::UnknownTargetParameter {
                node: self.describe(id),
                param: name.to_string(),
            })
    }

    /// Reads a node parameter.
    pub fn param(&self, id: NodeId, name: &str) -> Result<ParamValue, GraphError> {
        self.node(id)?;
        self.params(id)
            .and_then(|params| params.get(name))
            .ok_or_else(|| GraphError::UnknownTargetParameter {
                node: self.describe(id),
                param: name.to_string(),
            })
    }

    /// Writes a node parameter. Returns `true` if the stored value changed.
    pub fn set_param(
        &mut self,
        id: NodeId,
        name: &str,
        value: ParamValue,
    ) -> Result<bool, GraphError> {
        let owner = self.describe(id);
        let node = self.node_mut(id)?;
        let NodeKind::Primitive(primitive) = &mut node.kind else {
            return Err(GraphError::UnknownTargetParameter {
                node: owner,
                param: name.to_string(),
            });
        };
        primitive
            .params_mut()
            .set(name, value)
            .map_err(|reason| match reason {
                ParamRejection::Unknown => GraphError::UnknownTargetParameter {
                    node: owner,
                    param: name.to_string(),
                },
                reason => GraphError::InvalidParameter {
                    owner,
                    param: name.to_string(),
                    reason,
                },
            })
    }

    // --- Export ---

    /// Renders the graph in Graphviz dot syntax. Aux edges are dashed.
    pub fn to_dot(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{name}\" {{");
        let _ = writeln!(out, "  rankdir=LR;");
        for id in self.node_ids() {
            let node = &self.nodes[id.index as usize];
            match node.kind.operation() {
                Some(op) => {
                    let _ = writeln!(out, "  n{} [label=\"{}\\n{op}\"];", id.index, node.label);
                }
                None => {
                    let _ = writeln!(
                        out,
                        "  n{} [label=\"{}\", shape=box];",
                        id.index, node.label
                    );
                }
            }
        }
        for edge in self.edges() {
            let style = match edge.port {
                Port::Input => "",
                Port::Aux => ", style=dashed",
            };
            let _ = writeln!(
                out,
                "  n{} -> n{} [label=\"{}\"{style}];",
                edge.from.index, edge.to.index, edge.port
            );
        }
        out.push_str("}\n");
        out
    }

    // --- Internal helpers ---

    fn node(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        if id.graph != self.id {
            return Err(GraphError::DanglingNode { node: id });
        }
        self.nodes
            .get(id.index as usize)
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, GraphError> {
        if id.graph != self.id {
            return Err(GraphError::DanglingNode { node: id });
        }
        self.nodes
            .get_mut(id.index as usize)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// DFS reachability check: can `from` reach `to` via existing edges?
    fn can_reach(&self, from: NodeId, to: NodeId) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            let idx = current.index as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            stack.extend(self.nodes[idx].consumers.iter().map(|&(node, _)| node));
        }
        false
    }
}
