//! Construction context handed to [`MetaOperation::attach`](crate::MetaOperation::attach).

use prism_core::{
    Graph, GraphError, NodeId, ParamKind, ParamRejection, ParamSet, ParamSpec, ParamValue,
};
use prism_registry::OperationRegistry;

use crate::redirect::Redirector;
use crate::switch::{Rewire, TopologySwitch};

/// Builds a meta-operation's sub-graph.
///
/// Wraps the wrapper's graph, redirector and switch for the duration of one
/// attach. Children are instantiated from the registry, labelled, and owned
/// by the graph; the returned [`NodeId`]s are valid for the wrapper's
/// lifetime.
pub struct MetaBuilder<'a> {
    operation: &'static str,
    registry: &'a OperationRegistry,
    graph: &'a mut Graph,
    redirector: &'a mut Redirector,
    switch: &'a mut TopologySwitch,
    values: &'a ParamSet,
    input: NodeId,
    output: NodeId,
}

impl<'a> MetaBuilder<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        operation: &'static str,
        registry: &'a OperationRegistry,
        graph: &'a mut Graph,
        redirector: &'a mut Redirector,
        switch: &'a mut TopologySwitch,
        values: &'a ParamSet,
        input: NodeId,
        output: NodeId,
    ) -> Self {
        Self {
            operation,
            registry,
            graph,
            redirector,
            switch,
            values,
            input,
            output,
        }
    }

    /// The input proxy.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// The output proxy.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Exposed parameter values at attach time.
    pub fn values(&self) -> &ParamSet {
        self.values
    }

    /// Instantiates `operation` with schema defaults and adds it as `label`.
    pub fn node(&mut self, label: &str, operation: &str) -> Result<NodeId, GraphError> {
        self.node_with(label, operation, &[])
    }

    /// Instantiates `operation` with initial parameters and adds it as `label`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownOperation`] or [`GraphError::InvalidParameter`]
    /// from the registry. Nothing is added on failure.
    pub fn node_with(
        &mut self,
        label: &str,
        operation: &str,
        params: &[(&str, ParamValue)],
    ) -> Result<NodeId, GraphError> {
        let primitive = self.registry.create(operation, params)?;
        Ok(self.graph.add_primitive(label, primitive))
    }

    /// Links nodes through their main inputs, in order.
    pub fn link(&mut self, nodes: &[NodeId]) -> Result<(), GraphError> {
        self.graph.link(nodes)
    }

    /// Feeds `source` into `target`'s aux input.
    pub fn connect_aux(&mut self, target: NodeId, source: NodeId) -> Result<(), GraphError> {
        self.graph.connect_aux(target, source).map(|_| ())
    }

    /// Binds exposed parameter `exposed` to `node.param`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidParameter`] if `exposed` is not one of this
    ///   operation's parameters, or its kind does not fit the target
    /// - [`GraphError::DanglingNode`] or [`GraphError::UnknownTargetParameter`]
    ///   if the target does not exist
    pub fn redirect(
        &mut self,
        exposed: &str,
        node: NodeId,
        param: &'static str,
    ) -> Result<(), GraphError> {
        let spec = self.exposed_spec(exposed)?;
        self.redirector.redirect(&*self.graph, spec, node, param)?;
        Ok(())
    }

    /// Registers a topology rule on boolean parameter `param`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidParameter`] if `param` is not an exposed boolean
    /// - [`GraphError::DanglingNode`] if an action names a foreign node
    pub fn watch(
        &mut self,
        param: &str,
        on_true: Vec<Rewire>,
        on_false: Vec<Rewire>,
    ) -> Result<(), GraphError> {
        let spec = self.exposed_spec(param)?;
        if spec.kind != ParamKind::Bool {
            return Err(GraphError::InvalidParameter {
                owner: self.operation.to_string(),
                param: param.to_string(),
                reason: ParamRejection::KindMismatch {
                    expected: ParamKind::Bool,
                    found: spec.kind,
                },
            });
        }
        for node in on_true.iter().chain(&on_false).flat_map(Rewire::nodes) {
            if !self.graph.contains(node) {
                return Err(GraphError::DanglingNode { node });
            }
        }
        self.switch.watch(spec.name, on_true, on_false);
        Ok(())
    }

    /// Read access to the graph under construction.
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    fn exposed_spec(&self, name: &str) -> Result<&'static ParamSpec, GraphError> {
        self.values
            .spec(name)
            .ok_or_else(|| GraphError::InvalidParameter {
                owner: self.operation.to_string(),
                param: name.to_string(),
                reason: ParamRejection::Unknown,
            })
    }
}
