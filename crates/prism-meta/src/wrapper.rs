//! The externally visible unit: one meta-operation instance.
//!
//! [`OperationWrapper`] owns everything an instance needs: its exposed
//! parameter values, its graph (proxies and children), its redirections and
//! its toggle rules. The host drives it through three calls:
//!
//! 1. [`attach()`](OperationWrapper::attach) once, to build the sub-graph
//! 2. [`set()`](OperationWrapper::set) whenever the user changes a value
//! 3. [`update()`](OperationWrapper::update) after each change notification
//!
//! ```text
//!  Unattached ──attach ok──▶ Attached ◀──┐ update ok
//!      │                       │ └───────┘
//!      │                       └──update err──┐
//!      └──attach err─────────────────────────▶ Failed
//! ```

use prism_core::{
    Edge, Graph, GraphError, NodeId, ParamRejection, ParamSet, ParamSpec, ParamValue,
};
use prism_registry::OperationRegistry;

use crate::builder::MetaBuilder;
use crate::error::OperationError;
use crate::operation::{MetaInfo, MetaOperation};
use crate::redirect::Redirector;
use crate::switch::TopologySwitch;

/// Lifecycle state of a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperState {
    /// Constructed; only the proxies exist.
    Unattached,
    /// Sub-graph built; `update()` rewires.
    Attached,
    /// `attach()` or `update()` failed. Terminal.
    Failed,
}

/// One instance of a meta-operation.
pub struct OperationWrapper {
    operation: Box<dyn MetaOperation>,
    values: ParamSet,
    graph: Graph,
    input: NodeId,
    output: NodeId,
    redirector: Redirector,
    switch: TopologySwitch,
    state: WrapperState,
}

impl std::fmt::Debug for OperationWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationWrapper")
            .field("operation", &self.name())
            .field("state", &self.state)
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}

impl OperationWrapper {
    /// Creates an unattached wrapper. The proxies exist immediately.
    pub fn new<O: MetaOperation + 'static>(operation: O) -> Self {
        Self::from_box(Box::new(operation))
    }

    /// Creates an unattached wrapper around a boxed operation.
    pub fn from_box(operation: Box<dyn MetaOperation>) -> Self {
        let mut graph = Graph::new();
        let input = graph.add_input_proxy();
        let output = graph.add_output_proxy();
        Self {
            values: ParamSet::new(operation.params()),
            operation,
            graph,
            input,
            output,
            redirector: Redirector::new(),
            switch: TopologySwitch::new(),
            state: WrapperState::Unattached,
        }
    }

    /// Builds the sub-graph, pushes current values to their targets, and runs
    /// [`update()`](Self::update) once.
    ///
    /// Calling it again after success is a no-op.
    ///
    /// # Errors
    ///
    /// Any [`GraphError`] raised while building, wrapped with the operation
    /// name. The wrapper is then [`WrapperState::Failed`] and every later call
    /// returns [`OperationError::Poisoned`].
    pub fn attach(&mut self, registry: &OperationRegistry) -> Result<(), OperationError> {
        let name = self.name();
        match self.state {
            WrapperState::Attached => {
                tracing::warn!("{name}: attach called twice, ignoring");
                return Ok(());
            }
            WrapperState::Failed => return Err(OperationError::Poisoned { operation: name }),
            WrapperState::Unattached => {}
        }

        if let Err(err) = self.build(registry) {
            tracing::error!("{name}: attach failed: {err}");
            self.state = WrapperState::Failed;
            return Err(OperationError::graph(name, err));
        }
        self.state = WrapperState::Attached;
        tracing::debug!(
            "{name}: attached {} nodes, {} redirections, {} toggle rules",
            self.graph.node_count(),
            self.redirector.len(),
            self.switch.len()
        );
        self.update()
    }

    fn build(&mut self, registry: &OperationRegistry) -> Result<(), GraphError> {
        let mut builder = MetaBuilder::new(
            self.operation.info().name,
            registry,
            &mut self.graph,
            &mut self.redirector,
            &mut self.switch,
            &self.values,
            self.input,
            self.output,
        );
        self.operation.attach(&mut builder)?;
        self.switch.capture_baseline(&self.graph);
        self.redirector.sync_all(&self.values, &mut self.graph)?;
        Ok(())
    }

    /// Re-applies every toggle rule for the current values.
    ///
    /// Before attach this does nothing. A failing rule leaves the graph
    /// partially rewired and moves the wrapper to [`WrapperState::Failed`].
    pub fn update(&mut self) -> Result<(), OperationError> {
        match self.state {
            WrapperState::Unattached => Ok(()),
            WrapperState::Failed => Err(OperationError::Poisoned {
                operation: self.name(),
            }),
            WrapperState::Attached => {
                let name = self.name();
                self.switch
                    .apply(&self.values, &mut self.graph)
                    .map_err(|err| {
                        tracing::error!("{name}: update failed: {err}");
                        self.state = WrapperState::Failed;
                        OperationError::graph(name, err)
                    })
            }
        }
    }

    /// Sets an exposed parameter and, once attached, propagates it to every
    /// redirection target.
    ///
    /// Returns `true` if the stored value changed. Does not rewire; call
    /// [`update()`](Self::update) afterwards.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidParameter`] (wrapped) for an unknown name or a
    /// wrong-kind or non-finite value. The stored value is unchanged.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<bool, OperationError> {
        let operation = self.name();
        if self.state == WrapperState::Failed {
            return Err(OperationError::Poisoned { operation });
        }

        let previous = self.values.get(name);
        let changed = self.values.set(name, value).map_err(|reason| {
            OperationError::graph(
                operation,
                GraphError::InvalidParameter {
                    owner: operation.to_string(),
                    param: name.to_string(),
                    reason,
                },
            )
        })?;

        if self.state == WrapperState::Attached {
            let stored = self.values.get(name).unwrap_or(value);
            if let Err(err) = self.redirector.propagate(name, stored, &mut self.graph) {
                if let Some(previous) = previous {
                    let restored = self.values.set(name, previous);
                    debug_assert!(restored.is_ok(), "previously stored value rejected");
                }
                return Err(OperationError::graph(operation, err));
            }
        }
        Ok(changed)
    }

    /// Sets several parameters, then runs one [`update()`](Self::update).
    ///
    /// Every value is checked against the schema before the first write, so
    /// an unknown name or a wrong kind leaves all values untouched. If a
    /// write still fails during propagation, the wiring is refreshed for the
    /// values stored so far before the error is returned.
    pub fn set_many(&mut self, values: &[(&str, ParamValue)]) -> Result<(), OperationError> {
        let operation = self.name();
        if self.state == WrapperState::Failed {
            return Err(OperationError::Poisoned { operation });
        }
        for &(name, value) in values {
            let checked = match self.values.spec(name) {
                Some(spec) => spec.accept(value).map(|_| ()),
                None => Err(ParamRejection::Unknown),
            };
            checked.map_err(|reason| {
                OperationError::graph(
                    operation,
                    GraphError::InvalidParameter {
                        owner: operation.to_string(),
                        param: name.to_string(),
                        reason,
                    },
                )
            })?;
        }

        let written = values
            .iter()
            .try_for_each(|&(name, value)| self.set(name, value).map(|_| ()));
        let updated = self.update();
        written.and(updated)
    }

    // --- Accessors ---

    /// The operation's registered name.
    pub fn name(&self) -> &'static str {
        self.operation.info().name
    }

    /// The operation's metadata.
    pub fn info(&self) -> MetaInfo {
        self.operation.info()
    }

    /// Exposed parameter schema.
    pub fn schema(&self) -> &'static [ParamSpec] {
        self.values.schema()
    }

    /// Current exposed values.
    pub fn values(&self) -> &ParamSet {
        &self.values
    }

    /// Current value of one exposed parameter.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name)
    }

    /// The internal graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Input proxy. Stable for the wrapper's lifetime.
    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Output proxy. Stable for the wrapper's lifetime.
    pub fn output(&self) -> NodeId {
        self.output
    }

    /// Lifecycle state.
    pub fn state(&self) -> WrapperState {
        self.state
    }

    /// Returns `true` once attach has succeeded.
    pub fn is_attached(&self) -> bool {
        self.state == WrapperState::Attached
    }

    /// Current edge set, sorted.
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.edges()
    }

    /// Registered redirections.
    pub fn redirector(&self) -> &Redirector {
        &self.redirector
    }

    /// Registered toggle rules.
    pub fn switch(&self) -> &TopologySwitch {
        &self.switch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch::Rewire;
    use prism_core::{ParamRejection, Port};

    static PARAMS: &[ParamSpec] = &[
        ParamSpec::boolean("flag", "Flag", false),
        ParamSpec::double("amount", "Amount", 1.0).with_range(0.0, 20.0),
    ];

    struct Toggle;

    impl MetaOperation for Toggle {
        fn info(&self) -> MetaInfo {
            MetaInfo {
                name: "test:toggle",
                title: "Toggle",
                description: "",
                categories: &[],
            }
        }

        fn params(&self) -> &'static [ParamSpec] {
            PARAMS
        }

        fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
            let (input, output) = (b.input(), b.output());
            let pass = b.node("passthrough", "prism:nop")?;
            let transform = b.node("transform", "prism:saturation")?;
            b.redirect("amount", transform, "scale")?;
            b.watch(
                "flag",
                vec![Rewire::link(&[input, transform, output])],
                vec![Rewire::link(&[input, pass, output])],
            )
        }
    }

    struct Broken;

    impl MetaOperation for Broken {
        fn info(&self) -> MetaInfo {
            MetaInfo {
                name: "test:broken",
                title: "Broken",
                description: "",
                categories: &[],
            }
        }

        fn params(&self) -> &'static [ParamSpec] {
            PARAMS
        }

        fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
            let nop = b.node("nop", "prism:nop")?;
            b.redirect("amount", nop, "scale")
        }
    }

    #[test]
    fn proxies_exist_before_attach() {
        let wrapper = OperationWrapper::new(Toggle);
        assert_eq!(wrapper.state(), WrapperState::Unattached);
        assert_eq!(wrapper.graph().label(wrapper.input()), Some("input"));
        assert_eq!(wrapper.graph().label(wrapper.output()), Some("output"));
        assert!(wrapper.edges().is_empty());
    }

    #[test]
    fn attach_builds_and_updates() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();
        assert!(wrapper.is_attached());
        assert_eq!(wrapper.graph().node_count(), 4);

        let pass = wrapper.graph().find("passthrough").unwrap();
        assert!(wrapper.graph().has_edge(pass, wrapper.output(), Port::Input));
        assert_eq!(wrapper.redirector().len(), 1);
        assert_eq!(wrapper.switch().len(), 1);
    }

    #[test]
    fn second_attach_is_noop() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();
        let edges = wrapper.edges();
        wrapper.attach(OperationRegistry::global()).unwrap();
        assert_eq!(wrapper.graph().node_count(), 4);
        assert_eq!(wrapper.edges(), edges);
    }

    #[test]
    fn update_before_attach_is_noop() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.set("flag", true.into()).unwrap();
        wrapper.update().unwrap();
        assert!(wrapper.edges().is_empty());
        assert_eq!(wrapper.graph().node_count(), 2);
    }

    #[test]
    fn values_set_before_attach_are_synced() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.set("amount", 4.0.into()).unwrap();
        wrapper.set("flag", true.into()).unwrap();
        wrapper.attach(OperationRegistry::global()).unwrap();

        let transform = wrapper.graph().find("transform").unwrap();
        assert_eq!(
            wrapper.graph().param(transform, "scale"),
            Ok(ParamValue::Double(4.0))
        );
        assert!(
            wrapper
                .graph()
                .has_edge(transform, wrapper.output(), Port::Input)
        );
    }

    #[test]
    fn set_propagates_without_rewiring() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();
        let before = wrapper.edges();

        assert!(wrapper.set("flag", true.into()).unwrap());
        assert!(wrapper.set("amount", 2.5.into()).unwrap());
        assert!(!wrapper.set("amount", 2.5.into()).unwrap());
        assert_eq!(wrapper.edges(), before);

        let transform = wrapper.graph().find("transform").unwrap();
        assert_eq!(
            wrapper.graph().param(transform, "scale"),
            Ok(ParamValue::Double(2.5))
        );
    }

    #[test]
    fn failed_propagation_restores_stored_value() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();

        // A binding into another graph cannot be written.
        let mut foreign = Graph::new();
        let stray = foreign.add_primitive(
            "stray",
            OperationRegistry::global()
                .create("prism:saturation", &[])
                .unwrap(),
        );
        wrapper
            .redirector
            .redirect(&foreign, &PARAMS[1], stray, "scale")
            .unwrap();

        let err = wrapper.set("amount", 5.0.into()).unwrap_err();
        assert_eq!(
            err.graph_error(),
            Some(&GraphError::DanglingNode { node: stray })
        );
        assert_eq!(wrapper.get("amount"), Some(ParamValue::Double(1.0)));
        let transform = wrapper.graph().find("transform").unwrap();
        assert_eq!(
            wrapper.graph().param(transform, "scale"),
            Ok(ParamValue::Double(1.0))
        );
    }

    #[test]
    fn set_rejects_unknown_and_mistyped_values() {
        let mut wrapper = OperationWrapper::new(Toggle);
        let err = wrapper.set("volume", 1.0.into()).unwrap_err();
        assert_eq!(
            err.graph_error(),
            Some(&GraphError::InvalidParameter {
                owner: "test:toggle".to_string(),
                param: "volume".to_string(),
                reason: ParamRejection::Unknown,
            })
        );

        assert!(wrapper.set("flag", 1.0.into()).is_err());
        assert_eq!(wrapper.get("flag"), Some(ParamValue::Bool(false)));
    }

    #[test]
    fn set_many_updates_once() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();
        wrapper
            .set_many(&[("flag", true.into()), ("amount", 9.0.into())])
            .unwrap();
        let transform = wrapper.graph().find("transform").unwrap();
        assert!(
            wrapper
                .graph()
                .has_edge(transform, wrapper.output(), Port::Input)
        );
    }

    #[test]
    fn set_many_checks_every_value_before_writing() {
        let mut wrapper = OperationWrapper::new(Toggle);
        wrapper.attach(OperationRegistry::global()).unwrap();
        let before = wrapper.edges();

        let err = wrapper
            .set_many(&[("flag", true.into()), ("amount", false.into())])
            .unwrap_err();
        assert!(matches!(
            err.graph_error(),
            Some(GraphError::InvalidParameter { param, .. }) if param == "amount"
        ));
        assert!(
            wrapper
                .set_many(&[("flag", true.into()), ("missing", 1.0.into())])
                .is_err()
        );

        assert_eq!(wrapper.get("flag"), Some(ParamValue::Bool(false)));
        assert_eq!(wrapper.edges(), before);
        assert_eq!(wrapper.state(), WrapperState::Attached);
    }

    #[test]
    fn failed_attach_poisons_wrapper() {
        let mut wrapper = OperationWrapper::new(Broken);
        let err = wrapper.attach(OperationRegistry::global()).unwrap_err();
        assert_eq!(err.operation(), "test:broken");
        assert!(matches!(
            err.graph_error(),
            Some(GraphError::UnknownTargetParameter { .. })
        ));
        assert_eq!(wrapper.state(), WrapperState::Failed);

        assert_eq!(
            wrapper.attach(OperationRegistry::global()),
            Err(OperationError::Poisoned {
                operation: "test:broken"
            })
        );
        assert!(wrapper.update().is_err());
        assert!(wrapper.set("amount", 1.0.into()).is_err());
    }

    #[test]
    fn unknown_primitive_fails_attach() {
        struct Missing;
        impl MetaOperation for Missing {
            fn info(&self) -> MetaInfo {
                MetaInfo {
                    name: "test:missing",
                    title: "Missing",
                    description: "",
                    categories: &[],
                }
            }
            fn params(&self) -> &'static [ParamSpec] {
                &[]
            }
            fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
                b.node("blur", "prism:gaussian-blur").map(|_| ())
            }
        }

        let mut wrapper = OperationWrapper::new(Missing);
        let err = wrapper.attach(OperationRegistry::global()).unwrap_err();
        assert_eq!(
            err.graph_error(),
            Some(&GraphError::UnknownOperation {
                operation: "prism:gaussian-blur".to_string()
            })
        );
    }

    #[test]
    fn failing_update_poisons_wrapper() {
        struct LoopOnFlag;
        impl MetaOperation for LoopOnFlag {
            fn info(&self) -> MetaInfo {
                MetaInfo {
                    name: "test:loop-on-flag",
                    title: "Loop",
                    description: "",
                    categories: &[],
                }
            }
            fn params(&self) -> &'static [ParamSpec] {
                PARAMS
            }
            fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
                let a = b.node("a", "prism:nop")?;
                let c = b.node("c", "prism:nop")?;
                b.link(&[a, c])?;
                b.watch("flag", vec![Rewire::link(&[c, a])], vec![])
            }
        }

        let mut wrapper = OperationWrapper::new(LoopOnFlag);
        wrapper.attach(OperationRegistry::global()).unwrap();
        wrapper.set("flag", true.into()).unwrap();
        let err = wrapper.update().unwrap_err();
        assert!(matches!(err.graph_error(), Some(GraphError::Cycle { .. })));
        assert_eq!(wrapper.state(), WrapperState::Failed);
        assert!(wrapper.set("flag", false.into()).is_err());
    }
}
