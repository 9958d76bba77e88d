//! Graph command: build a meta-operation, apply values, print the wiring.

use clap::{Args, ValueEnum};
use prism_core::{Graph, NodeId, ParamValue};
use prism_meta::OperationWrapper;
use serde_json::{Map, Value, json};

use super::common::{build_wrapper, load_preset, parse_key_val};

/// Output format for the graph command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Human-readable node and edge listing
    #[default]
    Text,
    /// Graphviz dot
    Dot,
    /// JSON document
    Json,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Meta-operation name (e.g. prism:chromatic-aberration)
    #[arg(value_name = "OPERATION")]
    operation: String,

    /// Exposed parameter override (key=value, repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    sets: Vec<(String, ParamValue)>,

    /// Preset name or TOML file applied before the overrides
    #[arg(short, long)]
    preset: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = GraphFormat::Text)]
    format: GraphFormat,

    /// Print every child parameter in text output
    #[arg(long)]
    params: bool,
}

pub fn run(args: GraphArgs) -> anyhow::Result<()> {
    let preset = args.preset.as_deref().map(load_preset).transpose()?;
    let wrapper = build_wrapper(&args.operation, preset.as_ref(), &args.sets)?;

    let rendered = match args.format {
        GraphFormat::Text => render_text(&wrapper, args.params)?,
        GraphFormat::Dot => wrapper.graph().to_dot(wrapper.name()),
        GraphFormat::Json => serde_json::to_string_pretty(&render_json(&wrapper))? + "\n",
    };
    print!("{rendered}");
    Ok(())
}

fn node_operation(graph: &Graph, id: NodeId) -> &'static str {
    graph
        .kind(id)
        .and_then(|kind| kind.operation())
        .unwrap_or("(proxy)")
}

/// Renders values, nodes in evaluation order, then edges.
pub fn render_text(wrapper: &OperationWrapper, show_params: bool) -> anyhow::Result<String> {
    let graph = wrapper.graph();
    let mut out = String::new();
    let info = wrapper.info();

    out.push_str(&format!("{} ({})\n\n", info.title, info.name));

    out.push_str("Values:\n");
    for (spec, value) in wrapper.values().iter() {
        out.push_str(&format!("  {:20} = {}\n", spec.name, value));
    }
    out.push('\n');

    let order = graph.topological_order()?;
    out.push_str(&format!("Nodes ({}):\n", order.len()));
    for id in order {
        out.push_str(&format!(
            "  {:24} {}\n",
            graph.describe(id),
            node_operation(graph, id)
        ));
        if show_params && let Some(params) = graph.params(id) {
            for (spec, value) in params.iter() {
                out.push_str(&format!("      {} = {}\n", spec.name, value));
            }
        }
    }
    out.push('\n');

    let edges = wrapper.edges();
    out.push_str(&format!("Edges ({}):\n", edges.len()));
    for edge in edges {
        out.push_str(&format!(
            "  {} -> {}.{}\n",
            graph.describe(edge.from),
            graph.describe(edge.to),
            edge.port
        ));
    }
    Ok(out)
}

/// Renders the wrapper as a JSON document.
pub fn render_json(wrapper: &OperationWrapper) -> Value {
    let graph = wrapper.graph();

    let values: Map<String, Value> = wrapper
        .values()
        .iter()
        .map(|(spec, value)| (spec.name.to_string(), json!(value)))
        .collect();

    let nodes: Vec<Value> = graph
        .node_ids()
        .map(|id| {
            let params: Map<String, Value> = graph
                .params(id)
                .map(|set| {
                    set.iter()
                        .map(|(spec, value)| (spec.name.to_string(), json!(value)))
                        .collect()
                })
                .unwrap_or_default();
            json!({
                "id": id.index(),
                "label": graph.label(id).unwrap_or_default(),
                "operation": graph.kind(id).and_then(|k| k.operation()),
                "params": params,
            })
        })
        .collect();

    let edges: Vec<Value> = wrapper
        .edges()
        .iter()
        .map(|edge| {
            json!({
                "from": edge.from.index(),
                "to": edge.to.index(),
                "port": edge.port.name(),
            })
        })
        .collect();

    json!({
        "operation": wrapper.name(),
        "values": values,
        "nodes": nodes,
        "edges": edges,
    })
}
