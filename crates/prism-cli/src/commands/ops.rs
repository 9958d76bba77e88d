//! Operation listing command.

use clap::Args;
use prism_core::Port;
use prism_registry::OperationRegistry;
use serde_json::json;

#[derive(Args)]
pub struct OpsArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,

    /// Also list primitive operations
    #[arg(long)]
    primitives: bool,
}

pub fn run(args: OpsArgs) -> anyhow::Result<()> {
    let metas = prism_ops::infos();
    let registry = OperationRegistry::global();

    if args.json {
        let meta_json: Vec<_> = metas
            .iter()
            .map(|info| {
                json!({
                    "name": info.name,
                    "title": info.title,
                    "description": info.description,
                    "categories": info.categories,
                })
            })
            .collect();
        let primitive_json: Vec<_> = registry
            .all()
            .iter()
            .map(|d| {
                json!({
                    "name": d.name,
                    "title": d.title,
                    "description": d.description,
                    "category": d.category.name(),
                    "ports": d.ports.iter().map(|p| p.name()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let doc = json!({ "meta_operations": meta_json, "primitives": primitive_json });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Meta-Operations");
    println!("===============");
    println!();
    for info in &metas {
        println!("  {:30} - {}", info.name, info.description);
        println!("  {:30}   [{}]", "", info.categories.join(", "));
    }
    println!();

    if args.primitives {
        println!("Primitives");
        println!("==========");
        println!();
        for d in registry.all() {
            let aux = if d.ports.contains(&Port::Aux) { " +aux" } else { "" };
            println!("  {:30} {:12} {}{}", d.name, d.category.name(), d.title, aux);
        }
        println!();
    } else {
        println!("Use 'prism ops --primitives' to list the {} primitives.", registry.len());
    }
    println!("Use 'prism params <name>' for parameter details.");

    Ok(())
}
