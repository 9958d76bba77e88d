//! Parameter schema command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use prism_core::{ParamKind, ParamSpec};
use prism_registry::OperationRegistry;

#[derive(Args)]
pub struct ParamsArgs {
    /// Meta-operation or primitive name
    #[arg(value_name = "OPERATION")]
    operation: String,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let (title, description, schema) = if let Some(op) = prism_ops::find(&args.operation) {
        let info = op.info();
        (info.title, info.description, op.params())
    } else if let Some(d) = OperationRegistry::global().get(&args.operation) {
        (d.title, d.description, d.params)
    } else {
        anyhow::bail!(
            "Unknown operation: {}. Use 'prism ops --primitives' to list operations.",
            args.operation
        );
    };

    println!("{} ({})", title, args.operation);
    println!("{}", "=".repeat(title.len() + args.operation.len() + 3));
    println!();
    println!("{description}");
    println!();

    if schema.is_empty() {
        println!("No parameters.");
        return Ok(());
    }

    println!(
        "  {:20}  {:8}  {:10}  {:18}  {}",
        "Name", "Kind", "Default", "Range", "UI"
    );
    println!(
        "  {:20}  {:8}  {:10}  {:18}  {}",
        "----", "----", "-------", "-----", "--"
    );
    for spec in schema {
        println!(
            "  {:20}  {:8}  {:10}  {:18}  {}",
            spec.name,
            spec.kind.name(),
            spec.default.to_string(),
            range_text(spec),
            ui_text(spec)
        );
    }

    Ok(())
}

fn range_text(spec: &ParamSpec) -> String {
    if spec.kind == ParamKind::Bool || !spec.is_bounded() {
        "-".to_string()
    } else {
        format!("[{}, {}]", spec.min, spec.max)
    }
}

fn ui_text(spec: &ParamSpec) -> String {
    if spec.kind == ParamKind::Bool {
        return String::new();
    }
    let (small, big) = spec.ui_steps;
    match spec.ui_digits {
        Some(digits) => format!("steps {small}/{big}, {digits} digits"),
        None => format!("steps {small}/{big}"),
    }
}
