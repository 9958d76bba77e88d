//! Prism CLI - inspect meta-operations, their schemas and their wired graphs.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism")]
#[command(author, version, about = "Prism meta-operation inspector", long_about = None)]
struct Cli {
    /// Log graph construction at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List meta-operations and primitives
    Ops(commands::ops::OpsArgs),

    /// Show the parameter schema of an operation
    Params(commands::params::ParamsArgs),

    /// Build an operation and print its wired graph
    Graph(commands::graph::GraphArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ops(args) => commands::ops::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Graph(args) => commands::graph::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
