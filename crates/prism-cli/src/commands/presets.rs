//! Preset management commands.
//!
//! Provides commands to list, show and save exposed-parameter presets.

use clap::{Args, Subcommand};
use prism_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_user_presets, preset_name_from_path,
    user_presets_dir,
};
use prism_core::ParamValue;

use super::common::{load_preset, parse_key_val};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only presets for this meta-operation
        #[arg(short, long)]
        operation: Option<String>,

        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save exposed-parameter values as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Meta-operation the values belong to
        #[arg(short, long)]
        operation: String,

        /// Parameter value (key=value, repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        sets: Vec<(String, ParamValue)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List {
            operation,
            factory,
            user,
        } => list_presets(operation.as_deref(), factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            operation,
            sets,
            description,
            force,
        } => save_preset(&name, &operation, &sets, description.as_deref(), force),
        PresetsCommand::Paths => show_paths(),
    }
}

fn matches_operation(preset: &Preset, operation: Option<&str>) -> bool {
    operation.is_none_or(|op| preset.operation == op)
}

fn list_presets(operation: Option<&str>, factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets()
            .iter()
            .filter(|p| matches_operation(p, operation))
        {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} {:30} {}", preset.name, preset.operation, desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: prism presets save <name> --operation <op> --set key=value\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) if matches_operation(&preset, operation) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} {:30} {}", name, preset.operation, desc);
                    }
                    Ok(_) => {}
                    Err(_) => {
                        println!("  {:20} (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Operation: {}", preset.operation);
    println!();

    println!("Values ({}):", preset.len());
    for (key, value) in &preset.params {
        println!("  {} = {}", key, value);
    }
    println!();

    match preset.validate() {
        Ok(()) => println!("Valid for {}.", preset.operation),
        Err(e) => println!("Invalid: {e}"),
    }

    Ok(())
}

fn save_preset(
    name: &str,
    operation: &str,
    sets: &[(String, ParamValue)],
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{}.toml", name));

    if preset_path.exists() && !force {
        anyhow::bail!(
            "Preset '{}' already exists. Use --force to overwrite.",
            name
        );
    }

    let mut preset = Preset::new(name, operation);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    for (key, value) in sets {
        preset = preset.with_param(key.as_str(), *value);
    }
    preset.validate()?;
    preset.save(&preset_path)?;

    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("User presets: {}", user_presets_dir().display());
    Ok(())
}
