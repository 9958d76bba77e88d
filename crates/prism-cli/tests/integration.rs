//! Integration tests for prism-cli.
//!
//! Tests cover the CLI binary invocation: listing, schemas, graph rendering
//! with overrides and presets, and preset management.

use std::process::{Command, Output};

/// Helper to get the path to the `prism` binary built by cargo.
fn prism_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_prism"))
}

fn run(args: &[&str]) -> Output {
    prism_bin()
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run prism {args:?}: {e}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// `prism ops`
// ---------------------------------------------------------------------------

#[test]
fn cli_ops_lists_meta_operations() {
    let output = run(&["ops"]);
    assert!(output.status.success(), "prism ops failed");
    let stdout = stdout(&output);
    assert!(stdout.contains("Meta-Operations"));
    assert!(stdout.contains("prism:chromatic-aberration"));
    assert!(stdout.contains("prism:holographic-effect"));
}

#[test]
fn cli_ops_primitives_flag_lists_registry() {
    let output = run(&["ops", "--primitives"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("prism:alien-map"));
    assert!(stdout.contains("prism:lens-distortion"));
}

#[test]
fn cli_ops_json_is_parseable() {
    let output = run(&["ops", "--json"]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["meta_operations"].as_array().unwrap().len(), 2);
    assert!(!doc["primitives"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// `prism params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_shows_meta_schema() {
    let output = run(&["params", "prism:holographic-effect"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    for name in ["metallic_effect", "invert", "shadow_threshold", "light_opacity"] {
        assert!(stdout.contains(name), "schema should list '{name}'");
    }
}

#[test]
fn cli_params_shows_primitive_schema() {
    let output = run(&["params", "prism:lens-distortion"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("zoom"));
}

#[test]
fn cli_params_unknown_operation_fails() {
    let output = run(&["params", "prism:sepia-nonexistent"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown operation"));
}

// ---------------------------------------------------------------------------
// `prism graph`
// ---------------------------------------------------------------------------

#[test]
fn cli_graph_text_default() {
    let output = run(&["graph", "prism:chromatic-aberration"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Nodes ("));
    assert!(stdout.contains("Edges ("));
    assert!(stdout.contains("lens_distortion"));
}

#[test]
fn cli_graph_toggle_changes_json_edges() {
    let base = run(&["graph", "prism:holographic-effect", "--format", "json"]);
    let inverted = run(&[
        "graph",
        "prism:holographic-effect",
        "--format",
        "json",
        "--set",
        "invert=true",
    ]);
    assert!(base.status.success() && inverted.status.success());

    let base: serde_json::Value = serde_json::from_slice(&base.stdout).unwrap();
    let inverted: serde_json::Value = serde_json::from_slice(&inverted.stdout).unwrap();
    assert_eq!(base["values"]["invert"], false);
    assert_eq!(inverted["values"]["invert"], true);
    assert_ne!(base["edges"], inverted["edges"]);
    assert_eq!(base["nodes"].as_array().unwrap().len(), 18);
}

#[test]
fn cli_graph_dot_output() {
    let output = run(&["graph", "prism:chromatic-aberration", "-f", "dot"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.starts_with("digraph"));
    assert!(stdout.contains("style=dashed"));
}

#[test]
fn cli_graph_with_factory_preset() {
    let output = run(&[
        "graph",
        "prism:chromatic-aberration",
        "--preset",
        "red_shift",
        "--format",
        "json",
    ]);
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["values"]["red_channel"], true);
    assert_eq!(doc["values"]["distortion_zoom"], 6.0);
}

#[test]
fn cli_graph_rejects_bad_override() {
    let output = run(&["graph", "prism:chromatic-aberration", "--set", "red_channel"]);
    assert!(!output.status.success());

    let output = run(&["graph", "prism:chromatic-aberration", "--set", "no_such=1"]);
    assert!(!output.status.success());

    let output = run(&["graph", "prism:chromatic-aberration", "--set", "red_channel=2.5"]);
    assert!(!output.status.success());
}

#[test]
fn cli_graph_rejects_preset_for_other_operation() {
    let output = run(&[
        "graph",
        "prism:holographic-effect",
        "--preset",
        "red_shift",
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `prism presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_filters_by_operation() {
    let output = run(&[
        "presets",
        "list",
        "--factory",
        "--operation",
        "prism:holographic-effect",
    ]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Inverted Foil"));
    assert!(!stdout.contains("Red Shift"));
}

#[test]
fn cli_presets_show_factory() {
    let output = run(&["presets", "show", "inverted_foil"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Operation: prism:holographic-effect"));
    assert!(stdout.contains("invert = true"));
    assert!(stdout.contains("Valid for"));
}

#[cfg(unix)]
#[test]
fn cli_presets_save_then_use() {
    let home = tempfile::tempdir().unwrap();
    let with_home = |args: &[&str]| {
        prism_bin()
            .args(args)
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"))
            .output()
            .unwrap()
    };

    let saved = with_home(&[
        "presets",
        "save",
        "wide_zoom",
        "--operation",
        "prism:chromatic-aberration",
        "--set",
        "distortion_zoom=12",
        "--set",
        "blue_channel=false",
    ]);
    assert!(saved.status.success(), "{}", String::from_utf8_lossy(&saved.stderr));

    let again = with_home(&[
        "presets",
        "save",
        "wide_zoom",
        "--operation",
        "prism:chromatic-aberration",
    ]);
    assert!(!again.status.success(), "saving over an existing preset needs --force");

    let graph = with_home(&[
        "graph",
        "prism:chromatic-aberration",
        "--preset",
        "wide_zoom",
        "--format",
        "json",
    ]);
    assert!(graph.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&graph.stdout).unwrap();
    assert_eq!(doc["values"]["distortion_zoom"], 12.0);
    assert_eq!(doc["values"]["blue_channel"], false);
}

#[cfg(unix)]
#[test]
fn cli_presets_save_rejects_invalid_values() {
    let home = tempfile::tempdir().unwrap();
    let output = prism_bin()
        .args([
            "presets",
            "save",
            "broken",
            "--operation",
            "prism:chromatic-aberration",
            "--set",
            "distortion_zoom=99",
        ])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
