//! CLI command implementations.

pub mod common;
pub mod graph;
pub mod ops;
pub mod params;
pub mod presets;
