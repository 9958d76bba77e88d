//! Chromatic aberration.
//!
//! Splits the image into red, green and blue via three channel mixers and
//! recombines them with two `add` nodes. Each channel can be taken either
//! straight from the input or from a zoomed copy produced by lens distortion,
//! so the enabled channels are offset from the others toward the edges.
//!
//! ## Graph
//!
//! ```text
//!            ┌─▶ nop ─────────────┐ (channel off)
//! input ─────┤                    ├──▶ mix_{red,green,blue}
//!            └─▶ lens_distortion ─┘ (channel on)
//!
//! mix_red ──▶ add_green ──▶ add_blue ──▶ output
//!                 ▲ aux          ▲ aux
//!             mix_green      mix_blue
//! ```
//!
//! `lens_distortion` is shared: every enabled channel reads the same
//! distorted copy, scaled by `distortion_zoom`.

use prism_core::{GraphError, ParamSpec};
use prism_meta::{MetaBuilder, MetaInfo, MetaOperation, Rewire};

static PARAMS: &[ParamSpec] = &[
    ParamSpec::boolean("red_channel", "Red Channel", false),
    ParamSpec::boolean("green_channel", "Green Channel", true),
    ParamSpec::boolean("blue_channel", "Blue Channel", true),
    ParamSpec::double("distortion_zoom", "Distortion", 2.0)
        .with_description("Lens zoom distortion value")
        .with_range(0.0, 20.0)
        .with_ui_steps(1.0, 10.0)
        .with_ui_digits(2),
];

/// Per-channel lens-zoom offset.
///
/// ## Parameters
///
/// | Name | Kind | Range | Default |
/// |------|------|-------|---------|
/// | `red_channel` | bool | | false |
/// | `green_channel` | bool | | true |
/// | `blue_channel` | bool | | true |
/// | `distortion_zoom` | double | 0–20 | 2.0 |
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromaticAberration;

impl MetaOperation for ChromaticAberration {
    fn info(&self) -> MetaInfo {
        MetaInfo {
            name: "prism:chromatic-aberration",
            title: "Chromatic Aberration",
            description: "Chromatic aberration using zoom distortion",
            categories: &["Artistic"],
        }
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
        let (input, output) = (b.input(), b.output());

        let nop = b.node("nop", "prism:nop")?;
        let lens = b.node("lens_distortion", "prism:lens-distortion")?;
        let add_green = b.node("add_green", "prism:add")?;
        let add_blue = b.node("add_blue", "prism:add")?;
        let mix_red = b.node_with(
            "mix_red",
            "prism:channel-mixer",
            &[("gg-gain", 0.0.into()), ("bb-gain", 0.0.into())],
        )?;
        let mix_green = b.node_with(
            "mix_green",
            "prism:channel-mixer",
            &[("rr-gain", 0.0.into()), ("bb-gain", 0.0.into())],
        )?;
        let mix_blue = b.node_with(
            "mix_blue",
            "prism:channel-mixer",
            &[("rr-gain", 0.0.into()), ("gg-gain", 0.0.into())],
        )?;

        b.redirect("distortion_zoom", lens, "zoom")?;

        b.connect_aux(add_green, mix_green)?;
        b.connect_aux(add_blue, mix_blue)?;

        b.watch(
            "red_channel",
            vec![Rewire::link(&[input, lens, mix_red, add_green, add_blue, output])],
            vec![Rewire::link(&[input, nop, mix_red, add_green, add_blue, output])],
        )?;
        b.watch(
            "green_channel",
            vec![Rewire::link(&[input, lens, mix_green])],
            vec![Rewire::link(&[input, nop, mix_green])],
        )?;
        b.watch(
            "blue_channel",
            vec![Rewire::link(&[input, lens, mix_blue])],
            vec![Rewire::link(&[input, nop, mix_blue])],
        )
    }
}
