//! Built-in primitive catalog.
//!
//! These are the host primitives the bundled meta-operations compose. Only
//! their ports and parameter schemas live here; the pixel work belongs to the
//! host's execution engine.

use prism_core::{ParamSpec, Port};

use crate::{OperationCategory, OperationDescriptor};

const MAIN: &[Port] = &[Port::Input];
const MAIN_AUX: &[Port] = &[Port::Input, Port::Aux];

static LENS_DISTORTION: &[ParamSpec] = &[
    ParamSpec::double("main", "Main", 0.0)
        .with_range(-100.0, 100.0)
        .with_description("Amount of second-order distortion"),
    ParamSpec::double("edge", "Edge", 0.0)
        .with_range(-100.0, 100.0)
        .with_description("Amount of fourth-order distortion"),
    ParamSpec::double("zoom", "Zoom", 0.0)
        .with_range(-100.0, 100.0)
        .with_description("Rescale overall image size"),
    ParamSpec::double("x-shift", "Shift X", 0.0).with_range(-100.0, 100.0),
    ParamSpec::double("y-shift", "Shift Y", 0.0).with_range(-100.0, 100.0),
    ParamSpec::double("brighten", "Brighten", 0.0)
        .with_range(-100.0, 100.0)
        .with_description("Adjust brightness in corners"),
];

static ADD: &[ParamSpec] = &[ParamSpec::double("value", "Value", 0.0)
    .with_range(-100.0, 100.0)
    .with_description("Constant added when no aux input is connected")];

static CHANNEL_MIXER: &[ParamSpec] = &[
    ParamSpec::boolean("preserve-luminosity", "Preserve luminosity", false),
    ParamSpec::double("rr-gain", "Red in Red channel", 1.0).with_range(-200.0, 200.0),
    ParamSpec::double("rg-gain", "Green in Red channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("rb-gain", "Blue in Red channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("gr-gain", "Red in Green channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("gg-gain", "Green in Green channel", 1.0).with_range(-200.0, 200.0),
    ParamSpec::double("gb-gain", "Blue in Green channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("br-gain", "Red in Blue channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("bg-gain", "Green in Blue channel", 0.0).with_range(-200.0, 200.0),
    ParamSpec::double("bb-gain", "Blue in Blue channel", 1.0).with_range(-200.0, 200.0),
];

static SATURATION: &[ParamSpec] = &[ParamSpec::double("scale", "Scale", 1.0)
    .with_range(0.0, 10.0)
    .with_description("Scale, strength of effect")];

static ALIEN_MAP: &[ParamSpec] = &[
    ParamSpec::int("color-model", "Color model", 0)
        .with_range(0.0, 1.0)
        .with_description("0 = RGB, 1 = HSL"),
    ParamSpec::double("cpn-1-frequency", "Red frequency", 1.0).with_range(0.0, 20.0),
    ParamSpec::double("cpn-2-frequency", "Green frequency", 1.0).with_range(0.0, 20.0),
    ParamSpec::double("cpn-3-frequency", "Blue frequency", 1.0).with_range(0.0, 20.0),
    ParamSpec::double("cpn-1-phase-shift", "Red phase shift", 0.0).with_range(-180.0, 180.0),
    ParamSpec::double("cpn-2-phase-shift", "Green phase shift", 0.0).with_range(-180.0, 180.0),
    ParamSpec::double("cpn-3-phase-shift", "Blue phase shift", 0.0).with_range(-180.0, 180.0),
    ParamSpec::boolean("cpn-1-keep", "Keep red component", false),
    ParamSpec::boolean("cpn-2-keep", "Keep green component", false),
    ParamSpec::boolean("cpn-3-keep", "Keep blue component", false),
];

static THRESHOLD: &[ParamSpec] = &[
    ParamSpec::double("value", "Low", 0.5)
        .with_range(-200.0, 200.0)
        .with_ui_steps(0.01, 0.1),
    ParamSpec::double("high", "High", 1.0)
        .with_range(-200.0, 200.0)
        .with_ui_steps(0.01, 0.1),
];

static OPACITY: &[ParamSpec] = &[ParamSpec::double("value", "Opacity", 1.0)
    .with_range(-10.0, 10.0)
    .with_ui_steps(0.01, 0.1)
    .with_description("Global opacity value, also used when no aux mask is connected")];

static SVG_BLEND: &[ParamSpec] = &[ParamSpec::boolean("srgb", "sRGB", false)
    .with_description("Blend in perceptual rather than linear space")];

/// Descriptors for every built-in primitive, in registration order.
pub(crate) fn builtin() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor {
            name: "prism:nop",
            title: "No Operation",
            description: "Passes its input through unchanged",
            category: OperationCategory::Utility,
            ports: MAIN,
            params: &[],
        },
        OperationDescriptor {
            name: "prism:lens-distortion",
            title: "Lens Distortion",
            description: "Corrects or applies barrel and pincushion lens distortion",
            category: OperationCategory::Distort,
            ports: MAIN,
            params: LENS_DISTORTION,
        },
        OperationDescriptor {
            name: "prism:add",
            title: "Add",
            description: "Adds aux to input per channel",
            category: OperationCategory::Arithmetic,
            ports: MAIN_AUX,
            params: ADD,
        },
        OperationDescriptor {
            name: "prism:channel-mixer",
            title: "Channel Mixer",
            description: "Remixes the color channels with a 3x3 gain matrix",
            category: OperationCategory::Color,
            ports: MAIN,
            params: CHANNEL_MIXER,
        },
        OperationDescriptor {
            name: "prism:invert-linear",
            title: "Invert",
            description: "Inverts the components in linear light, keeping alpha",
            category: OperationCategory::Color,
            ports: MAIN,
            params: &[],
        },
        OperationDescriptor {
            name: "prism:saturation",
            title: "Saturation",
            description: "Changes the saturation",
            category: OperationCategory::Color,
            ports: MAIN,
            params: SATURATION,
        },
        OperationDescriptor {
            name: "prism:alien-map",
            title: "Alien Map",
            description: "Heavily distorts colors with trigonometric functions",
            category: OperationCategory::Artistic,
            ports: MAIN,
            params: ALIEN_MAP,
        },
        OperationDescriptor {
            name: "prism:threshold",
            title: "Threshold",
            description: "Pixels inside the range become white, the rest black",
            category: OperationCategory::Color,
            ports: MAIN_AUX,
            params: THRESHOLD,
        },
        OperationDescriptor {
            name: "prism:opacity",
            title: "Opacity",
            description: "Scales alpha by the aux mask or the value parameter",
            category: OperationCategory::Transparency,
            ports: MAIN_AUX,
            params: OPACITY,
        },
        OperationDescriptor {
            name: "svg:src",
            title: "Source",
            description: "Porter-Duff source: aux replaces input",
            category: OperationCategory::Blend,
            ports: MAIN_AUX,
            params: SVG_BLEND,
        },
        OperationDescriptor {
            name: "svg:darken",
            title: "Darken",
            description: "Keeps the darker of input and aux per channel",
            category: OperationCategory::Blend,
            ports: MAIN_AUX,
            params: SVG_BLEND,
        },
        OperationDescriptor {
            name: "svg:lighten",
            title: "Lighten",
            description: "Keeps the lighter of input and aux per channel",
            category: OperationCategory::Blend,
            ports: MAIN_AUX,
            params: SVG_BLEND,
        },
    ]
}
