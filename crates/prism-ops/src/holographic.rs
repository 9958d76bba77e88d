//! Holographic effect.
//!
//! Two alien-map passes give the image a metallic sheen, a third produces
//! the rainbow "holo" layer, and threshold masks composite that layer back
//! into the shadows and the highlights separately.
//!
//! ## Graph
//!
//! ```text
//! input ─▶ metallic_1 ─▶ metallic_2 ─▶ [invert] ─▶ src_holo_1 ─▶ darken ─▶ shadow_opacity
//!   │                                                  ▲ aux        ▲ aux
//!   └─▶ holo ──────────────────────────────────────────┘       shadow_threshold ◀─ src_holo_1
//!
//! shadow_opacity ─▶ src_metal ─▶ shadow ─▶ src_holo_2 ─▶ lighten ─▶ light_opacity
//!                      ▲ aux       ▲ aux       ▲ aux        ▲ aux
//!          metallic_2 / invert  shadow_opacity  holo   light_threshold ◀─ src_holo_1
//!
//! light_opacity ─▶ src_metal_shadows ─▶ light ─▶ output
//!                        ▲ aux            ▲ aux
//!                      shadow        light_opacity
//! ```
//!
//! `invert` toggles whether the metallic layer is inverted: when on, the
//! `invert` node joins the main chain and feeds `src_metal`'s aux input;
//! when off, it is bypassed and left unconnected.

use prism_core::{GraphError, ParamSpec};
use prism_meta::{MetaBuilder, MetaInfo, MetaOperation, Rewire};

const FREQUENCY_MAX: f64 = 20.0;

static PARAMS: &[ParamSpec] = &[
    ParamSpec::double("metallic_effect", "Metallic Effect", 1.5)
        .with_description("Strength of the metallic effect")
        .with_range(0.0, 5.0)
        .with_ui_steps(0.1, 1.0),
    ParamSpec::boolean("invert", "Invert Metallic", false),
    ParamSpec::double("red_frequency", "Red Frequency", 5.0)
        .with_description("Red frequency")
        .with_range(0.0, FREQUENCY_MAX)
        .with_ui_steps(0.1, 1.0)
        .with_ui_digits(1),
    ParamSpec::double("green_frequency", "Green Frequency", 3.0)
        .with_description("Green frequency")
        .with_range(0.0, FREQUENCY_MAX)
        .with_ui_steps(0.1, 1.0),
    ParamSpec::double("blue_frequency", "Blue Frequency", 0.3)
        .with_description("Blue frequency")
        .with_range(0.0, FREQUENCY_MAX)
        .with_ui_steps(0.1, 1.0),
    ParamSpec::double("shadow_threshold", "Shadow Colors Threshold", 0.55)
        .with_description("Presence of color in the shadow areas")
        .with_range(0.0, 1.0)
        .with_ui_steps(0.05, 0.1),
    ParamSpec::double("shadow_opacity", "Shadow Opacity", 1.0)
        .with_range(0.0, 1.0)
        .with_ui_steps(0.05, 0.1),
    ParamSpec::double("light_threshold", "Light Colors Threshold", 0.4)
        .with_description("Presence of color in the light areas")
        .with_range(0.0, 1.0)
        .with_ui_steps(0.05, 0.1),
    ParamSpec::double("light_opacity", "Light Opacity", 0.6)
        .with_range(0.0, 1.0)
        .with_ui_steps(0.05, 0.1),
];

/// Holographic foil look built from alien-map layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HolographicEffect;

impl MetaOperation for HolographicEffect {
    fn info(&self) -> MetaInfo {
        MetaInfo {
            name: "prism:holographic-effect",
            title: "Holographic Effect",
            description: "Holographic effect using alien maps",
            categories: &["Artistic"],
        }
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn attach(&self, b: &mut MetaBuilder<'_>) -> Result<(), GraphError> {
        let (input, output) = (b.input(), b.output());

        let invert = b.node("invert", "prism:invert-linear")?;
        let src_holo_1 = b.node("src_holo_1", "svg:src")?;
        let src_metal = b.node("src_metal", "svg:src")?;
        let src_holo_2 = b.node("src_holo_2", "svg:src")?;
        let src_metal_shadows = b.node("src_metal_shadows", "svg:src")?;
        let darken = b.node("darken", "svg:darken")?;
        let lighten = b.node("lighten", "svg:lighten")?;
        let metallic_1 = b.node("metallic_1", "prism:alien-map")?;
        let metallic_2 = b.node_with(
            "metallic_2",
            "prism:alien-map",
            &[
                ("cpn-1-frequency", 1.0.into()),
                ("cpn-2-frequency", 1.0.into()),
                ("cpn-3-frequency", 1.0.into()),
            ],
        )?;
        let holo = b.node("holo", "prism:alien-map")?;
        let shadow = b.node("shadow", "svg:lighten")?;
        let shadow_threshold = b.node("shadow_threshold", "prism:threshold")?;
        let shadow_opacity = b.node("shadow_opacity", "prism:opacity")?;
        let light = b.node("light", "svg:darken")?;
        let light_threshold = b.node("light_threshold", "prism:threshold")?;
        let light_opacity = b.node("light_opacity", "prism:opacity")?;

        for component in ["cpn-1-frequency", "cpn-2-frequency", "cpn-3-frequency"] {
            b.redirect("metallic_effect", metallic_1, component)?;
        }
        b.redirect("red_frequency", holo, "cpn-1-frequency")?;
        b.redirect("green_frequency", holo, "cpn-2-frequency")?;
        b.redirect("blue_frequency", holo, "cpn-3-frequency")?;
        b.redirect("shadow_threshold", shadow_threshold, "value")?;
        b.redirect("shadow_opacity", shadow_opacity, "value")?;
        b.redirect("light_threshold", light_threshold, "value")?;
        b.redirect("light_opacity", light_opacity, "value")?;

        b.link(&[input, holo])?;
        b.connect_aux(src_holo_1, holo)?;
        b.connect_aux(src_holo_2, holo)?;
        b.link(&[src_holo_1, shadow_threshold])?;
        b.link(&[src_holo_1, light_threshold])?;
        b.connect_aux(darken, shadow_threshold)?;
        b.connect_aux(lighten, light_threshold)?;
        b.connect_aux(shadow, shadow_opacity)?;
        b.connect_aux(src_metal_shadows, shadow)?;
        b.connect_aux(light, light_opacity)?;

        let head = [input, metallic_1, metallic_2];
        let tail = [
            src_holo_1,
            darken,
            shadow_opacity,
            src_metal,
            shadow,
            src_holo_2,
            lighten,
            light_opacity,
            src_metal_shadows,
            light,
            output,
        ];
        let inverted: Vec<_> = head.iter().chain(&[invert]).chain(&tail).copied().collect();
        let direct: Vec<_> = head.iter().chain(&tail).copied().collect();

        b.watch(
            "invert",
            vec![Rewire::Link(inverted), Rewire::aux(src_metal, invert)],
            vec![Rewire::Link(direct), Rewire::aux(src_metal, metallic_2)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{ParamValue, Port};
    use prism_meta::OperationWrapper;
    use prism_registry::OperationRegistry;

    fn attached() -> OperationWrapper {
        let mut op = OperationWrapper::new(HolographicEffect);
        op.attach(OperationRegistry::global()).unwrap();
        op
    }

    #[test]
    fn builds_all_children() {
        let op = attached();
        assert_eq!(op.graph().node_count(), 18);
        assert_eq!(op.schema().len(), 9);
        assert!(op.graph().topological_order().is_ok());
    }

    #[test]
    fn default_bypasses_invert() {
        let op = attached();
        let g = op.graph();
        let id = |label| g.find(label).unwrap();

        assert!(g.has_edge(id("metallic_2"), id("src_holo_1"), Port::Input));
        assert!(g.has_edge(id("metallic_2"), id("src_metal"), Port::Aux));
        assert_eq!(g.source_of(id("invert"), Port::Input), None);
        assert!(g.consumers(id("invert")).is_empty());
        assert!(g.has_edge(id("light"), op.output(), Port::Input));
    }

    #[test]
    fn invert_joins_main_chain() {
        let mut op = attached();
        op.set("invert", true.into()).unwrap();
        op.update().unwrap();

        let g = op.graph();
        let id = |label| g.find(label).unwrap();
        assert!(g.has_edge(id("metallic_2"), id("invert"), Port::Input));
        assert!(g.has_edge(id("invert"), id("src_holo_1"), Port::Input));
        assert!(g.has_edge(id("invert"), id("src_metal"), Port::Aux));
        assert!(!g.has_edge(id("metallic_2"), id("src_metal"), Port::Aux));
    }

    #[test]
    fn invert_round_trip_restores_edges() {
        let mut op = attached();
        let initial = op.edges();
        op.set_many(&[("invert", true.into())]).unwrap();
        op.set_many(&[("invert", false.into())]).unwrap();
        assert_eq!(op.edges(), initial);
    }

    #[test]
    fn metallic_effect_fans_out_to_three_components() {
        let mut op = attached();
        op.set("metallic_effect", 4.25.into()).unwrap();
        let g = op.graph();
        let metallic_1 = g.find("metallic_1").unwrap();
        for component in ["cpn-1-frequency", "cpn-2-frequency", "cpn-3-frequency"] {
            assert_eq!(
                g.param(metallic_1, component),
                Ok(ParamValue::Double(4.25))
            );
        }
        // metallic_2 keeps its construction values.
        let metallic_2 = g.find("metallic_2").unwrap();
        assert_eq!(
            g.param(metallic_2, "cpn-1-frequency"),
            Ok(ParamValue::Double(1.0))
        );
    }

    #[test]
    fn defaults_reach_holo_and_masks() {
        let op = attached();
        let g = op.graph();
        let holo = g.find("holo").unwrap();
        assert_eq!(g.param(holo, "cpn-1-frequency"), Ok(ParamValue::Double(5.0)));
        assert_eq!(g.param(holo, "cpn-2-frequency"), Ok(ParamValue::Double(3.0)));
        assert_eq!(g.param(holo, "cpn-3-frequency"), Ok(ParamValue::Double(0.3)));

        let light_opacity = g.find("light_opacity").unwrap();
        assert_eq!(g.param(light_opacity, "value"), Ok(ParamValue::Double(0.6)));
        let shadow_threshold = g.find("shadow_threshold").unwrap();
        assert_eq!(
            g.param(shadow_threshold, "value"),
            Ok(ParamValue::Double(0.55))
        );
    }

    #[test]
    fn shadow_aux_survives_toggles() {
        let mut op = attached();
        for value in [true, false, true] {
            op.set_many(&[("invert", value.into())]).unwrap();
            let g = op.graph();
            let shadow = g.find("shadow").unwrap();
            let opacity = g.find("shadow_opacity").unwrap();
            assert_eq!(g.source_of(shadow, Port::Aux), Some(opacity));
        }
    }
}
