// Host-side tests for the panel's formatting and parsing helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod widgets {
    include!("../src/widgets.rs");
}

use glass_core::{ControlKind, ControlSet, ControlValue, Param, Rgb};
use widgets::*;

fn slider(step: f32) -> ControlKind {
    ControlKind::Slider {
        min: 0.0,
        max: 10.0,
        step,
    }
}

#[test]
fn decimals_follow_the_step() {
    assert_eq!(decimals_for_step(1.0), 0);
    assert_eq!(decimals_for_step(256.0), 0);
    assert_eq!(decimals_for_step(0.1), 1);
    assert_eq!(decimals_for_step(0.01), 2);
    assert_eq!(decimals_for_step(0.001), 3);
    assert_eq!(decimals_for_step(0.0), 0);
}

#[test]
fn readouts_match_every_studio_control() {
    let controls = ControlSet::studio().unwrap();
    let c = controls.control(Param::Radius);
    assert_eq!(format_value(c.value(), c.kind()), "0.66");
    let c = controls.control(Param::Height);
    assert_eq!(format_value(c.value(), c.kind()), "29.8");
    let c = controls.control(Param::Count);
    assert_eq!(format_value(c.value(), c.kind()), "10");
    let c = controls.control(Param::CubeColor);
    assert_eq!(format_value(c.value(), c.kind()), "#ff3030");
}

#[test]
fn input_values_parse_by_kind() {
    assert_eq!(
        value_from_input(slider(0.1), "2.5"),
        Some(ControlValue::Number(2.5))
    );
    assert_eq!(value_from_input(slider(0.1), "NaN"), None);
    assert_eq!(value_from_input(slider(0.1), ""), None);
    assert_eq!(
        value_from_input(ControlKind::Color, "#00ffcc"),
        Some(ControlValue::Color(Rgb::new(0, 0xff, 0xcc)))
    );
    assert_eq!(value_from_input(ControlKind::Color, "teal"), None);
}

#[test]
fn input_value_round_trips_through_the_parser() {
    let controls = ControlSet::studio().unwrap();
    for c in controls.controls() {
        let text = input_value(c.value());
        assert_eq!(value_from_input(c.kind(), &text), Some(c.value()), "{}", c.name());
    }
}

#[test]
fn element_ids_are_derived_from_control_names() {
    assert_eq!(input_id("glassZ"), "ctl-glassZ");
    assert_eq!(readout_id("glassZ"), "ctl-glassZ-value");
}

#[test]
fn panel_style_carries_layout() {
    let s = panel_style(320, "#1a1a1a", 11, 10);
    assert!(s.contains("width:320px"));
    assert!(s.contains("background:#1a1a1a"));
    assert!(s.contains("font-size:11px"));
}
