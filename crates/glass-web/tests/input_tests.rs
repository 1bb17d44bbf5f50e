// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_reports_deltas_for_the_captured_pointer_only() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(1, Vec2::new(5.0, 5.0)), None);

    drag.begin(7, Vec2::new(100.0, 50.0));
    assert_eq!(drag.move_to(7, Vec2::new(110.0, 45.0)), Some(Vec2::new(10.0, -5.0)));
    assert_eq!(drag.move_to(3, Vec2::new(0.0, 0.0)), None);
    assert_eq!(drag.move_to(7, Vec2::new(111.0, 45.0)), Some(Vec2::new(1.0, 0.0)));

    drag.end(3);
    assert!(drag.active);
    drag.end(7);
    assert!(!drag.active);
    assert_eq!(drag.move_to(7, Vec2::new(200.0, 45.0)), None);
}

#[test]
fn wheel_deltas_are_normalised_to_pixels() {
    assert_eq!(wheel_delta_px(120.0, web_sys::WheelEvent::DOM_DELTA_PIXEL), 120.0);
    assert_eq!(wheel_delta_px(-3.0, web_sys::WheelEvent::DOM_DELTA_LINE), -48.0);
    assert_eq!(wheel_delta_px(1.0, web_sys::WheelEvent::DOM_DELTA_PAGE), 800.0);
    assert_eq!(wheel_delta_px(0.2, web_sys::WheelEvent::DOM_DELTA_PIXEL), 0.0);
}

#[test]
fn wheel_direction_drives_orbit_zoom() {
    let mut orbit = glass_core::OrbitControls::new(16.8);
    orbit.zoom(wheel_delta_px(-1.0, web_sys::WheelEvent::DOM_DELTA_LINE));
    orbit.update();
    assert!(orbit.distance() < 16.8);

    let before = orbit.distance();
    orbit.zoom(wheel_delta_px(0.1, web_sys::WheelEvent::DOM_DELTA_PIXEL));
    orbit.update();
    assert_eq!(orbit.distance(), before);
}
