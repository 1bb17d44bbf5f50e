// Host-side tests for the scene graph builder and the per-frame updater.

use glass_core::update::{cube_rotation, update};
use glass_core::*;

fn store() -> ControlSet {
    ControlSet::studio().expect("studio schema is valid")
}

fn xs(snapshot: &SceneSnapshot) -> Vec<f32> {
    snapshot.cylinders.iter().map(|c| c.position.x).collect()
}

fn set(c: &mut ControlSet, name: &str, v: f32) -> Dirty {
    c.set(name, ControlValue::Number(v)).unwrap()
}

#[test]
fn default_row_spans_plus_minus_5_94() {
    let snap = build(&store());
    assert_eq!(snap.cylinders.len(), 10);
    assert!((snap.cylinders[0].position.x - -5.94).abs() < 1e-4);
    assert!((snap.cylinders[9].position.x - 5.94).abs() < 1e-4);
    for (i, c) in snap.cylinders.iter().enumerate() {
        assert_eq!(c.index, i);
        assert!((c.position.z - 0.02).abs() < 1e-6);
        assert_eq!(c.position.y, 0.0);
    }
}

#[test]
fn row_is_centered_for_any_count() {
    for count in [1, 2, 10, 20] {
        let mut c = store();
        set(&mut c, "count", count as f32);
        let snap = build(&c);
        assert_eq!(snap.cylinders.len(), count);
        let sum: f32 = xs(&snap).iter().sum();
        assert!(sum.abs() < 1e-3, "count {count}: sum {sum}");
    }
    assert_eq!(cylinder_x(0, 1, 0.66), 0.0);
}

#[test]
fn neighbours_touch() {
    let snap = build(&store());
    for pair in snap.cylinders.windows(2) {
        let gap = pair[1].position.x - pair[0].position.x;
        assert!((gap - 2.0 * 0.66).abs() < 1e-4);
    }
}

#[test]
fn build_is_deterministic() {
    let c = store();
    assert_eq!(build(&c), build(&c));
}

#[test]
fn glass_z_change_keeps_instances_in_place() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let before = xs(graph.snapshot());
    let dirty = set(&mut c, "glassZ", -0.5);
    graph.sync(&c, dirty);
    let snap = graph.snapshot();
    assert_eq!(graph.rebuilds(), 0);
    assert_eq!(xs(snap), before);
    for (i, cyl) in snap.cylinders.iter().enumerate() {
        assert_eq!(cyl.index, i);
        assert!((cyl.position.z + 0.5).abs() < 1e-6);
    }
}

#[test]
fn count_change_rebuilds_with_recomputed_positions() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let dirty = set(&mut c, "count", 5.0);
    graph.sync(&c, dirty);
    let snap = graph.snapshot();
    assert_eq!(graph.rebuilds(), 1);
    assert_eq!(snap.cylinders.len(), 5);
    let expected = [-2.64, -1.32, 0.0, 1.32, 2.64];
    for (x, e) in xs(snap).iter().zip(expected) {
        assert!((x - e).abs() < 1e-4, "{x} vs {e}");
    }
    // Mesh is unchanged when only the count moves.
    assert_eq!(snap.geometry_revision, 0);
}

#[test]
fn glass_color_change_is_cosmetic() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let before = xs(graph.snapshot());
    let dirty = c
        .set("glassColor", ControlValue::Color(Rgb::new(0x20, 0xc0, 0xff)))
        .unwrap();
    graph.sync(&c, dirty);
    let snap = graph.snapshot();
    assert_eq!(graph.rebuilds(), 0);
    assert_eq!(snap.cylinders.len(), 10);
    assert_eq!(xs(snap), before);
    assert!(snap
        .cylinders
        .iter()
        .all(|cyl| cyl.material.color == Rgb::new(0x20, 0xc0, 0xff)));
}

#[test]
fn subdivisions_change_bumps_geometry_revision() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let dirty = set(&mut c, "subdivisions", 24.0);
    graph.sync(&c, dirty);
    assert_eq!(graph.rebuilds(), 1);
    assert_eq!(graph.snapshot().geometry_revision, 1);
    assert_eq!(graph.snapshot().subdivisions(), 24);
}

#[test]
fn radius_change_moves_and_rescales_in_place() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let dirty = set(&mut c, "radius", 0.5);
    graph.sync(&c, dirty);
    let snap = graph.snapshot();
    assert_eq!(graph.rebuilds(), 0);
    assert!((snap.cylinders[0].position.x - -4.5).abs() < 1e-4);
    assert!(snap
        .cylinders
        .iter()
        .all(|cyl| (cyl.geometry.radius - 0.5).abs() < 1e-6));
}

#[test]
fn sync_refreshes_cube_background_camera_and_quality() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let mut dirty = set(&mut c, "cubeZ", -12.0);
    dirty |= c
        .set("backgroundColor", ControlValue::Color(Rgb::new(1, 2, 3)))
        .unwrap();
    dirty |= set(&mut c, "cameraZ", 22.0);
    dirty |= set(&mut c, "samples", 4.0);
    graph.sync(&c, dirty);
    let snap = graph.snapshot();
    assert!((snap.cube.position.z + 12.0).abs() < 1e-5);
    assert_eq!(snap.background, Rgb::new(1, 2, 3));
    assert!((snap.camera_distance - 22.0).abs() < 1e-5);
    assert_eq!(snap.quality.samples, 4);
    assert_eq!(snap.quality.resolution, 1024);
}

#[test]
fn cube_spin_ignores_controls() {
    assert_eq!(cube_rotation(0.0), glam::Vec3::ZERO);
    let r = cube_rotation(10.0);
    for a in r.to_array() {
        assert!((a - 1.0).abs() < 1e-6);
    }

    let mut c = store();
    let mut snap = build(&c);
    update(&mut snap, &c, 10.0);
    let default_spin = snap.cube.rotation;
    set(&mut c, "glassRotationX", 90.0);
    set(&mut c, "cubeZ", -1.0);
    update(&mut snap, &c, 10.0);
    assert_eq!(snap.cube.rotation, default_spin);
}

#[test]
fn update_writes_glass_rotation_in_radians() {
    let mut c = store();
    let mut snap = build(&c);
    update(&mut snap, &c, 0.0);
    assert!((snap.glass.euler.z - 41f32.to_radians()).abs() < 1e-6);
    assert_eq!(snap.cube.rotation, glam::Vec3::ZERO);

    set(&mut c, "glassRotationX", -90.0);
    update(&mut snap, &c, 0.0);
    assert!((snap.glass.euler.x + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn cylinder_model_matrix_applies_group_rotation() {
    let mut c = store();
    set(&mut c, "glassRotationZ", 90.0);
    set(&mut c, "count", 2.0);
    let mut snap = build(&c);
    update(&mut snap, &c, 0.0);
    // Rightmost cylinder sits at +x before the group turns it onto +y.
    let m = snap.cylinders[1].model_matrix(&snap.glass);
    let center = m.transform_point3(glam::Vec3::ZERO);
    assert!(center.x.abs() < 1e-4);
    assert!((center.y - 0.66).abs() < 1e-4);
    let top = m.transform_point3(glam::Vec3::new(0.0, 0.5, 0.0));
    assert!((top.x + 29.8 / 2.0).abs() < 1e-3);
}

#[test]
fn cube_model_matrix_scales_to_edge_six() {
    let snap = build(&store());
    let m = snap.cube.model_matrix();
    let corner = m.transform_point3(glam::Vec3::splat(0.5));
    assert!((corner.x - 3.0).abs() < 1e-5);
    assert!((corner.z - (-9.6 + 3.0)).abs() < 1e-4);
}

#[test]
fn rotation_change_reaches_the_group_on_sync() {
    let mut c = store();
    let mut graph = SceneGraph::new(&c);
    let dirty = set(&mut c, "glassRotationY", 90.0);
    assert_eq!(dirty, Dirty::ROTATION);

    graph.sync(&c, dirty);
    let euler = graph.snapshot().glass.euler;
    assert!((euler.y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert!((euler.z - 41f32.to_radians()).abs() < 1e-6);
    assert_eq!(graph.rebuilds(), 0);
}
