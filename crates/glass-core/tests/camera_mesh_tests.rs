// Host-side tests for the orbit camera and the generated meshes.

use glam::Vec3;
use glass_core::mesh::{unit_cube, unit_cylinder, MeshData};
use glass_core::*;

fn settle(orbit: &mut OrbitControls) {
    for _ in 0..2000 {
        orbit.update();
    }
}

#[test]
fn orbit_starts_on_the_positive_z_axis() {
    let orbit = OrbitControls::new(16.8);
    let eye = orbit.eye();
    assert!(eye.x.abs() < 1e-5);
    assert!(eye.y.abs() < 1e-4);
    assert!((eye.z - 16.8).abs() < 1e-4);
    let cam = orbit.camera(16.0 / 9.0);
    assert!((cam.fovy_radians - 50f32.to_radians()).abs() < 1e-6);
    assert_eq!(cam.target, Vec3::ZERO);
}

#[test]
fn horizontal_drag_orbits_around_target_at_fixed_distance() {
    let mut orbit = OrbitControls::new(16.8);
    orbit.rotate_by_pixels(-200.0, 0.0, 800.0);
    settle(&mut orbit);
    let eye = orbit.eye();
    assert!((eye.length() - 16.8).abs() < 1e-3);
    assert!(eye.x > 1.0, "dragging left swings the camera to +x: {eye:?}");
    assert!(eye.y.abs() < 1e-3);
}

#[test]
fn damping_spreads_motion_over_frames() {
    let mut orbit = OrbitControls::new(10.0);
    orbit.rotate_by_pixels(-100.0, 0.0, 800.0);
    assert!(orbit.update());
    let first = orbit.eye().x;
    settle(&mut orbit);
    let last = orbit.eye().x;
    assert!(first > 0.0 && first < last);
    assert!(!orbit.update());
}

#[test]
fn vertical_drag_stops_short_of_the_poles() {
    let mut orbit = OrbitControls::new(10.0);
    orbit.rotate_by_pixels(0.0, 100_000.0, 800.0);
    settle(&mut orbit);
    let eye = orbit.eye();
    assert!(eye.y < 10.0 && eye.y > 9.99);
    let cam = orbit.camera(1.0);
    assert!(cam.view_proj().is_finite());
}

#[test]
fn wheel_zooms_within_limits() {
    let mut orbit = OrbitControls::new(16.8);
    orbit.zoom(-100.0);
    orbit.update();
    assert!(orbit.distance() < 16.8);
    for _ in 0..500 {
        orbit.zoom(100.0);
        orbit.update();
    }
    assert_eq!(orbit.distance(), CAMERA_MAX_DISTANCE);
    orbit.set_distance(0.01);
    assert_eq!(orbit.distance(), CAMERA_MIN_DISTANCE);
}

fn assert_outward_winding(mesh: &MeshData) {
    for tri in mesh.indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
        let pa = Vec3::from(a.position);
        let face = (Vec3::from(b.position) - pa).cross(Vec3::from(c.position) - pa);
        let normal = Vec3::from(a.normal) + Vec3::from(b.normal) + Vec3::from(c.normal);
        assert!(face.dot(normal) > 0.0, "triangle {tri:?} faces inwards");
    }
}

#[test]
fn cylinder_mesh_counts_follow_subdivisions() {
    for segments in [3, 8, 64] {
        let mesh = unit_cylinder(segments);
        let n = segments as usize;
        assert_eq!(mesh.vertices.len(), 2 * (n + 1) + 2 * (n + 2));
        assert_eq!(mesh.triangle_count(), 2 * n + 2 * n);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
        assert_outward_winding(&mesh);
    }
    // Out-of-range requests are clamped to the control range.
    assert_eq!(unit_cylinder(0).triangle_count(), unit_cylinder(3).triangle_count());
}

#[test]
fn cylinder_mesh_fits_the_unit_box() {
    let mesh = unit_cylinder(16);
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        assert!(p.y.abs() <= 0.5 + 1e-6);
        assert!((p.x * p.x + p.z * p.z).sqrt() <= 1.0 + 1e-5);
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn cube_mesh_is_closed_and_outward() {
    let mesh = unit_cube();
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    for v in &mesh.vertices {
        for c in v.position {
            assert!((c.abs() - 0.5).abs() < 1e-6);
        }
    }
    assert_outward_winding(&mesh);
}
