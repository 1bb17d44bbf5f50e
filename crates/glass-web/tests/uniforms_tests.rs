// Host-side tests for uniform and instance packing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod uniforms {
    include!("../src/render/uniforms.rs");
}

use glam::{Mat4, Vec3, Vec4};
use glass_core::{build, update::update, ControlSet, ControlValue, OrbitControls};
use uniforms::*;

fn snapshot() -> glass_core::SceneSnapshot {
    let controls = ControlSet::studio().unwrap();
    let mut snap = build(&controls);
    update(&mut snap, &controls, 0.0);
    snap
}

#[test]
fn layouts_match_the_wgsl_structs() {
    assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
    assert_eq!(std::mem::size_of::<MaterialUniforms>(), 80);
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 112);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 32);
}

#[test]
fn frame_uniforms_carry_camera_and_viewport() {
    let cam = OrbitControls::new(16.8).camera(2.0);
    let u = FrameUniforms::new(&cam, 3.5, 1600, 800);
    assert_eq!(u.view_proj, cam.view_proj().to_cols_array_2d());
    assert!((u.eye[2] - 16.8).abs() < 1e-4);
    assert_eq!(u.eye[3], 3.5);
    assert_eq!(u.viewport[..2], [1600.0, 800.0]);
}

#[test]
fn materials_pack_linear_colors_and_glass_terms() {
    let snap = snapshot();
    let m = MaterialUniforms::from_snapshot(&snap);
    // Pure red channel stays at 1 in linear space, emissive intensity in w.
    assert!((m.cube_color[0] - 1.0).abs() < 1e-6);
    assert_eq!(m.cube_color[3], 1.0);
    // White glass, full transmission.
    for c in m.glass_color {
        assert!((c - 1.0).abs() < 1e-6);
    }
    assert_eq!(m.glass_a, [1.22, 0.35, 1.5, 0.5]);
    assert_eq!(m.glass_b, [0.18, 0.2, 2.8, 0.2]);
    assert_eq!(m.glass_c[0], 16.0);
    assert_eq!(m.glass_c[1], 1.0);
}

#[test]
fn one_instance_per_cylinder() {
    let mut controls = ControlSet::studio().unwrap();
    controls.set("count", ControlValue::Number(3.0)).unwrap();
    let snap = build(&controls);
    let instances = cylinder_instances(&snap, Vec3::new(0.0, 0.0, 16.8));
    assert_eq!(instances.len(), 3);
    for c in &snap.cylinders {
        let m = c.model_matrix(&snap.glass);
        assert!(instances
            .iter()
            .any(|raw| Mat4::from_cols_array_2d(&raw.model) == m));
    }
}

fn world_z(raw: &InstanceRaw) -> f32 {
    Mat4::from_cols_array_2d(&raw.model).w_axis.z
}

#[test]
fn glass_is_drawn_back_to_front() {
    // Turned a quarter around Y the row runs along z, toward the camera.
    let mut controls = ControlSet::studio().unwrap();
    controls.set("glassRotationY", ControlValue::Number(90.0)).unwrap();
    controls.set("glassRotationZ", ControlValue::Number(0.0)).unwrap();
    let snap = build(&controls);

    let front = cylinder_instances(&snap, Vec3::new(0.0, 0.0, 16.8));
    let z: Vec<f32> = front.iter().map(world_z).collect();
    assert_eq!(z.len(), snap.cylinders.len());
    assert!(z.windows(2).all(|w| w[0] <= w[1]), "{z:?}");
    assert!(z[0] < -5.0 && z[z.len() - 1] > 5.0);

    // Orbiting behind the row flips the order.
    let behind = cylinder_instances(&snap, Vec3::new(0.0, 0.0, -16.8));
    let z: Vec<f32> = behind.iter().map(world_z).collect();
    assert!(z.windows(2).all(|w| w[0] >= w[1]), "{z:?}");
}

#[test]
fn normal_matrix_undoes_non_uniform_scale() {
    let model = Mat4::from_scale(Vec3::new(0.5, 20.0, 0.5));
    let raw = InstanceRaw::from_model(model);
    let n = glam::Mat3::from_cols(
        Vec4::from(raw.normal[0]).truncate(),
        Vec4::from(raw.normal[1]).truncate(),
        Vec4::from(raw.normal[2]).truncate(),
    );
    // A side normal keeps pointing sideways after the tall stretch.
    let side = (n * Vec3::new(1.0, 1.0, 0.0)).normalize();
    assert!(side.x > 0.99);

    let flat = InstanceRaw::from_model(Mat4::from_scale(Vec3::ZERO));
    assert_eq!(flat.normal[0], [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn cube_instance_uses_cube_transform() {
    let snap = snapshot();
    let raw = cube_instance(&snap);
    assert_eq!(Mat4::from_cols_array_2d(&raw.model), snap.cube.model_matrix());
}

#[test]
fn post_uniforms_flag_manual_srgb_encoding() {
    let u = PostUniforms::new((640, 360), [1.0, 0.0], true);
    assert_eq!(u.resolution, [640.0, 360.0]);
    assert_eq!(u.blur_dir, [1.0, 0.0]);
    assert_eq!(u.encode_srgb, 1.0);
    assert_eq!(u.bloom_strength, BLOOM_STRENGTH);
    assert_eq!(PostUniforms::new((1, 1), [0.0, 0.0], false).encode_srgb, 0.0);
}
