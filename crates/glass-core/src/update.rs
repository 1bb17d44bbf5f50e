use crate::constants::CUBE_SPIN_RATE;
use crate::controls::{ControlSet, Param};
use crate::scene::SceneSnapshot;
use glam::Vec3;

/// Glass group rotation in radians from the `glassRotation*` controls (degrees).
#[inline]
pub fn glass_rotation(controls: &ControlSet) -> Vec3 {
    Vec3::new(
        controls.number(Param::GlassRotationX).to_radians(),
        controls.number(Param::GlassRotationY).to_radians(),
        controls.number(Param::GlassRotationZ).to_radians(),
    )
}

/// Idle spin of the cube; independent of every control.
#[inline]
pub fn cube_rotation(elapsed_sec: f32) -> Vec3 {
    Vec3::splat(elapsed_sec * CUBE_SPIN_RATE)
}

/// Per-frame update: field assignment only, no allocation.
pub fn update(snapshot: &mut SceneSnapshot, controls: &ControlSet, elapsed_sec: f32) {
    snapshot.glass.set_euler(glass_rotation(controls));
    snapshot.cube.rotation = cube_rotation(elapsed_sec);
}
