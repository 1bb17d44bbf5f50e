//! Scene graph built from the control set.
//!
//! [`build`] turns a [`ControlSet`] into a [`SceneSnapshot`]. [`SceneGraph`]
//! owns that snapshot for the session and keeps it in step with the controls:
//! a change to `count` or `subdivisions` rebuilds the cylinder list, anything
//! else is written into the existing instances.

use crate::color::Rgb;
use crate::constants::{CUBE_EDGE, CUBE_EMISSIVE_INTENSITY, MAX_SUBDIVISIONS, MIN_SUBDIVISIONS};
use crate::controls::{ControlSet, Dirty, Param};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// X coordinate of cylinder `index` in a row of `count`, centered on the origin.
#[inline]
pub fn cylinder_x(index: usize, count: usize, radius: f32) -> f32 {
    let offset = index as f32 - (count as f32 - 1.0) / 2.0;
    offset * radius * 2.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderGeometry {
    pub radius: f32,
    pub height: f32,
    pub subdivisions: u32,
}

/// Transmission material shared by every cylinder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassMaterial {
    pub transmission: f32,
    pub thickness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub ior: f32,
    pub reflectivity: f32,
    pub env_map_intensity: f32,
    pub color: Rgb,
    pub chromatic_aberration: f32,
    pub opacity: f32,
}

impl GlassMaterial {
    pub fn from_controls(c: &ControlSet) -> Self {
        Self {
            transmission: c.number(Param::Transmission),
            thickness: c.number(Param::Thickness),
            roughness: c.number(Param::Roughness),
            clearcoat: c.number(Param::Clearcoat),
            clearcoat_roughness: c.number(Param::ClearcoatRoughness),
            ior: c.number(Param::Ior),
            reflectivity: c.number(Param::Reflectivity),
            env_map_intensity: c.number(Param::EnvMapIntensity),
            color: c.color(Param::GlassColor),
            chromatic_aberration: c.number(Param::ChromaticAberration),
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CylinderInstance {
    pub index: usize,
    pub position: Vec3,
    pub geometry: CylinderGeometry,
    pub material: GlassMaterial,
}

impl CylinderInstance {
    /// Object-to-world transform of the unit cylinder mesh, including the
    /// rotation of the enclosing glass group.
    pub fn model_matrix(&self, group: &GlassGroup) -> Mat4 {
        let scale = Vec3::new(
            self.geometry.radius,
            self.geometry.height,
            self.geometry.radius,
        );
        Mat4::from_quat(group.rotation)
            * Mat4::from_scale_rotation_translation(scale, Quat::IDENTITY, self.position)
    }
}

/// Transform shared by all cylinders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassGroup {
    /// Euler angles in radians, XYZ order.
    pub euler: Vec3,
    pub rotation: Quat,
}

impl GlassGroup {
    pub fn set_euler(&mut self, euler: Vec3) {
        self.euler = euler;
        self.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
    }
}

impl Default for GlassGroup {
    fn default() -> Self {
        Self {
            euler: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeInstance {
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
    pub edge: f32,
    pub color: Rgb,
    pub emissive_intensity: f32,
}

impl CubeInstance {
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.edge),
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Settings of the glass refraction pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderQuality {
    /// Refraction taps per fragment.
    pub samples: u32,
    /// Edge length of the square backdrop texture the glass refracts.
    pub resolution: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub glass: GlassGroup,
    pub cylinders: Vec<CylinderInstance>,
    pub cube: CubeInstance,
    pub background: Rgb,
    pub camera_distance: f32,
    pub quality: RenderQuality,
    /// Bumped whenever the cylinder mesh (subdivisions) must be regenerated.
    pub geometry_revision: u64,
}

impl SceneSnapshot {
    pub fn subdivisions(&self) -> u32 {
        self.cylinders
            .first()
            .map(|c| c.geometry.subdivisions)
            .unwrap_or(MIN_SUBDIVISIONS)
    }
}

fn geometry_from(c: &ControlSet) -> CylinderGeometry {
    CylinderGeometry {
        radius: c.number(Param::Radius),
        height: c.number(Param::Height),
        subdivisions: c
            .integer(Param::Subdivisions)
            .clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS),
    }
}

fn cylinders_from(c: &ControlSet) -> Vec<CylinderInstance> {
    let count = c.integer(Param::Count).max(1) as usize;
    let geometry = geometry_from(c);
    let material = GlassMaterial::from_controls(c);
    let z = c.number(Param::GlassZ);
    (0..count)
        .map(|index| CylinderInstance {
            index,
            position: Vec3::new(cylinder_x(index, count, geometry.radius), 0.0, z),
            geometry,
            material,
        })
        .collect()
}

fn cube_from(c: &ControlSet, rotation: Vec3) -> CubeInstance {
    CubeInstance {
        position: Vec3::new(0.0, 0.0, c.number(Param::CubeZ)),
        rotation,
        edge: CUBE_EDGE,
        color: c.color(Param::CubeColor),
        emissive_intensity: CUBE_EMISSIVE_INTENSITY,
    }
}

fn quality_from(c: &ControlSet) -> RenderQuality {
    RenderQuality {
        samples: c.integer(Param::Samples).max(1),
        resolution: c.integer(Param::Resolution).max(1),
    }
}

/// Build a complete snapshot from the current control values.
pub fn build(controls: &ControlSet) -> SceneSnapshot {
    let mut glass = GlassGroup::default();
    glass.set_euler(crate::update::glass_rotation(controls));
    SceneSnapshot {
        glass,
        cylinders: cylinders_from(controls),
        cube: cube_from(controls, Vec3::ZERO),
        background: controls.color(Param::BackgroundColor),
        camera_distance: controls.number(Param::CameraZ),
        quality: quality_from(controls),
        geometry_revision: 0,
    }
}

/// Owner of the live snapshot.
pub struct SceneGraph {
    snapshot: SceneSnapshot,
    rebuilds: u64,
}

impl SceneGraph {
    pub fn new(controls: &ControlSet) -> Self {
        Self {
            snapshot: build(controls),
            rebuilds: 0,
        }
    }

    pub fn snapshot(&self) -> &SceneSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut SceneSnapshot {
        &mut self.snapshot
    }

    /// Number of structural rebuilds since construction.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Refresh the parts of the snapshot named by `dirty`.
    pub fn sync(&mut self, controls: &ControlSet, dirty: Dirty) {
        if dirty.is_empty() {
            return;
        }
        let s = &mut self.snapshot;
        if dirty.contains(Dirty::STRUCTURE) {
            let previous_subdivisions = s.subdivisions();
            // Replacing the vector drops the old instances.
            s.cylinders = cylinders_from(controls);
            if s.subdivisions() != previous_subdivisions {
                s.geometry_revision += 1;
            }
            self.rebuilds += 1;
            log::debug!(
                "[scene] rebuilt {} cylinders ({} subdivisions)",
                s.cylinders.len(),
                s.subdivisions()
            );
        } else {
            if dirty.contains(Dirty::LAYOUT) {
                let count = s.cylinders.len();
                let geometry = geometry_from(controls);
                let z = controls.number(Param::GlassZ);
                for c in &mut s.cylinders {
                    c.geometry = geometry;
                    c.position = Vec3::new(cylinder_x(c.index, count, geometry.radius), 0.0, z);
                }
            }
            if dirty.contains(Dirty::MATERIAL) {
                let material = GlassMaterial::from_controls(controls);
                for c in &mut s.cylinders {
                    c.material = material;
                }
            }
        }
        if dirty.contains(Dirty::CUBE) {
            s.cube = cube_from(controls, s.cube.rotation);
        }
        if dirty.contains(Dirty::BACKGROUND) {
            s.background = controls.color(Param::BackgroundColor);
        }
        if dirty.contains(Dirty::CAMERA) {
            s.camera_distance = controls.number(Param::CameraZ);
        }
        if dirty.contains(Dirty::ROTATION) {
            s.glass.set_euler(crate::update::glass_rotation(controls));
        }
        if dirty.contains(Dirty::QUALITY) {
            s.quality = quality_from(controls);
        }
    }
}
