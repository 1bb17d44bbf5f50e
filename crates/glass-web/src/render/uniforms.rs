// GPU-side layouts of the scene and post uniforms plus per-instance data.
//
// Packing is pure so it can be checked on the host; the structs mirror the
// WGSL declarations in `scene.wgsl` and `post.wgsl` field for field.

use glam::{Mat3, Mat4, Vec3};
use glass_core::{Camera, SceneSnapshot};

// Bloom and tone mapping
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 1.0;
pub const EXPOSURE: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],      // w: elapsed seconds
    pub viewport: [f32; 4], // xy: render target size in pixels
}

impl FrameUniforms {
    pub fn new(camera: &Camera, elapsed_sec: f32, width: u32, height: u32) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.extend(elapsed_sec).to_array(),
            viewport: [width as f32, height as f32, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub cube_color: [f32; 4],
    pub glass_color: [f32; 4],
    pub glass_a: [f32; 4],
    pub glass_b: [f32; 4],
    pub glass_c: [f32; 4],
}

impl MaterialUniforms {
    /// Colors are converted to linear; glass terms come from the first
    /// cylinder since the row shares one material.
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Self {
        let cube = &snapshot.cube;
        let mut out = Self {
            cube_color: cube.color.to_linear().extend(cube.emissive_intensity).to_array(),
            ..<Self as bytemuck::Zeroable>::zeroed()
        };
        if let Some(glass) = snapshot.cylinders.first().map(|c| &c.material) {
            out.glass_color = glass.color.to_linear().extend(glass.transmission).to_array();
            out.glass_a = [glass.thickness, glass.roughness, glass.ior, glass.reflectivity];
            out.glass_b = [
                glass.clearcoat,
                glass.clearcoat_roughness,
                glass.env_map_intensity,
                glass.chromatic_aberration,
            ];
            out.glass_c = [snapshot.quality.samples as f32, glass.opacity, 0.0, 0.0];
        }
        out
    }
}

/// Model matrix plus the inverse-transpose for normals; cylinders are scaled
/// non-uniformly so the two differ.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
}

impl InstanceRaw {
    pub fn from_model(model: Mat4) -> Self {
        let m3 = Mat3::from_mat4(model);
        let normal = if m3.determinant().abs() > f32::EPSILON {
            m3.inverse().transpose()
        } else {
            Mat3::IDENTITY
        };
        Self {
            model: model.to_cols_array_2d(),
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
        }
    }
}

/// Glass instances ordered back to front as seen from `eye`, so blended
/// cylinders composite over the ones behind them.
pub fn cylinder_instances(snapshot: &SceneSnapshot, eye: Vec3) -> Vec<InstanceRaw> {
    let mut keyed: Vec<(f32, InstanceRaw)> = snapshot
        .cylinders
        .iter()
        .map(|c| {
            let model = c.model_matrix(&snapshot.glass);
            let depth = model.w_axis.truncate().distance_squared(eye);
            (depth, InstanceRaw::from_model(model))
        })
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, raw)| raw).collect()
}

#[inline]
pub fn cube_instance(snapshot: &SceneSnapshot) -> InstanceRaw {
    InstanceRaw::from_model(snapshot.cube.model_matrix())
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
    pub exposure: f32,
    pub encode_srgb: f32,
}

impl PostUniforms {
    pub fn new(bloom_size: (u32, u32), blur_dir: [f32; 2], encode_srgb: bool) -> Self {
        Self {
            resolution: [bloom_size.0 as f32, bloom_size.1 as f32],
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            exposure: EXPOSURE,
            encode_srgb: if encode_srgb { 1.0 } else { 0.0 },
        }
    }
}
