use crate::constants::{MAX_SUBDIVISIONS, MIN_SUBDIVISIONS};
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list, counter-clockwise front faces.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        self.vertices.push(MeshVertex { position, normal });
        (self.vertices.len() - 1) as u32
    }
}

/// Capped cylinder of radius 1 and height 1 centered on the origin, axis +Y,
/// with `subdivisions` radial segments (clamped to the control range).
pub fn unit_cylinder(subdivisions: u32) -> MeshData {
    let segments = subdivisions.clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS);
    let mut mesh = MeshData::default();
    let ring = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        (s, c)
    };

    // Side: one extra column so the seam gets its own normals.
    let side_start = mesh.vertices.len() as u32;
    for i in 0..=segments {
        let (s, c) = ring(i);
        mesh.push([s, -0.5, c], [s, 0.0, c]);
        mesh.push([s, 0.5, c], [s, 0.0, c]);
    }
    for i in 0..segments {
        let a = side_start + i * 2; // bottom i
        let d = a + 1; // top i
        let b = a + 2; // bottom i+1
        let c = a + 3; // top i+1
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    // Caps
    for (y, ny) in [(0.5_f32, 1.0_f32), (-0.5, -1.0)] {
        let center = mesh.push([0.0, y, 0.0], [0.0, ny, 0.0]);
        let rim_start = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let (s, c) = ring(i);
            mesh.push([s, y, c], [0.0, ny, 0.0]);
        }
        for i in 0..segments {
            let p0 = rim_start + i;
            let p1 = p0 + 1;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, p0, p1]);
            } else {
                mesh.indices.extend_from_slice(&[center, p1, p0]);
            }
        }
    }
    mesh
}

/// Cube of edge 1 centered on the origin, four vertices per face.
pub fn unit_cube() -> MeshData {
    let mut mesh = MeshData::default();
    let axes = [
        glam::Vec3::X,
        glam::Vec3::NEG_X,
        glam::Vec3::Y,
        glam::Vec3::NEG_Y,
        glam::Vec3::Z,
        glam::Vec3::NEG_Z,
    ];
    for n in axes {
        let u = n.any_orthonormal_vector();
        let v = n.cross(u);
        let center = n * 0.5;
        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let p = center + u * su + v * sv;
            mesh.push(p.to_array(), n.to_array());
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}
