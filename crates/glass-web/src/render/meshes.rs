use glass_core::mesh::{unit_cube, unit_cylinder, MeshData};
use glass_core::SceneSnapshot;
use wgpu::util::DeviceExt;

pub(crate) struct GpuMesh {
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn destroy(&self) {
        self.vertices.destroy();
        self.indices.destroy();
    }
}

/// Unit meshes shared by every instance. The cylinder is regenerated only
/// when the snapshot's geometry revision moves.
pub(crate) struct MeshBuffers {
    pub(crate) cube: GpuMesh,
    pub(crate) cylinder: GpuMesh,
    revision: u64,
}

impl MeshBuffers {
    pub(crate) fn new(device: &wgpu::Device, snapshot: &SceneSnapshot) -> Self {
        Self {
            cube: GpuMesh::upload(device, "cube_mesh", &unit_cube()),
            cylinder: GpuMesh::upload(
                device,
                "cylinder_mesh",
                &unit_cylinder(snapshot.subdivisions()),
            ),
            revision: snapshot.geometry_revision,
        }
    }

    pub(crate) fn sync(&mut self, device: &wgpu::Device, snapshot: &SceneSnapshot) {
        if snapshot.geometry_revision == self.revision {
            return;
        }
        let mesh = unit_cylinder(snapshot.subdivisions());
        let fresh = GpuMesh::upload(device, "cylinder_mesh", &mesh);
        std::mem::replace(&mut self.cylinder, fresh).destroy();
        self.revision = snapshot.geometry_revision;
        log::debug!(
            "[render] cylinder mesh regenerated: {} triangles",
            mesh.triangle_count()
        );
    }
}
