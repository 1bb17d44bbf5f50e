use super::helpers;
use super::meshes::{GpuMesh, MeshBuffers};
use super::targets::RenderTargets;
use super::uniforms::{self, FrameUniforms, InstanceRaw, MaterialUniforms};
use crate::constants::HDR_FORMAT;
use glass_core::{Camera, SceneSnapshot, MAX_CYLINDERS};

/// Pipelines and buffers for the cube and the glass row.
pub(crate) struct ScenePass {
    frame_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    backdrop_layout: wgpu::BindGroupLayout,
    backdrop_bind_group: wgpu::BindGroup,
    cube_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,
    cube_instances: wgpu::Buffer,
    glass_instances: wgpu::Buffer,
    glass_count: u32,
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (std::mem::size_of::<InstanceRaw>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl ScenePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl0"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });
        let backdrop_layout = helpers::texture_sampler_layout(device, "scene_bgl1");

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let material_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("material_uniforms"),
            size: std::mem::size_of::<MaterialUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg0"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
        });
        let backdrop_bind_group = helpers::texture_sampler_group(
            device,
            "scene_bg1",
            &backdrop_layout,
            &targets.backdrop_view,
            sampler,
        );

        // The cube is also drawn into the backdrop, so its layout must not
        // reference the backdrop texture.
        let cube_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_cube"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });
        let glass_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_glass"),
            bind_group_layouts: &[&frame_layout, &backdrop_layout],
            push_constant_ranges: &[],
        });
        let cube_pipeline =
            helpers::make_mesh_pipeline(device, &cube_layout, shader, "fs_cube", HDR_FORMAT, None, true);
        let glass_pipeline = helpers::make_mesh_pipeline(
            device,
            &glass_layout,
            shader,
            "fs_glass",
            HDR_FORMAT,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        Self {
            frame_buffer,
            material_buffer,
            frame_bind_group,
            backdrop_layout,
            backdrop_bind_group,
            cube_pipeline,
            glass_pipeline,
            cube_instances: instance_buffer(device, "cube_instances", 1),
            glass_instances: instance_buffer(device, "glass_instances", MAX_CYLINDERS),
            glass_count: 0,
        }
    }

    /// Call after the backdrop texture has been recreated.
    pub(crate) fn rebind_backdrop(
        &mut self,
        device: &wgpu::Device,
        targets: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) {
        self.backdrop_bind_group = helpers::texture_sampler_group(
            device,
            "scene_bg1",
            &self.backdrop_layout,
            &targets.backdrop_view,
            sampler,
        );
    }

    pub(crate) fn write(
        &mut self,
        queue: &wgpu::Queue,
        snapshot: &SceneSnapshot,
        camera: &Camera,
        elapsed_sec: f32,
        size: (u32, u32),
    ) {
        let frame = FrameUniforms::new(camera, elapsed_sec, size.0, size.1);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));
        let materials = MaterialUniforms::from_snapshot(snapshot);
        queue.write_buffer(&self.material_buffer, 0, bytemuck::bytes_of(&materials));
        let cube = uniforms::cube_instance(snapshot);
        queue.write_buffer(&self.cube_instances, 0, bytemuck::bytes_of(&cube));
        let mut glass = uniforms::cylinder_instances(snapshot, camera.eye);
        glass.truncate(MAX_CYLINDERS);
        if !glass.is_empty() {
            queue.write_buffer(&self.glass_instances, 0, bytemuck::cast_slice(&glass));
        }
        self.glass_count = glass.len() as u32;
    }

    pub(crate) fn draw_cube(&self, pass: &mut wgpu::RenderPass<'_>, meshes: &MeshBuffers) {
        pass.set_pipeline(&self.cube_pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        draw_instanced(pass, &meshes.cube, &self.cube_instances, 1);
    }

    pub(crate) fn draw_glass(&self, pass: &mut wgpu::RenderPass<'_>, meshes: &MeshBuffers) {
        if self.glass_count == 0 {
            return;
        }
        pass.set_pipeline(&self.glass_pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(1, &self.backdrop_bind_group, &[]);
        draw_instanced(pass, &meshes.cylinder, &self.glass_instances, self.glass_count);
    }
}

fn draw_instanced(
    pass: &mut wgpu::RenderPass<'_>,
    mesh: &GpuMesh,
    instances: &wgpu::Buffer,
    count: u32,
) {
    pass.set_vertex_buffer(0, mesh.vertices.slice(..));
    pass.set_vertex_buffer(1, instances.slice(..));
    pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..mesh.index_count, 0, 0..count);
}
