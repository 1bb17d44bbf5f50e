mod helpers;
mod meshes;
mod post;
mod scene_pass;
mod targets;
pub mod uniforms;

use glass_core::{Camera, Rgb, SceneSnapshot, POST_WGSL, SCENE_WGSL};
use web_sys as web;

use crate::constants::HDR_FORMAT;
use meshes::MeshBuffers;
use post::{PostBindGroups, PostResources};
use scene_pass::ScenePass;
use targets::RenderTargets;

fn clear_color(c: Rgb) -> wgpu::Color {
    let lin = c.to_linear();
    wgpu::Color {
        r: lin.x as f64,
        g: lin.y as f64,
        b: lin.z as f64,
        a: 1.0,
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // Composite writes sRGB by hand when the canvas format is linear
    encode_srgb: bool,

    scene: ScenePass,
    meshes: MeshBuffers,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        snapshot: &SceneSnapshot,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {width}x{height} {format:?}");

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene.wgsl"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post.wgsl"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let targets = RenderTargets::new(&device, width, height, snapshot.quality.resolution);
        let scene = ScenePass::new(&device, &scene_shader, &targets, &linear_sampler);
        let meshes = MeshBuffers::new(&device, snapshot);
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let post_groups = post.bind_groups(&device, &targets, &linear_sampler);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            encode_srgb: !format.is_srgb(),
            scene,
            meshes,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            self.post_groups = self
                .post
                .bind_groups(&self.device, &self.targets, &self.linear_sampler);
        }
    }

    /// Reconfigure the surface after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn sync_backdrop(&mut self, size: u32) {
        if size == self.targets.backdrop_size || size == 0 {
            return;
        }
        self.targets.recreate_backdrop(&self.device, size);
        self.scene
            .rebind_backdrop(&self.device, &self.targets, &self.linear_sampler);
        log::debug!("[render] backdrop resized to {size}x{size}");
    }

    pub fn render(
        &mut self,
        snapshot: &SceneSnapshot,
        camera: &Camera,
        elapsed_sec: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.meshes.sync(&self.device, snapshot);
        self.sync_backdrop(snapshot.quality.resolution);
        self.scene
            .write(&self.queue, snapshot, camera, elapsed_sec, (self.width, self.height));
        let bloom_size = targets::bloom_size(self.width, self.height);
        self.post
            .write_uniforms(&self.queue, bloom_size, self.encode_srgb);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let background = clear_color(snapshot.background);

        // Pass 1: everything behind the glass -> backdrop
        {
            let mut rpass = begin_mesh_pass(
                &mut encoder,
                "backdrop_pass",
                &self.targets.backdrop_view,
                &self.targets.backdrop_depth_view,
                background,
            );
            self.scene.draw_cube(&mut rpass, &self.meshes);
        }

        // Pass 2: cube, then glass refracting the backdrop -> hdr
        {
            let mut rpass = begin_mesh_pass(
                &mut encoder,
                "scene_pass",
                &self.targets.hdr_view,
                &self.targets.depth_view,
                background,
            );
            self.scene.draw_cube(&mut rpass, &self.meshes);
            self.scene.draw_glass(&mut rpass, &self.meshes);
        }

        // Pass 3: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        // Pass 4: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        // Pass 5: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Pass 6: tone map scene + bloom -> swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            background,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn begin_mesh_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    color: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Discard,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}
