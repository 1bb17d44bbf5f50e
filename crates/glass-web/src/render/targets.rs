use super::helpers;
use crate::constants::HDR_FORMAT;

const SAMPLED_TARGET: wgpu::TextureUsages =
    wgpu::TextureUsages::RENDER_ATTACHMENT.union(wgpu::TextureUsages::TEXTURE_BINDING);

/// Offscreen targets for the render pipeline.
///
/// - `hdr_*`/`depth_*` hold the full-resolution scene in Rgba16Float.
/// - `bloom_*` are half-res ping-pong buffers for the bright pass and blur.
/// - `backdrop_*` is the square scene-without-glass texture the glass
///   refracts, sized by the `resolution` control.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) backdrop_tex: wgpu::Texture,
    pub(crate) backdrop_view: wgpu::TextureView,
    pub(crate) backdrop_depth: wgpu::Texture,
    pub(crate) backdrop_depth_view: wgpu::TextureView,
    pub(crate) backdrop_size: u32,
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32, backdrop: u32) -> Self {
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, SAMPLED_TARGET);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, "depth", width, height);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, SAMPLED_TARGET);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, SAMPLED_TARGET);
        let (backdrop_tex, backdrop_view) = helpers::create_color_texture(
            device,
            "backdrop",
            backdrop,
            backdrop,
            HDR_FORMAT,
            SAMPLED_TARGET,
        );
        let (backdrop_depth, backdrop_depth_view) =
            helpers::create_depth_texture(device, "backdrop_depth", backdrop, backdrop);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
            backdrop_tex,
            backdrop_view,
            backdrop_depth,
            backdrop_depth_view,
            backdrop_size: backdrop,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for tex in [&self.hdr_tex, &self.depth_tex, &self.bloom_a, &self.bloom_b] {
            tex.destroy();
        }
        (self.hdr_tex, self.hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, SAMPLED_TARGET);
        (self.depth_tex, self.depth_view) =
            helpers::create_depth_texture(device, "depth", width, height);
        let (bw, bh) = bloom_size(width, height);
        (self.bloom_a, self.bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, SAMPLED_TARGET);
        (self.bloom_b, self.bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, SAMPLED_TARGET);
    }

    pub(crate) fn recreate_backdrop(&mut self, device: &wgpu::Device, size: u32) {
        self.backdrop_tex.destroy();
        self.backdrop_depth.destroy();
        (self.backdrop_tex, self.backdrop_view) =
            helpers::create_color_texture(device, "backdrop", size, size, HDR_FORMAT, SAMPLED_TARGET);
        (self.backdrop_depth, self.backdrop_depth_view) =
            helpers::create_depth_texture(device, "backdrop_depth", size, size);
        self.backdrop_size = size;
    }
}
