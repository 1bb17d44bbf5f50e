// DOM wiring and renderer tuning for the web frontend.

// Element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "control-panel";
pub const OVERLAY_ID: &str = "error-overlay";

// Panel layout
pub const PANEL_WIDTH_PX: u32 = 320;
pub const PANEL_BACKGROUND: &str = "#1a1a1a";
pub const PANEL_FONT_PX: u32 = 11;
pub const PANEL_SPACING_PX: u32 = 10;

// Depth buffer
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
// Offscreen HDR color
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
