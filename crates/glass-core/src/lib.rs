pub mod camera;
pub mod color;
pub mod constants;
pub mod controls;
pub mod error;
pub mod events;
pub mod mesh;
pub mod scene;
pub mod update;

pub use camera::*;
pub use color::*;
pub use constants::*;
pub use controls::*;
pub use error::*;
pub use events::*;
pub use scene::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
