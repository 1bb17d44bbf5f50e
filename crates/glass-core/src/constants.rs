// Shared scene tuning constants used by the core and the web frontend.

// Cube
pub const CUBE_EDGE: f32 = 6.0; // edge length of the glowing cube
pub const CUBE_SPIN_RATE: f32 = 0.1; // radians per second on every axis
pub const CUBE_EMISSIVE_INTENSITY: f32 = 1.0;

// Cylinder row
pub const MAX_CYLINDERS: usize = 20; // upper bound of the `count` control
pub const MIN_SUBDIVISIONS: u32 = 3;
pub const MAX_SUBDIVISIONS: u32 = 64;

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = 100.0;

// Orbit controls
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of pending motion applied per frame
pub const ORBIT_POLAR_EPS: f32 = 1e-3; // keeps the camera off the poles

// Floating tolerance used when comparing snapped control values
pub const VALUE_EPSILON: f32 = 1e-5;
