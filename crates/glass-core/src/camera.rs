//! Camera state shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The frontend feeds pointer and
//! wheel input into [`OrbitControls`] and asks it for a [`Camera`] each frame.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit around a fixed target: drag rotates, wheel zooms, no panning.
///
/// Motion is damped. Input accumulates into pending deltas and every
/// [`OrbitControls::update`] applies a fraction of them, so the camera eases
/// to rest after the pointer is released.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, 0 looks down -Z from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn new(distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            radius: distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE),
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Jump to `distance`, dropping any pending zoom.
    pub fn set_distance(&mut self, distance: f32) {
        self.radius = distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        self.pending_scale = 1.0;
    }

    /// Queue a rotation for a pointer drag of (`dx`, `dy`) pixels on a
    /// viewport `viewport_height` pixels tall. A drag across the full height
    /// turns the camera once around.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * dx / h * ORBIT_ROTATE_SPEED;
        self.pending_phi -= TAU * dy / h * ORBIT_ROTATE_SPEED;
    }

    /// Queue a zoom step for a wheel event. Negative `delta_y` moves closer.
    pub fn zoom(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(ORBIT_ZOOM_SPEED);
        if delta_y < 0.0 {
            self.pending_scale *= step;
        } else if delta_y > 0.0 {
            self.pending_scale /= step;
        }
    }

    /// Advance one frame. Returns true while the camera is still moving.
    pub fn update(&mut self) -> bool {
        self.theta += self.pending_theta * ORBIT_DAMPING;
        self.phi = (self.phi + self.pending_phi * ORBIT_DAMPING)
            .clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
        self.radius =
            (self.radius * self.pending_scale).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let zoomed = (self.pending_scale - 1.0).abs() > 1e-6;
        self.pending_scale = 1.0;
        self.pending_theta *= 1.0 - ORBIT_DAMPING;
        self.pending_phi *= 1.0 - ORBIT_DAMPING;
        zoomed || self.pending_theta.abs() > 1e-5 || self.pending_phi.abs() > 1e-5
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}
