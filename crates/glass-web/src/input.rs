use glam::Vec2;
use web_sys as web;

// Wheel deltas below this many pixels are trackpad noise.
const WHEEL_DEADZONE_PX: f32 = 0.5;
const WHEEL_LINE_PX: f32 = 16.0;
const WHEEL_PAGE_PX: f32 = 800.0;

/// Tracks the pointer that is currently orbiting the camera.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = pos;
    }

    /// Movement since the previous event from the dragging pointer.
    /// Other pointers and hover moves yield `None`.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// Convert a wheel delta to pixels, honouring `deltaMode`.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        web::WheelEvent::DOM_DELTA_LINE => WHEEL_LINE_PX,
        web::WheelEvent::DOM_DELTA_PAGE => WHEEL_PAGE_PX,
        _ => 1.0,
    };
    let px = delta_y as f32 * scale;
    if px.abs() < WHEEL_DEADZONE_PX {
        0.0
    } else {
        px
    }
}

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
