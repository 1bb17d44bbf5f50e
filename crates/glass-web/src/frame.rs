use crate::panel::{EventQueue, Panel};
use crate::render;
use glass_core::update;
use glass_core::{drain_queue, ControlSet, Dirty, OrbitControls, SceneGraph};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub controls: ControlSet,
    pub graph: SceneGraph,
    pub queue: EventQueue,
    pub panel: Panel,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub gpu: render::GpuState<'a>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    /// Apply queued control changes to the store and the scene graph.
    fn drain_events(&mut self) {
        if self.queue.borrow().is_empty() {
            return;
        }
        let dirty = drain_queue(&mut self.controls, &mut self.queue.borrow_mut());
        if !dirty.is_empty() {
            self.graph.sync(&self.controls, dirty);
            if dirty.contains(Dirty::CAMERA) {
                self.orbit
                    .borrow_mut()
                    .set_distance(self.graph.snapshot().camera_distance);
            }
        }
        self.panel.refresh(&self.controls);
    }

    pub fn frame(&mut self) {
        self.drain_events();

        let elapsed = self.started.elapsed().as_secs_f32();
        update::update(self.graph.snapshot_mut(), &self.controls, elapsed);

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let (w, h) = self.gpu.size();
        let camera = {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update();
            orbit.camera(w as f32 / h.max(1) as f32)
        };

        match self.gpu.render(self.graph.snapshot(), &camera, elapsed) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[render] frame failed: {:?}", e),
        }
    }
}

/// Keeps the panel live when there is no renderer: changes still land in the
/// store and the readouts follow them.
pub struct PanelOnly {
    pub controls: ControlSet,
    pub queue: EventQueue,
    pub panel: Panel,
}

impl PanelOnly {
    pub fn frame(&mut self) {
        if self.queue.borrow().is_empty() {
            return;
        }
        drain_queue(&mut self.controls, &mut self.queue.borrow_mut());
        self.panel.refresh(&self.controls);
    }
}

/// Run `step` once per animation frame for the rest of the session.
pub fn start_loop<F: FnMut() + 'static>(mut step: F) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        step();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
