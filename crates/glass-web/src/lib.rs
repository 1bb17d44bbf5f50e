#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod frame;
mod input;
mod overlay;
mod panel;
mod render;
mod widgets;

use constants::{CANVAS_ID, PANEL_ID};
use frame::{FrameContext, PanelOnly};
use glass_core::{apply_all, ControlSet, OrbitControls, SceneGraph};
use instant::Instant;
use panel::EventQueue;
use render::GpuState;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glass-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    dom::sync_canvas_backing_size(&canvas);
    dom::add_resize_listener(&canvas);

    let mut controls = ControlSet::studio()?;
    let overrides = dom::query_overrides(&controls);
    if !overrides.is_empty() {
        let n = overrides.len();
        apply_all(&mut controls, overrides);
        log::info!("[config] applied {n} URL overrides");
    }
    let graph = SceneGraph::new(&controls);

    let orbit = Rc::new(RefCell::new(OrbitControls::new(
        graph.snapshot().camera_distance,
    )));
    wire_orbit_input(&canvas, orbit.clone())?;

    let queue: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
    let panel_root = document
        .get_element_by_id(PANEL_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{PANEL_ID}"))?;
    let panel = panel::build(&document, &panel_root, &controls, queue.clone())?;

    if !dom::has_webgpu() {
        overlay::show_error(&document, "This demo needs a browser with WebGPU enabled.");
        log::error!("navigator.gpu is missing, running the panel without a renderer");
        start_panel_only(controls, queue, panel);
        return Ok(());
    }
    // Leak a canvas clone to satisfy the 'static lifetime of the surface
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = match GpuState::new(leaked_canvas, graph.snapshot()).await {
        Ok(g) => g,
        Err(e) => {
            overlay::show_error(&document, &format!("WebGPU could not start: {e}"));
            log::error!("GPU init failed: {e:?}");
            start_panel_only(controls, queue, panel);
            return Ok(());
        }
    };
    overlay::hide(&document);

    let ctx = FrameContext {
        canvas,
        controls,
        graph,
        queue,
        panel,
        orbit,
        gpu,
        started: Instant::now(),
    };
    let ctx = Rc::new(RefCell::new(ctx));
    frame::start_loop(move || ctx.borrow_mut().frame());
    log::info!("[init] render loop started");
    Ok(())
}

fn start_panel_only(controls: ControlSet, queue: EventQueue, panel: panel::Panel) {
    let mut ctx = PanelOnly {
        controls,
        queue,
        panel,
    };
    frame::start_loop(move || ctx.frame());
    log::info!("[init] panel loop started without a renderer");
}

/// Drag to orbit, wheel to zoom. Panning is not wired.
fn wire_orbit_input(
    canvas: &web::HtmlCanvasElement,
    orbit: Rc<RefCell<OrbitControls>>,
) -> anyhow::Result<()> {
    let js_err = |e: JsValue| anyhow::anyhow!(format!("{:?}", e));
    let drag = Rc::new(RefCell::new(input::DragState::default()));

    {
        let drag = drag.clone();
        let canvas_c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            let pos = input::pointer_canvas_css(&ev, &canvas_c);
            drag.borrow_mut().begin(ev.pointer_id(), pos);
            let _ = canvas_c.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }
    {
        let drag = drag.clone();
        let orbit = orbit.clone();
        let canvas_c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_css(&ev, &canvas_c);
            if let Some(delta) = drag.borrow_mut().move_to(ev.pointer_id(), pos) {
                let height = canvas_c.client_height() as f32;
                orbit.borrow_mut().rotate_by_pixels(delta.x, delta.y, height);
            }
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas_c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut().end(ev.pointer_id());
            let _ = canvas_c.release_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let px = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
            orbit.borrow_mut().zoom(px);
        }) as Box<dyn FnMut(_)>);
        // Non-passive so the page does not scroll under the canvas
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(js_err)?;
        closure.forget();
    }
    Ok(())
}
