use glass_core::{ControlChanged, ControlSet, Param};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store in step with its CSS size.
pub fn add_resize_listener(canvas: &web::HtmlCanvasElement) {
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Control overrides from the page URL, e.g. `?count=5&glassColor=%2300ffcc`.
/// Unknown query keys are ignored, malformed values are logged and skipped.
pub fn query_overrides(controls: &ControlSet) -> Vec<ControlChanged> {
    let Some(search) = web::window().and_then(|w| w.location().search().ok()) else {
        return Vec::new();
    };
    let Ok(params) = web::UrlSearchParams::new_with_str(&search) else {
        return Vec::new();
    };
    Param::ALL
        .iter()
        .filter_map(|p| params.get(p.name()).map(|raw| (p.name(), raw)))
        .filter_map(|(name, raw)| match ControlChanged::parse(controls, name, &raw) {
            Ok(ev) => Some(ev),
            Err(e) => {
                log::warn!("[config] ignoring ?{name}={raw}: {e}");
                None
            }
        })
        .collect()
}

/// Whether the browser exposes `navigator.gpu`.
pub fn has_webgpu() -> bool {
    web::window()
        .map(|w| js_sys::Reflect::has(&w.navigator(), &"gpu".into()).unwrap_or(false))
        .unwrap_or(false)
}
