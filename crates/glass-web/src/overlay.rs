use crate::constants::OVERLAY_ID;
use web_sys as web;

/// Replace the page's error overlay text and make it visible.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        el.set_text_content(Some(message));
        let _ = el.class_list().remove_1("hidden");
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.class_list().add_1("hidden");
        let _ = el.set_attribute("style", "display:none");
    }
}
