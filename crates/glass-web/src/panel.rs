//! DOM control panel.
//!
//! One folder per control group, one row per control. Rows never touch the
//! parameter store directly: an `input` event turns into a [`ControlChanged`]
//! on the shared queue and the frame loop applies it.

use crate::constants::{PANEL_BACKGROUND, PANEL_FONT_PX, PANEL_SPACING_PX, PANEL_WIDTH_PX};
use crate::widgets;
use glass_core::{Control, ControlChanged, ControlKind, ControlSet, Param};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type EventQueue = Rc<RefCell<VecDeque<ControlChanged>>>;

struct Field {
    param: Param,
    kind: ControlKind,
    input: web::HtmlInputElement,
    readout: Option<web::Element>,
}

pub struct Panel {
    fields: Vec<Field>,
}

impl Panel {
    /// Write the stored (clamped, snapped) values back into the widgets.
    pub fn refresh(&self, controls: &ControlSet) {
        for field in &self.fields {
            let value = controls.value(field.param);
            let text = widgets::input_value(value);
            if field.input.value() != text {
                field.input.set_value(&text);
            }
            if let Some(readout) = &field.readout {
                readout.set_text_content(Some(&widgets::format_value(value, field.kind)));
            }
        }
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

pub fn build(
    document: &web::Document,
    root: &web::Element,
    controls: &ControlSet,
    queue: EventQueue,
) -> anyhow::Result<Panel> {
    root.set_attribute(
        "style",
        &widgets::panel_style(PANEL_WIDTH_PX, PANEL_BACKGROUND, PANEL_FONT_PX, PANEL_SPACING_PX),
    )
    .map_err(js_err)?;
    root.set_inner_html("");

    let mut fields = Vec::with_capacity(Param::COUNT);
    for (group, members) in controls.groups() {
        let folder = document.create_element("details").map_err(js_err)?;
        folder.set_attribute("open", "").map_err(js_err)?;
        folder.set_class_name("panel-group");
        let summary = document.create_element("summary").map_err(js_err)?;
        summary.set_text_content(Some(group.label()));
        folder.append_child(&summary).map_err(js_err)?;

        for control in members {
            let (row, field) = build_row(document, control, queue.clone())?;
            folder.append_child(&row).map_err(js_err)?;
            fields.push(field);
        }
        root.append_child(&folder).map_err(js_err)?;
    }
    log::info!("[panel] built {} controls", fields.len());
    Ok(Panel { fields })
}

fn build_row(
    document: &web::Document,
    control: &Control,
    queue: EventQueue,
) -> anyhow::Result<(web::Element, Field)> {
    let name = control.name();
    let row = document.create_element("label").map_err(js_err)?;
    row.set_class_name("panel-row");
    row.set_attribute("for", &widgets::input_id(name))
        .map_err(js_err)?;

    let caption = document.create_element("span").map_err(js_err)?;
    caption.set_class_name("panel-name");
    caption.set_text_content(Some(name));
    row.append_child(&caption).map_err(js_err)?;

    let input: web::HtmlInputElement = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    input.set_id(&widgets::input_id(name));
    let kind = control.kind();
    match kind {
        ControlKind::Slider { min, max, step } => {
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
        }
        ControlKind::Color => input.set_type("color"),
    }
    input.set_value(&widgets::input_value(control.value()));
    row.append_child(&input).map_err(js_err)?;

    let readout = match kind {
        ControlKind::Slider { .. } => {
            let span = document.create_element("span").map_err(js_err)?;
            span.set_class_name("panel-value");
            span.set_id(&widgets::readout_id(name));
            span.set_text_content(Some(&widgets::format_value(control.value(), kind)));
            row.append_child(&span).map_err(js_err)?;
            Some(span)
        }
        ControlKind::Color => None,
    };

    let param = control.param();
    let input_c = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        match widgets::value_from_input(kind, &input_c.value()) {
            Some(value) => queue
                .borrow_mut()
                .push_back(ControlChanged::new(param, value)),
            None => log::warn!("[panel] unreadable value for {}", param.name()),
        }
    }) as Box<dyn FnMut(_)>);
    input
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();

    Ok((
        row,
        Field {
            param,
            kind,
            input,
            readout,
        },
    ))
}
