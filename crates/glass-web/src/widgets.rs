// Pure helpers behind the DOM control panel.
//
// Nothing here touches the DOM, so the panel's formatting and parsing rules
// can be exercised on the host.

use glass_core::{ControlKind, ControlValue, Rgb};

/// Number of decimals a slider with this step needs to show every value.
pub fn decimals_for_step(step: f32) -> usize {
    if step >= 1.0 || step <= 0.0 {
        return 0;
    }
    ((-step.log10()) - 1e-4).ceil().clamp(0.0, 4.0) as usize
}

/// Readout text for a control value.
pub fn format_value(value: ControlValue, kind: ControlKind) -> String {
    match (value, kind) {
        (ControlValue::Number(v), ControlKind::Slider { step, .. }) => {
            format!("{:.*}", decimals_for_step(step), v)
        }
        (ControlValue::Number(v), ControlKind::Color) => format!("{v}"),
        (ControlValue::Color(c), _) => c.to_hex(),
    }
}

/// Parse the `value` of an `<input>` element for a control of this kind.
pub fn value_from_input(kind: ControlKind, raw: &str) -> Option<ControlValue> {
    match kind {
        ControlKind::Slider { .. } => raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ControlValue::Number),
        ControlKind::Color => Rgb::from_hex(raw.trim()).ok().map(ControlValue::Color),
    }
}

/// String to write into the `<input>` element's `value`.
pub fn input_value(value: ControlValue) -> String {
    match value {
        ControlValue::Number(v) => format!("{v}"),
        ControlValue::Color(c) => c.to_hex(),
    }
}

#[inline]
pub fn input_id(name: &str) -> String {
    format!("ctl-{name}")
}

#[inline]
pub fn readout_id(name: &str) -> String {
    format!("ctl-{name}-value")
}

/// Inline style of the panel container.
pub fn panel_style(width_px: u32, background: &str, font_px: u32, spacing_px: u32) -> String {
    format!(
        "width:{width_px}px;min-width:{width_px}px;background:{background};\
         font-size:{font_px}px;padding:{spacing_px}px;box-sizing:border-box;\
         overflow-y:auto;color:#d0d0d0;font-family:ui-monospace,monospace"
    )
}
