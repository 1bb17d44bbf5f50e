use crate::controls::{ControlSet, ControlValue, Dirty, Param};
use crate::error::ConfigError;
use std::collections::VecDeque;

/// A control was moved in the panel (or seeded from a URL override).
///
/// UI handlers only ever produce these; the frame loop is the single place
/// that applies them to the [`ControlSet`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlChanged {
    pub param: Param,
    pub value: ControlValue,
}

impl ControlChanged {
    pub fn new(param: Param, value: ControlValue) -> Self {
        Self { param, value }
    }

    pub fn name(&self) -> &'static str {
        self.param.name()
    }

    /// Build an event from a control name and a raw string value.
    pub fn parse(controls: &ControlSet, name: &str, raw: &str) -> Result<Self, ConfigError> {
        let param =
            Param::from_name(name).ok_or_else(|| ConfigError::UnknownControl(name.to_string()))?;
        let value = controls.parse_value(param, raw)?;
        Ok(Self { param, value })
    }

    pub fn apply(&self, controls: &mut ControlSet) -> Result<Dirty, ConfigError> {
        controls.set_param(self.param, self.value)
    }
}

/// Apply every event in order and return the union of what they invalidate.
/// Rejected events are logged and skipped.
pub fn apply_all<I>(controls: &mut ControlSet, events: I) -> Dirty
where
    I: IntoIterator<Item = ControlChanged>,
{
    let mut dirty = Dirty::NONE;
    for ev in events {
        match ev.apply(controls) {
            Ok(d) => dirty |= d,
            Err(e) => log::warn!("[controls] ignored change to {}: {}", ev.name(), e),
        }
    }
    dirty
}

/// Empty `queue` into the store. The queue is left empty even when some
/// events are rejected.
pub fn drain_queue(controls: &mut ControlSet, queue: &mut VecDeque<ControlChanged>) -> Dirty {
    apply_all(controls, queue.drain(..))
}
