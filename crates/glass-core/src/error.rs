use thiserror::Error;

/// Schema and configuration errors.
///
/// These surface at startup (schema validation, URL overrides) or when code
/// asks the store for a control that does not exist. None of them are shown to
/// the end user mid-session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown control `{0}`")]
    UnknownControl(String),
    #[error("control `{name}` expects a {expected} value")]
    WrongKind {
        name: String,
        expected: &'static str,
    },
    #[error("control `{name}` has an empty range [{min}, {max}]")]
    InvalidRange { name: String, min: f32, max: f32 },
    #[error("control `{name}` has non-positive step {step}")]
    InvalidStep { name: String, step: f32 },
    #[error("control `{name}` default {value} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("schema is missing control `{0}`")]
    MissingControl(String),
    #[error("control `{0}` is defined twice")]
    DuplicateControl(String),
    #[error("invalid color `{0}`, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("cannot parse `{raw}` for control `{name}`")]
    InvalidValue { name: String, raw: String },
}
