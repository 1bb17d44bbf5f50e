//! Control schema and the parameter store.
//!
//! Every adjustable value in the scene is a [`Control`]: a named slider with a
//! range and step, or a color swatch. The [`ControlSet`] owns all of them in
//! panel order and is the only place their values live. Writes go through
//! [`ControlSet::set`], which clamps and snaps instead of rejecting, and
//! reports what the change invalidates as a [`Dirty`] mask.

use crate::color::Rgb;
use crate::constants::VALUE_EPSILON;
use crate::error::ConfigError;
use std::ops::{BitOr, BitOrAssign};

/// Panel folder a control is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Scene,
    Glass,
    Cylinder,
    GlassRotation,
    Performance,
}

impl Group {
    pub const ALL: [Group; 5] = [
        Group::Scene,
        Group::Glass,
        Group::Cylinder,
        Group::GlassRotation,
        Group::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Group::Scene => "Scene",
            Group::Glass => "Glass",
            Group::Cylinder => "Cylinder",
            Group::GlassRotation => "Glass Rotation",
            Group::Performance => "Performance",
        }
    }
}

/// Every parameter the scene reads. The string names are the keys the panel,
/// the URL overrides and [`ControlSet::get`] use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    BackgroundColor,
    CubeColor,
    CubeZ,
    GlassZ,
    CameraZ,
    Transmission,
    Thickness,
    Roughness,
    Clearcoat,
    ClearcoatRoughness,
    Ior,
    Reflectivity,
    EnvMapIntensity,
    GlassColor,
    ChromaticAberration,
    Count,
    Radius,
    Height,
    Subdivisions,
    GlassRotationX,
    GlassRotationY,
    GlassRotationZ,
    Samples,
    Resolution,
}

impl Param {
    pub const COUNT: usize = 24;

    pub const ALL: [Param; Param::COUNT] = [
        Param::BackgroundColor,
        Param::CubeColor,
        Param::CubeZ,
        Param::GlassZ,
        Param::CameraZ,
        Param::Transmission,
        Param::Thickness,
        Param::Roughness,
        Param::Clearcoat,
        Param::ClearcoatRoughness,
        Param::Ior,
        Param::Reflectivity,
        Param::EnvMapIntensity,
        Param::GlassColor,
        Param::ChromaticAberration,
        Param::Count,
        Param::Radius,
        Param::Height,
        Param::Subdivisions,
        Param::GlassRotationX,
        Param::GlassRotationY,
        Param::GlassRotationZ,
        Param::Samples,
        Param::Resolution,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Param::BackgroundColor => "backgroundColor",
            Param::CubeColor => "cubeColor",
            Param::CubeZ => "cubeZ",
            Param::GlassZ => "glassZ",
            Param::CameraZ => "cameraZ",
            Param::Transmission => "transmission",
            Param::Thickness => "thickness",
            Param::Roughness => "roughness",
            Param::Clearcoat => "clearcoat",
            Param::ClearcoatRoughness => "clearcoatRoughness",
            Param::Ior => "ior",
            Param::Reflectivity => "reflectivity",
            Param::EnvMapIntensity => "envMapIntensity",
            Param::GlassColor => "glassColor",
            Param::ChromaticAberration => "chromaticAberration",
            Param::Count => "count",
            Param::Radius => "radius",
            Param::Height => "height",
            Param::Subdivisions => "subdivisions",
            Param::GlassRotationX => "glassRotationX",
            Param::GlassRotationY => "glassRotationY",
            Param::GlassRotationZ => "glassRotationZ",
            Param::Samples => "samples",
            Param::Resolution => "resolution",
        }
    }

    pub fn from_name(name: &str) -> Option<Param> {
        Param::ALL.iter().copied().find(|p| p.name() == name)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn is_color(self) -> bool {
        matches!(
            self,
            Param::BackgroundColor | Param::CubeColor | Param::GlassColor
        )
    }

    /// Derived state that must be refreshed when this parameter changes.
    pub fn effect(self) -> Dirty {
        match self {
            Param::Count | Param::Subdivisions => Dirty::STRUCTURE,
            Param::Radius | Param::Height | Param::GlassZ => Dirty::LAYOUT,
            Param::Transmission
            | Param::Thickness
            | Param::Roughness
            | Param::Clearcoat
            | Param::ClearcoatRoughness
            | Param::Ior
            | Param::Reflectivity
            | Param::EnvMapIntensity
            | Param::GlassColor
            | Param::ChromaticAberration => Dirty::MATERIAL,
            Param::CubeColor | Param::CubeZ => Dirty::CUBE,
            Param::BackgroundColor => Dirty::BACKGROUND,
            Param::CameraZ => Dirty::CAMERA,
            Param::GlassRotationX | Param::GlassRotationY | Param::GlassRotationZ => {
                Dirty::ROTATION
            }
            Param::Samples | Param::Resolution => Dirty::QUALITY,
        }
    }
}

/// Bit set of derived state invalidated by control changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dirty(u8);

impl Dirty {
    pub const NONE: Dirty = Dirty(0);
    /// Instance list or cylinder mesh must be rebuilt.
    pub const STRUCTURE: Dirty = Dirty(1 << 0);
    /// Positions or geometry scale of existing instances.
    pub const LAYOUT: Dirty = Dirty(1 << 1);
    pub const MATERIAL: Dirty = Dirty(1 << 2);
    pub const CUBE: Dirty = Dirty(1 << 3);
    pub const BACKGROUND: Dirty = Dirty(1 << 4);
    pub const CAMERA: Dirty = Dirty(1 << 5);
    pub const ROTATION: Dirty = Dirty(1 << 6);
    pub const QUALITY: Dirty = Dirty(1 << 7);
    pub const ALL: Dirty = Dirty(u8::MAX);

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn contains(self, other: Dirty) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Dirty) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Dirty {
    type Output = Dirty;
    fn bitor(self, rhs: Dirty) -> Dirty {
        Dirty(self.0 | rhs.0)
    }
}

impl BitOrAssign for Dirty {
    fn bitor_assign(&mut self, rhs: Dirty) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Slider { min: f32, max: f32, step: f32 },
    Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Color(Rgb),
}

impl ControlValue {
    pub fn as_number(self) -> Option<f32> {
        match self {
            ControlValue::Number(v) => Some(v),
            ControlValue::Color(_) => None,
        }
    }

    pub fn as_color(self) -> Option<Rgb> {
        match self {
            ControlValue::Color(c) => Some(c),
            ControlValue::Number(_) => None,
        }
    }
}

/// Static definition of one control, as listed in the schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSpec {
    pub name: &'static str,
    pub group: Group,
    pub kind: ControlKind,
    pub default: ControlValue,
}

impl ControlSpec {
    pub const fn slider(
        name: &'static str,
        group: Group,
        default: f32,
        min: f32,
        max: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            group,
            kind: ControlKind::Slider { min, max, step },
            default: ControlValue::Number(default),
        }
    }

    pub const fn color(name: &'static str, group: Group, default: Rgb) -> Self {
        Self {
            name,
            group,
            kind: ControlKind::Color,
            default: ControlValue::Color(default),
        }
    }
}

/// Schema of the studio scene, in panel order.
pub fn studio_specs() -> Vec<ControlSpec> {
    use Group::*;
    vec![
        ControlSpec::color("backgroundColor", Scene, Rgb::new(0x07, 0x07, 0x08)),
        ControlSpec::color("cubeColor", Scene, Rgb::new(0xff, 0x30, 0x30)),
        ControlSpec::slider("cubeZ", Scene, -9.6, -15.0, 0.0, 0.1),
        ControlSpec::slider("glassZ", Scene, 0.02, -1.0, 1.0, 0.01),
        ControlSpec::slider("cameraZ", Scene, 16.8, 10.0, 30.0, 0.1),
        ControlSpec::slider("transmission", Glass, 1.0, 0.0, 1.0, 0.01),
        ControlSpec::slider("thickness", Glass, 1.22, 0.0, 5.0, 0.01),
        ControlSpec::slider("roughness", Glass, 0.35, 0.0, 1.0, 0.01),
        ControlSpec::slider("clearcoat", Glass, 0.18, 0.0, 1.0, 0.01),
        ControlSpec::slider("clearcoatRoughness", Glass, 0.2, 0.0, 1.0, 0.01),
        ControlSpec::slider("ior", Glass, 1.5, 1.0, 2.5, 0.01),
        ControlSpec::slider("reflectivity", Glass, 0.5, 0.0, 1.0, 0.01),
        ControlSpec::slider("envMapIntensity", Glass, 2.8, 0.0, 5.0, 0.1),
        ControlSpec::color("glassColor", Glass, Rgb::WHITE),
        ControlSpec::slider("chromaticAberration", Glass, 0.2, 0.0, 4.0, 0.1),
        ControlSpec::slider("count", Cylinder, 10.0, 1.0, 20.0, 1.0),
        ControlSpec::slider("radius", Cylinder, 0.66, 0.1, 1.0, 0.01),
        ControlSpec::slider("height", Cylinder, 29.8, 1.0, 40.0, 0.1),
        ControlSpec::slider("subdivisions", Cylinder, 8.0, 3.0, 64.0, 1.0),
        ControlSpec::slider("glassRotationX", GlassRotation, 0.0, -180.0, 180.0, 1.0),
        ControlSpec::slider("glassRotationY", GlassRotation, 0.0, -180.0, 180.0, 1.0),
        ControlSpec::slider("glassRotationZ", GlassRotation, 41.0, -180.0, 180.0, 1.0),
        ControlSpec::slider("samples", Performance, 16.0, 1.0, 32.0, 1.0),
        ControlSpec::slider("resolution", Performance, 1024.0, 256.0, 2048.0, 256.0),
    ]
}

/// `clamp(round_to_step(v), min, max)`.
#[inline]
pub fn snap_to_step(value: f32, min: f32, max: f32, step: f32) -> f32 {
    ((value / step).round() * step).clamp(min, max)
}

/// One live control: its schema entry plus the current value.
#[derive(Clone, Debug)]
pub struct Control {
    spec: ControlSpec,
    param: Param,
    value: ControlValue,
}

impl Control {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }
    pub fn param(&self) -> Param {
        self.param
    }
    pub fn group(&self) -> Group {
        self.spec.group
    }
    pub fn kind(&self) -> ControlKind {
        self.spec.kind
    }
    pub fn default_value(&self) -> ControlValue {
        self.spec.default
    }
    pub fn value(&self) -> ControlValue {
        self.value
    }

    /// Clamp/snap `value` for this control. `None` when the value has the
    /// wrong kind; non-finite numbers keep the current value.
    fn normalize(&self, value: ControlValue) -> Option<ControlValue> {
        match (self.spec.kind, value) {
            (ControlKind::Slider { min, max, step }, ControlValue::Number(v)) => {
                if v.is_finite() {
                    Some(ControlValue::Number(snap_to_step(v, min, max, step)))
                } else {
                    Some(self.value)
                }
            }
            (ControlKind::Color, ControlValue::Color(c)) => Some(ControlValue::Color(c)),
            _ => None,
        }
    }
}

/// The parameter store: every control of the session, in panel order.
#[derive(Clone, Debug)]
pub struct ControlSet {
    controls: Vec<Control>,
    by_param: [usize; Param::COUNT],
}

impl ControlSet {
    /// Validate `specs` and build a store holding their defaults.
    ///
    /// Fails on duplicate or unknown names, empty ranges, non-positive steps,
    /// out-of-range defaults, kind mismatches, and on any [`Param`] missing
    /// from the schema.
    pub fn new(specs: Vec<ControlSpec>) -> Result<Self, ConfigError> {
        let mut by_param = [usize::MAX; Param::COUNT];
        let mut controls = Vec::with_capacity(specs.len());
        for spec in specs {
            let param = Param::from_name(spec.name)
                .ok_or_else(|| ConfigError::UnknownControl(spec.name.to_string()))?;
            if by_param[param.index()] != usize::MAX {
                return Err(ConfigError::DuplicateControl(spec.name.to_string()));
            }
            validate_spec(param, &spec)?;
            by_param[param.index()] = controls.len();
            controls.push(Control {
                value: spec.default,
                param,
                spec,
            });
        }
        if let Some(missing) = Param::ALL.iter().find(|p| by_param[p.index()] == usize::MAX) {
            return Err(ConfigError::MissingControl(missing.name().to_string()));
        }
        Ok(Self { controls, by_param })
    }

    /// Store for the studio scene with its default values.
    pub fn studio() -> Result<Self, ConfigError> {
        Self::new(studio_specs())
    }

    pub fn get(&self, name: &str) -> Result<ControlValue, ConfigError> {
        let param =
            Param::from_name(name).ok_or_else(|| ConfigError::UnknownControl(name.to_string()))?;
        Ok(self.value(param))
    }

    /// Clamp, snap and store `value`. Returns the derived state the change
    /// invalidates, or [`Dirty::NONE`] when the stored value did not move.
    pub fn set(&mut self, name: &str, value: ControlValue) -> Result<Dirty, ConfigError> {
        let param =
            Param::from_name(name).ok_or_else(|| ConfigError::UnknownControl(name.to_string()))?;
        self.set_param(param, value)
    }

    pub fn set_param(&mut self, param: Param, value: ControlValue) -> Result<Dirty, ConfigError> {
        let control = &mut self.controls[self.by_param[param.index()]];
        let next = control.normalize(value).ok_or(ConfigError::WrongKind {
            name: param.name().to_string(),
            expected: if param.is_color() { "color" } else { "number" },
        })?;
        if same_value(control.value, next) {
            return Ok(Dirty::NONE);
        }
        control.value = next;
        Ok(param.effect())
    }

    /// Parse a raw string (DOM input value, URL override) for `param`.
    pub fn parse_value(&self, param: Param, raw: &str) -> Result<ControlValue, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: param.name().to_string(),
            raw: raw.to_string(),
        };
        match self.control(param).kind() {
            ControlKind::Color => Rgb::from_hex(raw)
                .map(ControlValue::Color)
                .map_err(|_| invalid()),
            ControlKind::Slider { .. } => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ControlValue::Number)
                .ok_or_else(invalid),
        }
    }

    #[inline]
    pub fn control(&self, param: Param) -> &Control {
        &self.controls[self.by_param[param.index()]]
    }

    #[inline]
    pub fn value(&self, param: Param) -> ControlValue {
        self.control(param).value
    }

    /// Numeric value of a slider. Colors read as 0; the schema check in
    /// [`ControlSet::new`] keeps that from happening.
    #[inline]
    pub fn number(&self, param: Param) -> f32 {
        self.value(param).as_number().unwrap_or(0.0)
    }

    /// Slider value rounded to the nearest integer, for count-like controls.
    #[inline]
    pub fn integer(&self, param: Param) -> u32 {
        self.number(param).round().max(0.0) as u32
    }

    #[inline]
    pub fn color(&self, param: Param) -> Rgb {
        self.value(param).as_color().unwrap_or(Rgb::BLACK)
    }

    /// All controls in panel order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    /// Controls grouped by folder, folders in [`Group::ALL`] order, empty
    /// folders skipped.
    pub fn groups(&self) -> Vec<(Group, Vec<&Control>)> {
        Group::ALL
            .iter()
            .map(|&g| (g, self.controls.iter().filter(|c| c.group() == g).collect::<Vec<_>>()))
            .filter(|(_, cs)| !cs.is_empty())
            .collect()
    }
}

fn validate_spec(param: Param, spec: &ControlSpec) -> Result<(), ConfigError> {
    let name = spec.name.to_string();
    match (spec.kind, spec.default) {
        (ControlKind::Slider { min, max, step }, ControlValue::Number(value)) => {
            if param.is_color() {
                return Err(ConfigError::WrongKind {
                    name,
                    expected: "color",
                });
            }
            if !(min < max) {
                return Err(ConfigError::InvalidRange { name, min, max });
            }
            if !(step > 0.0) {
                return Err(ConfigError::InvalidStep { name, step });
            }
            if !(min..=max).contains(&value) {
                return Err(ConfigError::DefaultOutOfRange {
                    name,
                    value,
                    min,
                    max,
                });
            }
            Ok(())
        }
        (ControlKind::Color, ControlValue::Color(_)) if param.is_color() => Ok(()),
        _ => Err(ConfigError::WrongKind {
            name,
            expected: if param.is_color() { "color" } else { "number" },
        }),
    }
}

fn same_value(a: ControlValue, b: ControlValue) -> bool {
    match (a, b) {
        (ControlValue::Number(x), ControlValue::Number(y)) => (x - y).abs() <= VALUE_EPSILON,
        (ControlValue::Color(x), ControlValue::Color(y)) => x == y,
        _ => false,
    }
}
