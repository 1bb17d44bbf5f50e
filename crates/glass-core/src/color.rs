use crate::error::ConfigError;
use glam::Vec3;
use std::fmt;

/// 8-bit sRGB color as typed into a color control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let err = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        // `from_str_radix` alone would accept a sign character.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |h: &str| channel(h).map(|v| v * 17);
                Ok(Self::new(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Gamma-encoded channels in [0, 1].
    pub fn to_srgb(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }

    /// Linear-light channels in [0, 1], used for shading and clear colors.
    pub fn to_linear(self) -> Vec3 {
        let s = self.to_srgb();
        Vec3::new(srgb_to_linear(s.x), srgb_to_linear(s.y), srgb_to_linear(s.z))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
