use crate::foundation::error::{DotfieldError, DotfieldResult};

pub use kurbo::{Affine, Line, Point, Vec2};

/// Backing-store dimensions of a drawing surface in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size from device-pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a logical (CSS pixel) box into backing-store pixels.
    ///
    /// Fractional results truncate, matching how a canvas stores its integer
    /// `width`/`height` attributes.
    pub fn from_logical(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        fn to_device(v: f64, dpr: f64) -> u32 {
            let px = v * dpr;
            if px.is_finite() && px > 0.0 {
                px.min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }

        Self {
            width: to_device(width, device_pixel_ratio),
            height: to_device(height, device_pixel_ratio),
        }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight-alpha RGBA8 colour.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or the short `#RGB` form.
    pub fn from_hex(s: &str) -> DotfieldResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| DotfieldError::validation(format!("colour '{s}' must start with '#'")))?;

        let nibble = |c: u8| -> DotfieldResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| DotfieldError::validation(format!("colour '{s}' is not hex")))
        };
        let byte = |i: usize| -> DotfieldResult<u8> {
            let bytes = hex.as_bytes();
            Ok((nibble(bytes[i])? << 4) | nibble(bytes[i + 1])?)
        };

        match hex.len() {
            3 => {
                let bytes = hex.as_bytes();
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(DotfieldError::validation(format!(
                "colour '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Scale the alpha channel by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * opacity).round() as u8,
            ..self
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = DotfieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
