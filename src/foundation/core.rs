use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ScrollworkError, ScrollworkResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with positive, finite dimensions.
    pub fn new(width: f64, height: f64) -> ScrollworkResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ScrollworkError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Straight-alpha RGBA8 color (CSS `rgba()` semantics).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
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
    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Opaque white.
    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ScrollworkResult<Self> {
        let hex = s.trim().strip_prefix('#').ok_or_else(|| {
            ScrollworkError::validation(format!("color '{s}' must start with '#'"))
        })?;

        let nibble = |c: u8| -> ScrollworkResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ScrollworkError::validation(format!("invalid hex digit in '{s}'")))
        };
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> ScrollworkResult<u8> {
            Ok(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?)
        };

        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, 255))
            }
            6 => Ok(Self::new(pair(0)?, pair(2)?, pair(4)?, 255)),
            8 => Ok(Self::new(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => Err(ScrollworkError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Build a color from a CSS-style alpha fraction in `[0, 1]`.
    pub fn with_alpha_f64(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// A length as written in a reveal recipe, resolved to pixels at mount time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percentage of the viewport height.
    Vh(f64),
    /// Percentage of the target element's own height.
    Percent(f64),
}

impl Length {
    /// Resolve to pixels for a given viewport and target element height.
    pub fn resolve(self, viewport: Viewport, element_height: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vh(v) => viewport.height * v / 100.0,
            Self::Percent(v) => element_height * v / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> ScrollworkResult<Self> {
        let s = s.trim();
        let parse = |num: &str| -> ScrollworkResult<f64> {
            num.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ScrollworkError::validation(format!("invalid length '{s}'")))
        };

        if let Some(num) = s.strip_suffix("px") {
            Ok(Self::Px(parse(num)?))
        } else if let Some(num) = s.strip_suffix("vh") {
            Ok(Self::Vh(parse(num)?))
        } else if let Some(num) = s.strip_suffix('%') {
            Ok(Self::Percent(parse(num)?))
        } else {
            Ok(Self::Px(parse(s)?))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
