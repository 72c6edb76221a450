use crate::foundation::core::{Rgba8, Vec2};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Which representation a property animates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain number.
    Scalar,
    /// RGBA color.
    Color,
    /// Two independent channels.
    Vec2,
}

/// An animated value. Each variant interpolates in its own natural space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Scalar (opacity, offsets, angles, blur radius).
    Scalar(f64),
    /// Color, interpolated component-wise.
    Color(Rgba8),
    /// Compound two-channel value, interpolated per channel.
    Vec2(Vec2),
}

impl Value {
    /// Representation of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Color(_) => ValueKind::Color,
            Self::Vec2(_) => ValueKind::Vec2,
        }
    }

    /// Scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

impl Lerp for Value {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(<f64 as Lerp>::lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(<Rgba8 as Lerp>::lerp(a, b, t)),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(<Vec2 as Lerp>::lerp(a, b, t)),
            // Kinds are checked when segments are added; a stray mismatch steps at the end.
            _ => {
                if t < 1.0 {
                    *a
                } else {
                    *b
                }
            }
        }
    }
}

/// Animatable visual properties of a render target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Depth translation in pixels.
    Z,
    /// Translation as one compound value.
    Translate,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// In-plane rotation in degrees.
    Rotation,
    /// Rotation around the X axis in degrees.
    RotateX,
    /// Rotation around the Y axis in degrees.
    RotateY,
    /// Horizontal skew in degrees.
    SkewX,
    /// Blur radius in pixels.
    Blur,
    /// Foreground color.
    Color,
    /// Bottom border color.
    BorderColor,
}

impl Property {
    /// Value representation expected by this property.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Color | Self::BorderColor => ValueKind::Color,
            Self::Translate => ValueKind::Vec2,
            _ => ValueKind::Scalar,
        }
    }

    /// Return `true` when this property is a length that recipes may express in `vh` or `%`.
    pub fn is_length(self) -> bool {
        matches!(self, Self::X | Self::Y | Self::Z)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
