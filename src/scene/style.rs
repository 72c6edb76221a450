use crate::animation::value::{Property, Value};
use crate::foundation::core::{Affine, Rgba8, Vec2};

/// Visual state of one render target, as last written by the timeline engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Depth translation in pixels.
    pub z: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Horizontal scale multiplier.
    pub scale_x: f64,
    /// Vertical scale multiplier.
    pub scale_y: f64,
    /// In-plane rotation in degrees.
    pub rotation: f64,
    /// X-axis rotation in degrees.
    pub rotate_x: f64,
    /// Y-axis rotation in degrees.
    pub rotate_y: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Foreground color.
    pub color: Rgba8,
    /// Bottom border color.
    pub border_color: Rgba8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            skew_x: 0.0,
            blur: 0.0,
            color: Rgba8::white(),
            border_color: Rgba8::transparent(),
        }
    }
}

impl Style {
    /// Read the current value of `prop`.
    pub fn get(&self, prop: Property) -> Value {
        match prop {
            Property::Opacity => Value::Scalar(self.opacity),
            Property::X => Value::Scalar(self.x),
            Property::Y => Value::Scalar(self.y),
            Property::Z => Value::Scalar(self.z),
            Property::Translate => Value::Vec2(Vec2::new(self.x, self.y)),
            Property::Scale => Value::Scalar(self.scale),
            Property::ScaleX => Value::Scalar(self.scale_x),
            Property::ScaleY => Value::Scalar(self.scale_y),
            Property::Rotation => Value::Scalar(self.rotation),
            Property::RotateX => Value::Scalar(self.rotate_x),
            Property::RotateY => Value::Scalar(self.rotate_y),
            Property::SkewX => Value::Scalar(self.skew_x),
            Property::Blur => Value::Scalar(self.blur),
            Property::Color => Value::Color(self.color),
            Property::BorderColor => Value::Color(self.border_color),
        }
    }

    /// Write `value` into `prop`. Values of the wrong kind are ignored.
    pub fn set(&mut self, prop: Property, value: Value) {
        match (prop, value) {
            (Property::Opacity, Value::Scalar(v)) => self.opacity = v.clamp(0.0, 1.0),
            (Property::X, Value::Scalar(v)) => self.x = v,
            (Property::Y, Value::Scalar(v)) => self.y = v,
            (Property::Z, Value::Scalar(v)) => self.z = v,
            (Property::Translate, Value::Vec2(v)) => {
                self.x = v.x;
                self.y = v.y;
            }
            (Property::Scale, Value::Scalar(v)) => self.scale = v,
            (Property::ScaleX, Value::Scalar(v)) => self.scale_x = v,
            (Property::ScaleY, Value::Scalar(v)) => self.scale_y = v,
            (Property::Rotation, Value::Scalar(v)) => self.rotation = v,
            (Property::RotateX, Value::Scalar(v)) => self.rotate_x = v,
            (Property::RotateY, Value::Scalar(v)) => self.rotate_y = v,
            (Property::SkewX, Value::Scalar(v)) => self.skew_x = v,
            (Property::Blur, Value::Scalar(v)) => self.blur = v.max(0.0),
            (Property::Color, Value::Color(c)) => self.color = c,
            (Property::BorderColor, Value::Color(c)) => self.border_color = c,
            (prop, value) => {
                tracing::debug!(?prop, ?value, "ignoring value of mismatched kind");
            }
        }
    }

    /// The 2D part of this style as an affine transform around `anchor`.
    ///
    /// Perspective rotations (`rotate_x`, `rotate_y`) and depth are left to the embedder.
    pub fn to_affine(&self, anchor: Vec2) -> Affine {
        let t_translate = Affine::translate(Vec2::new(self.x, self.y));
        let t_anchor = Affine::translate(anchor);
        let t_unanchor = Affine::translate(-anchor);
        let t_rotate = Affine::rotate(self.rotation.to_radians());
        let t_skew = Affine::skew(self.skew_x.to_radians().tan(), 0.0);
        let t_scale =
            Affine::scale_non_uniform(self.scale * self.scale_x, self.scale * self.scale_y);

        // T(translate) * T(anchor) * R(rot) * K(skew) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_skew * t_scale * t_unanchor
    }
}
