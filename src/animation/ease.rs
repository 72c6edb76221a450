/// Easing functions used to map normalized animation progress.
///
/// The `power1`..`power4` families match quad..quint. JSON accepts the motion-library names as
/// aliases (`"power3.out"`, `"expo.in"`, `"none"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Linear interpolation.
    #[serde(alias = "none")]
    Linear,
    /// Quadratic ease-in.
    #[serde(alias = "power1.in")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(alias = "power1.out")]
    OutQuad,
    /// Quadratic ease-in/out.
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(alias = "power2.in")]
    InCubic,
    /// Cubic ease-out.
    #[serde(alias = "power2.out")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(alias = "power2.inOut")]
    InOutCubic,
    /// Quartic ease-in.
    #[serde(alias = "power3.in")]
    InQuart,
    /// Quartic ease-out.
    #[serde(alias = "power3.out")]
    OutQuart,
    /// Quintic ease-out.
    #[serde(alias = "power4.out")]
    OutQuint,
    /// Exponential ease-in.
    #[serde(alias = "expo.in")]
    InExpo,
    /// Exponential ease-out.
    #[serde(alias = "expo.out")]
    OutExpo,
    /// Circular ease-out.
    #[serde(alias = "circ.out")]
    OutCirc,
    /// Sinusoidal ease-in/out.
    #[serde(alias = "sine.inOut")]
    InOutSine,
    /// Ease-out that overshoots the target before settling.
    OutBack {
        /// Overshoot amount; `1.70158` is the classic curve.
        overshoot: f64,
    },
    /// Smooth-scroll glide: `min(1, 1.001 - 2^(-10 t))`.
    ScrollGlide,
}

impl Ease {
    /// Back-out with the default overshoot used across the site.
    pub const BACK_OUT: Self = Self::OutBack { overshoot: 1.7 };

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutBack { overshoot } => {
                let c1 = overshoot;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::ScrollGlide => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }

    /// Return `true` when the curve never leaves `[0, 1]` and never decreases.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Self::OutBack { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
