use crate::animation::ease::Ease;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};

/// How the virtual offset follows the raw input offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integration {
    /// Frame-rate independent exponential approach: `v += (raw - v) * (1 - exp(-k * dt))`.
    Damped {
        /// Approach rate per second.
        k: f64,
    },
    /// Every new impulse starts an eased glide of fixed `duration` seconds toward the target.
    Eased { duration: f64, ease: Ease },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothScrollConfig {
    pub integration: Integration,
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
    #[serde(default = "default_touch_multiplier")]
    pub touch_multiplier: f64,
}

fn default_wheel_multiplier() -> f64 {
    1.0
}

fn default_touch_multiplier() -> f64 {
    2.0
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            integration: Integration::Eased {
                duration: 1.2,
                ease: Ease::ScrollGlide,
            },
            wheel_multiplier: default_wheel_multiplier(),
            touch_multiplier: default_touch_multiplier(),
        }
    }
}

impl SmoothScrollConfig {
    pub fn validate(&self) -> ScrollworkResult<()> {
        match self.integration {
            Integration::Damped { k } if !(k.is_finite() && k > 0.0) => {
                return Err(ScrollworkError::config("damped scroll k must be > 0"));
            }
            Integration::Eased { duration, .. } if !(duration.is_finite() && duration > 0.0) => {
                return Err(ScrollworkError::config(
                    "eased scroll duration must be > 0",
                ));
            }
            _ => {}
        }
        for (name, m) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !m.is_finite() {
                return Err(ScrollworkError::config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// Raw input from the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollInput {
    /// Wheel delta in pixels (positive scrolls down).
    Wheel(f64),
    /// Touch drag delta in pixels (positive scrolls down).
    Touch(f64),
    /// Absolute scrollbar position in pixels.
    Scrollbar(f64),
}

/// Canonical scroll state. Only [`SmoothScroll`] mutates it, once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Input target offset, clamped to the scrollable extent.
    pub raw_offset: f64,
    /// Smoothed offset read by every consumer.
    pub virtual_offset: f64,
    /// Virtual offset change per second over the last frame.
    pub velocity: f64,
    /// Frame clock of the last integrated frame, in seconds.
    pub last_frame_timestamp: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
struct Glide {
    from: f64,
    to: f64,
    elapsed: f64,
}

/// Smooth-scroll physics driver.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    state: ScrollState,
    extent: f64,
    pending_delta: f64,
    glide: Option<Glide>,
    disposed: bool,
}

impl SmoothScroll {
    pub fn new(config: SmoothScrollConfig, scrollable_extent: f64) -> Self {
        Self {
            config,
            state: ScrollState::default(),
            extent: sanitize_extent(scrollable_extent),
            pending_delta: 0.0,
            glide: None,
            disposed: false,
        }
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// The canonical scroll position.
    pub fn offset(&self) -> f64 {
        self.state.virtual_offset
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Return `true` when the virtual offset has caught up with the input.
    pub fn is_settled(&self) -> bool {
        self.glide.is_none() && self.state.virtual_offset == self.state.raw_offset
    }

    /// Update the scrollable extent after a layout change; offsets are re-clamped.
    pub fn set_extent(&mut self, scrollable_extent: f64) {
        self.extent = sanitize_extent(scrollable_extent);
        self.state.raw_offset = self.clamp(self.state.raw_offset);
        self.state.virtual_offset = self.clamp(self.state.virtual_offset);
        if let Some(glide) = &mut self.glide {
            glide.to = self.state.raw_offset;
        }
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.extent)
    }

    /// Queue raw input for the next [`SmoothScroll::tick`]. Ignored after disposal.
    pub fn push(&mut self, input: ScrollInput) {
        if self.disposed {
            return;
        }
        match input {
            ScrollInput::Wheel(d) if d.is_finite() => {
                self.pending_delta += d * self.config.wheel_multiplier;
            }
            ScrollInput::Touch(d) if d.is_finite() => {
                self.pending_delta += d * self.config.touch_multiplier;
            }
            ScrollInput::Scrollbar(offset) => {
                let target = self.clamp(offset);
                self.pending_delta += target - (self.state.raw_offset + self.pending_delta);
            }
            _ => {}
        }
    }

    /// Take the input queued since the last frame.
    pub fn take_pending(&mut self) -> f64 {
        std::mem::take(&mut self.pending_delta)
    }

    /// Programmatic scroll. `immediate` jumps without smoothing.
    pub fn scroll_to(&mut self, offset: f64, immediate: bool) {
        if self.disposed {
            return;
        }
        let target = self.clamp(offset);
        self.pending_delta = 0.0;
        if immediate {
            self.state.raw_offset = target;
            self.state.virtual_offset = target;
            self.state.velocity = 0.0;
            self.glide = None;
        } else {
            self.retarget(target);
        }
    }

    fn retarget(&mut self, target: f64) {
        self.state.raw_offset = target;
        if let Integration::Eased { .. } = self.config.integration {
            self.glide = Some(Glide {
                from: self.state.virtual_offset,
                to: target,
                elapsed: 0.0,
            });
        }
    }

    /// Integrate one frame: apply `raw_delta` to the input offset and move the virtual offset
    /// toward it over `dt` seconds. Returns the new virtual offset.
    ///
    /// `dt` is used as-is (no lag smoothing); negative or non-finite values count as zero.
    pub fn tick(&mut self, raw_delta: f64, dt: f64) -> f64 {
        if self.disposed {
            return self.state.virtual_offset;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let prev = self.state.virtual_offset;

        if raw_delta.is_finite() && raw_delta != 0.0 {
            let target = self.clamp(self.state.raw_offset + raw_delta);
            if target != self.state.raw_offset {
                self.retarget(target);
            }
        }

        let raw = self.state.raw_offset;
        let next = match self.config.integration {
            Integration::Damped { k } => {
                let v = prev + (raw - prev) * (1.0 - (-k * dt).exp());
                if (raw - v).abs() < 0.01 { raw } else { v }
            }
            Integration::Eased { duration, ease } => match &mut self.glide {
                Some(glide) => {
                    glide.elapsed += dt;
                    let t = (glide.elapsed / duration).min(1.0);
                    if t >= 1.0 {
                        let to = glide.to;
                        self.glide = None;
                        to
                    } else {
                        glide.from + (glide.to - glide.from) * ease.apply(t)
                    }
                }
                None => raw,
            },
        };

        self.state.virtual_offset = self.clamp(next);
        self.state.velocity = if dt > 0.0 {
            (self.state.virtual_offset - prev) / dt
        } else {
            0.0
        };
        self.state.virtual_offset
    }

    /// Integrate using the frame clock instead of an explicit `dt`.
    pub fn raf(&mut self, now: f64) -> f64 {
        let dt = match self.state.last_frame_timestamp {
            Some(last) => now - last,
            None => 0.0,
        };
        self.state.last_frame_timestamp = Some(now);
        let delta = self.take_pending();
        self.tick(delta, dt)
    }

    /// Stop consuming input and stop integrating. Idempotent.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.pending_delta = 0.0;
        self.glide = None;
        self.state.velocity = 0.0;
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
