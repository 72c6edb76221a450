use crate::animation::ease::Ease;
use crate::animation::value::{Lerp, Property, Value};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::scene::tree::ElementId;

/// One property transition of one target on a timeline's time axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSegment {
    pub target: ElementId,
    pub property: Property,
    pub from: Value,
    pub to: Value,
    pub ease: Ease,
    /// Start time on the owning timeline's axis.
    pub start: f64,
    /// Duration on the same axis; zero makes the segment a step at `start`.
    pub duration: f64,
}

impl AnimationSegment {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(ScrollworkError::animation(
                "segment start must be finite and >= 0",
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollworkError::animation(
                "segment duration must be finite and >= 0",
            ));
        }
        let kind = self.property.kind();
        if self.from.kind() != kind || self.to.kind() != kind {
            return Err(ScrollworkError::animation(format!(
                "segment values for {:?} must be {:?}",
                self.property, kind
            )));
        }
        Ok(())
    }

    /// Return `true` once the timeline time `t` reached this segment.
    pub fn has_started(&self, t: f64) -> bool {
        t >= self.start
    }

    /// Value at timeline time `t`; holds `from` before the start and `to` after the end.
    pub fn sample(&self, t: f64) -> Value {
        if t <= self.start {
            if self.duration == 0.0 && t == self.start {
                return self.to;
            }
            return self.from;
        }
        if t >= self.end() {
            return self.to;
        }
        let local = self.ease.apply((t - self.start) / self.duration);
        Value::lerp(&self.from, &self.to, local)
    }

    /// Return `true` when both segments animate the same property of the same target and
    /// their active ranges intersect.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.target == other.target
            && self.property == other.property
            && self.start < other.end()
            && other.start < self.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/segment.rs"]
mod tests;
