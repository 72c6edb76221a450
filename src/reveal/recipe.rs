use std::collections::{BTreeMap, BTreeSet};

use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::{Position, TimelineDefaults};
use crate::animation::value::{Property, Value, ValueKind};
use crate::foundation::core::{Length, Rgba8, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::runtime::session::ScrubMode;
use crate::scroll::observer::Threshold;

/// A property value as written in a recipe.
///
/// JSON numbers are plain scalars; strings starting with `#` are colors; any other string is a
/// [`Length`] (`"30vh"`, `"-15%"`, `"12px"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawRecipeValue", into = "RawRecipeValue")]
pub enum RecipeValue {
    Number(f64),
    Length(Length),
    Color(Rgba8),
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawRecipeValue {
    Number(f64),
    Text(String),
}

impl TryFrom<RawRecipeValue> for RecipeValue {
    type Error = ScrollworkError;

    fn try_from(raw: RawRecipeValue) -> ScrollworkResult<Self> {
        match raw {
            RawRecipeValue::Number(n) => Ok(Self::Number(n)),
            RawRecipeValue::Text(s) if s.trim_start().starts_with('#') => {
                Ok(Self::Color(Rgba8::from_hex(&s)?))
            }
            RawRecipeValue::Text(s) => Ok(Self::Length(s.parse()?)),
        }
    }
}

impl From<RecipeValue> for RawRecipeValue {
    fn from(v: RecipeValue) -> Self {
        match v {
            RecipeValue::Number(n) => Self::Number(n),
            RecipeValue::Length(l) => Self::Text(l.to_string()),
            RecipeValue::Color(c) => Self::Text(c.to_hex()),
        }
    }
}

impl From<f64> for RecipeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Length> for RecipeValue {
    fn from(l: Length) -> Self {
        Self::Length(l)
    }
}

impl From<Rgba8> for RecipeValue {
    fn from(c: Rgba8) -> Self {
        Self::Color(c)
    }
}

impl RecipeValue {
    /// Resolve to an animated value for `property` on a target of `element_height` pixels.
    pub fn resolve(
        self,
        property: Property,
        viewport: Viewport,
        element_height: f64,
    ) -> ScrollworkResult<Value> {
        match (property.kind(), self) {
            (ValueKind::Scalar, Self::Number(n)) if n.is_finite() => Ok(Value::Scalar(n)),
            (ValueKind::Scalar, Self::Length(Length::Px(px))) if px.is_finite() => {
                Ok(Value::Scalar(px))
            }
            (ValueKind::Scalar, Self::Length(l)) if property.is_length() => {
                Ok(Value::Scalar(l.resolve(viewport, element_height)))
            }
            (ValueKind::Color, Self::Color(c)) => Ok(Value::Color(c)),
            _ => Err(ScrollworkError::validation(format!(
                "value {self:?} does not fit property {property:?}"
            ))),
        }
    }

    fn check(self, property: Property) -> ScrollworkResult<()> {
        let probe = Viewport {
            width: 1.0,
            height: 1.0,
        };
        self.resolve(property, probe, 1.0).map(|_| ())
    }
}

pub type PropertyMap = BTreeMap<Property, RecipeValue>;

/// One `from -> to` tween applied to every target of a named group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealStep {
    pub group: String,
    /// Start values. Properties missing here start from the target's current style.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub from: PropertyMap,
    pub to: PropertyMap,
    /// Start values that replace `from` on odd-indexed targets.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub from_odd: PropertyMap,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub ease: Option<Ease>,
    #[serde(default)]
    pub stagger: Option<Stagger>,
}

impl RevealStep {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            from: BTreeMap::new(),
            to: BTreeMap::new(),
            from_odd: BTreeMap::new(),
            position: Position::End,
            duration: None,
            ease: None,
            stagger: None,
        }
    }

    pub fn from(mut self, property: Property, value: impl Into<RecipeValue>) -> Self {
        self.from.insert(property, value.into());
        self
    }

    pub fn to(mut self, property: Property, value: impl Into<RecipeValue>) -> Self {
        self.to.insert(property, value.into());
        self
    }

    /// Shorthand for `from(property, from).to(property, to)`.
    pub fn tween(
        self,
        property: Property,
        from: impl Into<RecipeValue>,
        to: impl Into<RecipeValue>,
    ) -> Self {
        self.from(property, from).to(property, to)
    }

    pub fn from_odd(mut self, property: Property, value: impl Into<RecipeValue>) -> Self {
        self.from_odd.insert(property, value.into());
        self
    }

    pub fn at(mut self, time: f64) -> Self {
        self.position = Position::At(time);
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.to.is_empty() {
            return Err(ScrollworkError::validation(format!(
                "step for group '{}' has no target values",
                self.group
            )));
        }
        for (prop, value) in &self.to {
            value.check(*prop)?;
        }
        for (prop, value) in self.from.iter().chain(&self.from_odd) {
            if !self.to.contains_key(prop) {
                return Err(ScrollworkError::validation(format!(
                    "step for group '{}' sets a start value for {prop:?} without an end value",
                    self.group
                )));
            }
            value.check(*prop)?;
        }
        if let Some(d) = self.duration
            && !(d.is_finite() && d >= 0.0)
        {
            return Err(ScrollworkError::validation("step duration must be >= 0"));
        }
        if let Some(s) = self.stagger
            && !(s.each.is_finite() && s.each >= 0.0)
        {
            return Err(ScrollworkError::validation("stagger must be >= 0"));
        }
        if let Position::At(t) = self.position
            && !(t.is_finite() && t >= 0.0)
        {
            return Err(ScrollworkError::validation("step position must be >= 0"));
        }
        Ok(())
    }
}

/// Wall-clock steps sharing one set of timeline defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedSteps {
    #[serde(default)]
    pub defaults: TimelineDefaults,
    pub steps: Vec<RevealStep>,
}

fn default_true() -> bool {
    true
}

/// Declarative animation of one page section.
///
/// `steps` form a scroll-scrubbed timeline driven by the `start`/`end` region of the trigger.
/// `entrance` plays once on mount and `idle` loops from mount on.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealRecipe {
    pub start: Threshold,
    pub end: Threshold,
    /// Group whose first element triggers the region; the section root when absent.
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub scrub: ScrubMode,
    #[serde(default = "default_true")]
    pub immediate_render: bool,
    #[serde(default)]
    pub defaults: TimelineDefaults,
    #[serde(default)]
    pub steps: Vec<RevealStep>,
    #[serde(default)]
    pub entrance: Option<TimedSteps>,
    #[serde(default)]
    pub idle: Option<TimedSteps>,
}

impl RevealRecipe {
    pub fn new(start: Threshold, end: Threshold) -> Self {
        Self {
            start,
            end,
            trigger: None,
            scrub: ScrubMode::Immediate,
            immediate_render: true,
            defaults: TimelineDefaults::default(),
            steps: Vec::new(),
            entrance: None,
            idle: None,
        }
    }

    pub fn scrub(mut self, mode: ScrubMode) -> Self {
        self.scrub = mode;
        self
    }

    /// Write nothing until the region progress first moves.
    pub fn deferred(mut self) -> Self {
        self.immediate_render = false;
        self
    }

    /// Scrub progress shown with reduced motion: reveals rest fully revealed, deferred exits
    /// rest at their untouched start.
    pub fn rest_progress(&self) -> f64 {
        if self.immediate_render { 1.0 } else { 0.0 }
    }

    pub fn step(mut self, step: RevealStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn entrance(mut self, defaults: TimelineDefaults, steps: Vec<RevealStep>) -> Self {
        self.entrance = Some(TimedSteps { defaults, steps });
        self
    }

    pub fn idle(mut self, defaults: TimelineDefaults, steps: Vec<RevealStep>) -> Self {
        self.idle = Some(TimedSteps { defaults, steps });
        self
    }

    fn all_steps(&self) -> impl Iterator<Item = &RevealStep> {
        self.steps
            .iter()
            .chain(self.entrance.iter().flat_map(|t| &t.steps))
            .chain(self.idle.iter().flat_map(|t| &t.steps))
    }

    /// Every target group the recipe refers to.
    pub fn groups(&self) -> BTreeSet<&str> {
        self.all_steps()
            .map(|s| s.group.as_str())
            .chain(self.trigger.as_deref())
            .collect()
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if let ScrubMode::Smoothed { lag } = self.scrub
            && !(lag.is_finite() && lag > 0.0)
        {
            return Err(ScrollworkError::validation("scrub lag must be > 0"));
        }
        for defaults in std::iter::once(&self.defaults)
            .chain(self.entrance.iter().map(|t| &t.defaults))
            .chain(self.idle.iter().map(|t| &t.defaults))
        {
            if !(defaults.duration.is_finite() && defaults.duration >= 0.0) {
                return Err(ScrollworkError::validation(
                    "default duration must be >= 0",
                ));
            }
        }
        if self.steps.is_empty() && self.entrance.is_none() && self.idle.is_none() {
            return Err(ScrollworkError::validation("recipe animates nothing"));
        }
        for step in self.all_steps() {
            step.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/recipe.rs"]
mod tests;
