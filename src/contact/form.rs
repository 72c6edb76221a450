use std::fmt;
use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::animation::timeline::{Position, PropertyTween, Timeline, TimelineDefaults, TweenOpts};
use crate::animation::value::{Property, Value};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::runtime::session::{AnimationRuntime, FrameReport, TimelineId};
use crate::scene::tree::ElementId;

/// Simulated round trip after the send icon has launched, in seconds.
pub const SETTLE_DELAY: f64 = 0.8;

/// Project budget ranges offered by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Budget {
    #[serde(rename = "10k-25k")]
    Upto25k,
    #[serde(rename = "25k-50k")]
    Upto50k,
    #[serde(rename = "50k-100k")]
    Upto100k,
    #[serde(rename = "100k+")]
    Over100k,
}

impl Budget {
    pub const ALL: [Self; 4] = [Self::Upto25k, Self::Upto50k, Self::Upto100k, Self::Over100k];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upto25k => "10k-25k",
            Self::Upto50k => "25k-50k",
            Self::Upto100k => "50k-100k",
            Self::Over100k => "100k+",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Budget {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| ScrollworkError::validation(format!("unknown budget range '{s}'")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Budget,
    Message,
}

impl FromStr for Field {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "company" => Ok(Self::Company),
            "budget" => Ok(Self::Budget),
            "message" => Ok(Self::Message),
            other => Err(ScrollworkError::validation(format!(
                "unknown form field '{other}'"
            ))),
        }
    }
}

/// Contents of the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    pub message: String,
}

impl ContactForm {
    /// Apply one field edit. Blank optional fields are stored as `None`.
    pub fn set(&mut self, field: Field, value: &str) -> ScrollworkResult<()> {
        let blank = value.trim().is_empty();
        match field {
            Field::Name => self.name = value.to_owned(),
            Field::Email => self.email = value.to_owned(),
            Field::Message => self.message = value.to_owned(),
            Field::Company => self.company = (!blank).then(|| value.to_owned()),
            Field::Budget => self.budget = if blank { None } else { Some(value.parse()?) },
        }
        Ok(())
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScrollworkError::validation("name is required"));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(ScrollworkError::validation(
                    "email must look like name@domain",
                ));
            }
        }
        if self.message.trim().is_empty() {
            return Err(ScrollworkError::validation("message is required"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// Submit affordance: launch the send icon, wait out the settle delay, then report success.
///
/// A submit while one is in flight (or after success) is ignored.
#[derive(Clone, Debug, Default)]
pub struct SubmitFlow {
    icon: Option<ElementId>,
    state: SubmitState,
    launch: Option<TimelineId>,
    settle_at: Option<f64>,
    submission: Option<ContactForm>,
}

impl SubmitFlow {
    pub fn new(icon: Option<ElementId>) -> Self {
        Self {
            icon,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// The form as it was when submitted.
    pub fn submission(&self) -> Option<&ContactForm> {
        self.submission.as_ref()
    }

    pub fn launch_timeline(&self) -> Option<TimelineId> {
        self.launch
    }

    /// Returns `Ok(false)` when a submission is already in flight or done.
    pub fn submit(
        &mut self,
        runtime: &mut AnimationRuntime,
        form: &ContactForm,
    ) -> ScrollworkResult<bool> {
        if self.state != SubmitState::Idle {
            tracing::debug!(state = ?self.state, "submit ignored");
            return Ok(false);
        }
        form.validate()?;

        if let Some(icon) = self.icon {
            let mut tl = Timeline::wall_clock(TimelineDefaults {
                ease: Ease::InQuart,
                duration: 0.8,
                repeat: None,
            });
            tl.tween(
                runtime.tree(),
                &[icon],
                &[
                    PropertyTween::to(Property::X, Value::Scalar(100.0)),
                    PropertyTween::to(Property::Y, Value::Scalar(-100.0)),
                    PropertyTween::to(Property::Opacity, Value::Scalar(0.0)),
                ],
                Position::At(0.0),
                TweenOpts::default(),
            )?;
            let id = runtime.add_timeline(tl);
            runtime.play_timeline(id);
            self.launch = Some(id);
        }
        self.submission = Some(form.clone());
        self.state = SubmitState::Submitting;
        Ok(true)
    }

    /// Advance the flow. Returns `Some(Submitted)` on the frame the submission settles.
    pub fn on_frame(
        &mut self,
        runtime: &mut AnimationRuntime,
        report: &FrameReport,
    ) -> Option<SubmitState> {
        if self.state != SubmitState::Submitting {
            return None;
        }
        match self.launch {
            Some(id) if report.completed.contains(&id) => {
                runtime.cancel_timeline(id);
                self.launch = None;
                self.settle_at = Some(report.now + SETTLE_DELAY);
            }
            Some(id) if runtime.timeline(id).is_none() => {
                self.launch = None;
                self.settle_at = Some(report.now + SETTLE_DELAY);
            }
            Some(_) => return None,
            None if self.settle_at.is_none() => {
                self.settle_at = Some(report.now + SETTLE_DELAY);
            }
            None => {}
        }
        match self.settle_at {
            Some(at) if report.now >= at => {
                self.settle_at = None;
                self.state = SubmitState::Submitted;
                tracing::debug!("contact form submitted");
                Some(SubmitState::Submitted)
            }
            _ => None,
        }
    }

    /// Stop any in-flight launch without settling.
    pub fn cancel(&mut self, runtime: &mut AnimationRuntime) {
        if let Some(id) = self.launch.take() {
            runtime.cancel_timeline(id);
        }
        self.settle_at = None;
        if self.state == SubmitState::Submitting {
            self.state = SubmitState::Idle;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/form.rs"]
mod tests;
