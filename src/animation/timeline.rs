use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::segment::AnimationSegment;
use crate::animation::stagger::Stagger;
use crate::animation::value::{Property, Value};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::scene::tree::{ElementId, RenderTree};

/// What drives a timeline's playhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// Playhead is a pure function of scroll progress in `[0, 1]`.
    Scrubbed,
    /// Playhead advances with the frame clock, in seconds.
    WallClock,
}

/// Repetition of a wall-clock timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Repeat {
    /// Extra iterations after the first; `None` repeats forever.
    pub count: Option<u32>,
    /// Play every other iteration backwards.
    #[serde(default)]
    pub yoyo: bool,
}

/// Values tweens inherit when they do not set their own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineDefaults {
    pub ease: Ease,
    pub duration: f64,
    #[serde(default)]
    pub repeat: Option<Repeat>,
}

impl Default for TimelineDefaults {
    fn default() -> Self {
        Self {
            ease: Ease::OutQuad,
            duration: 0.5,
            repeat: None,
        }
    }
}

/// Where a new segment or tween is inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Absolute time on the timeline axis.
    At(f64),
    /// Current end of the timeline.
    #[default]
    End,
    /// Current end plus a (possibly negative) offset, floored at zero.
    AfterEnd(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Completed,
    Cancelled,
}

/// One property of a `from -> to` tween. A missing `from` starts at the target's current value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTween {
    pub property: Property,
    pub from: Option<Value>,
    pub to: Value,
}

impl PropertyTween {
    pub fn from_to(property: Property, from: Value, to: Value) -> Self {
        Self {
            property,
            from: Some(from),
            to,
        }
    }

    pub fn to(property: Property, to: Value) -> Self {
        Self {
            property,
            from: None,
            to,
        }
    }
}

/// Per-tween overrides of [`TimelineDefaults`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenOpts {
    pub duration: Option<f64>,
    pub ease: Option<Ease>,
    pub stagger: Option<Stagger>,
}

/// An ordered set of property segments sharing one time axis.
///
/// Rendering is progress-indexed: the values written for time `t` depend only on `t` and the
/// segment list, never on previously rendered frames.
#[derive(Clone, Debug)]
pub struct Timeline {
    kind: TimelineKind,
    defaults: TimelineDefaults,
    segments: Vec<AnimationSegment>,
    state: PlaybackState,
    time: f64,
    reversed: bool,
    yoyo_flipped: bool,
    iteration: u32,
}

impl Timeline {
    pub fn new(kind: TimelineKind, defaults: TimelineDefaults) -> Self {
        Self {
            kind,
            defaults,
            segments: Vec::new(),
            state: PlaybackState::Idle,
            time: 0.0,
            reversed: false,
            yoyo_flipped: false,
            iteration: 0,
        }
    }

    pub fn scrubbed() -> Self {
        Self::new(TimelineKind::Scrubbed, TimelineDefaults::default())
    }

    pub fn wall_clock(defaults: TimelineDefaults) -> Self {
        Self::new(TimelineKind::WallClock, defaults)
    }

    pub fn kind(&self) -> TimelineKind {
        self.kind
    }

    pub fn defaults(&self) -> TimelineDefaults {
        self.defaults
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn segments(&self) -> &[AnimationSegment] {
        &self.segments
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// End of the last segment on the timeline axis.
    pub fn duration(&self) -> f64 {
        self.segments
            .iter()
            .map(AnimationSegment::end)
            .fold(0.0, f64::max)
    }

    /// Playhead position in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if self.state == PlaybackState::Completed && !self.reversed {
                1.0
            } else {
                0.0
            };
        }
        (self.time / d).clamp(0.0, 1.0)
    }

    /// Axis time a [`Position`] resolves to right now.
    pub fn time_of(&self, position: Position) -> f64 {
        match position {
            Position::At(t) => t,
            Position::End => self.duration(),
            Position::AfterEnd(offset) => (self.duration() + offset).max(0.0),
        }
    }

    /// Insert `segment` with its start moved to `position`.
    pub fn add(
        &mut self,
        mut segment: AnimationSegment,
        position: Position,
    ) -> ScrollworkResult<()> {
        if self.state == PlaybackState::Cancelled {
            return Err(ScrollworkError::animation(
                "cannot add segments to a cancelled timeline",
            ));
        }
        segment.start = self.time_of(position);
        segment.validate()?;
        if self.segments.iter().any(|s| s.conflicts_with(&segment)) {
            tracing::warn!(
                target_id = ?segment.target,
                property = ?segment.property,
                start = segment.start,
                "overlapping segments for one target property; the later start wins"
            );
        }
        let at = self
            .segments
            .partition_point(|s| s.start <= segment.start);
        self.segments.insert(at, segment);
        Ok(())
    }

    /// Add one `from -> to` tween per target, offset by the stagger rank of each target.
    ///
    /// Targets that are no longer in `tree` are skipped.
    pub fn tween(
        &mut self,
        tree: &RenderTree,
        targets: &[ElementId],
        props: &[PropertyTween],
        position: Position,
        opts: TweenOpts,
    ) -> ScrollworkResult<()> {
        let base = self.time_of(position);
        let duration = opts.duration.unwrap_or(self.defaults.duration);
        let ease = opts.ease.unwrap_or(self.defaults.ease);
        let count = targets.len();

        for (i, &target) in targets.iter().enumerate() {
            let Some(style) = tree.style(target) else {
                tracing::debug!(?target, "tween target missing; skipped");
                continue;
            };
            let start = base + opts.stagger.map_or(0.0, |s| s.offset(i, count));
            for p in props {
                let segment = AnimationSegment {
                    target,
                    property: p.property,
                    from: p.from.unwrap_or_else(|| style.get(p.property)),
                    to: p.to,
                    ease,
                    start,
                    duration,
                };
                self.add(segment, Position::At(start))?;
            }
        }
        Ok(())
    }

    /// Compute every animated value at axis time `t` without writing anything.
    ///
    /// Per target property, the latest segment that has started wins; if none has started the
    /// earliest segment's `from` value holds.
    pub fn sample_at(&self, t: f64) -> BTreeMap<(ElementId, Property), Value> {
        let mut out = BTreeMap::new();
        for seg in &self.segments {
            let key = (seg.target, seg.property);
            if seg.has_started(t) || !out.contains_key(&key) {
                out.insert(key, seg.sample(t));
            }
        }
        out
    }

    fn apply_at(&self, t: f64, tree: &mut RenderTree) -> usize {
        let mut written = 0;
        for ((target, property), value) in self.sample_at(t) {
            if tree.write(target, property, value) {
                written += 1;
            } else {
                tracing::debug!(?target, ?property, "segment target missing; skipped");
            }
        }
        written
    }

    /// Render the timeline at normalized `progress` (clamped to `[0, 1]`).
    ///
    /// Returns the number of property writes. Cancelled timelines write nothing.
    pub fn seek(&mut self, progress: f64, tree: &mut RenderTree) -> usize {
        if self.state == PlaybackState::Cancelled {
            return 0;
        }
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.time = p * self.duration();
        self.apply_at(self.time, tree)
    }

    /// Start (or resume) forward playback and render the current position.
    pub fn play(&mut self, tree: &mut RenderTree) -> bool {
        self.start_playback(false, tree)
    }

    /// Start (or resume) backward playback and render the current position.
    pub fn reverse(&mut self, tree: &mut RenderTree) -> bool {
        self.start_playback(true, tree)
    }

    fn start_playback(&mut self, reversed: bool, tree: &mut RenderTree) -> bool {
        if self.state == PlaybackState::Cancelled {
            return false;
        }
        let duration = self.duration();
        if self.state != PlaybackState::Playing {
            self.iteration = 0;
            self.yoyo_flipped = false;
        }
        if reversed && self.time <= 0.0 {
            self.time = duration;
        } else if !reversed && self.time >= duration {
            self.time = 0.0;
        }
        self.reversed = reversed;
        self.state = PlaybackState::Playing;
        self.apply_at(self.time, tree);
        true
    }

    fn moving_forward(&self) -> bool {
        self.reversed == self.yoyo_flipped
    }

    fn try_repeat(&mut self) -> bool {
        match self.defaults.repeat {
            None => false,
            Some(Repeat { count: None, .. }) => true,
            Some(Repeat { count: Some(n), .. }) => {
                if self.iteration < n {
                    self.iteration += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advance a playing timeline by `dt` seconds. Returns `true` on the frame it completes.
    pub fn advance(&mut self, dt: f64, tree: &mut RenderTree) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let duration = self.duration();
        if duration <= 0.0 {
            return self.finish(tree);
        }

        let mut remaining = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        if matches!(self.defaults.repeat, Some(Repeat { count: None, .. })) {
            remaining %= 2.0 * duration;
        }

        loop {
            let forward = self.moving_forward();
            let room = if forward {
                duration - self.time
            } else {
                self.time
            };
            if remaining < room {
                self.time += if forward { remaining } else { -remaining };
                break;
            }
            remaining -= room;
            self.time = if forward { duration } else { 0.0 };
            if !self.try_repeat() {
                return self.finish(tree);
            }
            let yoyo = self.defaults.repeat.is_some_and(|r| r.yoyo);
            if yoyo {
                self.yoyo_flipped = !self.yoyo_flipped;
            } else {
                self.time = if forward { 0.0 } else { duration };
            }
        }

        self.apply_at(self.time, tree);
        false
    }

    fn finish(&mut self, tree: &mut RenderTree) -> bool {
        self.time = if self.moving_forward() {
            self.duration()
        } else {
            0.0
        };
        self.apply_at(self.time, tree);
        self.state = PlaybackState::Completed;
        true
    }

    /// Jump straight to the end of the current playback direction.
    pub fn complete(&mut self, tree: &mut RenderTree) -> bool {
        if self.state == PlaybackState::Cancelled {
            return false;
        }
        self.finish(tree)
    }

    /// Stop all future writes. Idempotent.
    pub fn cancel(&mut self) {
        self.state = PlaybackState::Cancelled;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
