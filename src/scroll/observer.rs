use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::scene::tree::{ElementId, RenderTree};

/// A point along an element or the viewport, measured from its top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Percentage of the height (`top` = 0, `center` = 50, `bottom` = 100).
    Percent(f64),
    /// Fixed pixel distance from the top.
    Px(f64),
}

impl Anchor {
    pub const TOP: Self = Self::Percent(0.0);
    pub const CENTER: Self = Self::Percent(50.0);
    pub const BOTTOM: Self = Self::Percent(100.0);

    pub fn resolve(self, height: f64) -> f64 {
        match self {
            Self::Percent(p) => height * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Percent(p) if p == 0.0 => f.write_str("top"),
            Self::Percent(p) if p == 50.0 => f.write_str("center"),
            Self::Percent(p) if p == 100.0 => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> ScrollworkResult<Self> {
        let number = |num: &str| -> ScrollworkResult<f64> {
            num.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ScrollworkError::validation(format!("invalid anchor '{s}'")))
        };
        match s {
            "top" => Ok(Self::TOP),
            "center" => Ok(Self::CENTER),
            "bottom" => Ok(Self::BOTTOM),
            _ => {
                if let Some(num) = s.strip_suffix('%') {
                    Ok(Self::Percent(number(num)?))
                } else if let Some(num) = s.strip_suffix("px") {
                    Ok(Self::Px(number(num)?))
                } else {
                    Err(ScrollworkError::validation(format!(
                        "anchor '{s}' must be top, center, bottom, N% or Npx"
                    )))
                }
            }
        }
    }
}

/// "When this point of the trigger reaches that point of the viewport", e.g. `"top 80%"`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Threshold {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl Threshold {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this threshold is met for a trigger spanning `[top, top + height)`.
    pub fn offset(&self, trigger_top: f64, trigger_height: f64, viewport: Viewport) -> f64 {
        trigger_top + self.element.resolve(trigger_height) - self.viewport.resolve(viewport.height)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl FromStr for Threshold {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> ScrollworkResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScrollworkError::validation(format!(
                "threshold '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

impl TryFrom<String> for Threshold {
    type Error = ScrollworkError;

    fn try_from(s: String) -> ScrollworkResult<Self> {
        s.parse()
    }
}

impl From<Threshold> for String {
    fn from(t: Threshold) -> Self {
        t.to_string()
    }
}

/// Callbacks for one observed region. Every method defaults to a no-op.
pub trait RegionListener {
    fn on_progress(&mut self, _progress: f64) {}
    fn on_enter(&mut self) {}
    fn on_leave(&mut self) {}
    fn on_enter_back(&mut self) {}
    fn on_leave_back(&mut self) {}
}

/// A trigger element plus the two thresholds bounding its animation range.
pub struct ObservedRegion {
    pub trigger: ElementId,
    pub start: Threshold,
    pub end: Threshold,
    pub listener: Option<Box<dyn RegionListener>>,
}

impl ObservedRegion {
    pub fn new(trigger: ElementId, start: Threshold, end: Threshold) -> Self {
        Self {
            trigger,
            start,
            end,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl RegionListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }
}

impl fmt::Debug for ObservedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedRegion")
            .field("trigger", &self.trigger)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub u32);

/// Where the scroll offset sits relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionEventKind {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
    Progress(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RegionEvent {
    pub region: RegionId,
    pub kind: RegionEventKind,
}

struct Slot {
    id: RegionId,
    region: ObservedRegion,
    bounds: Option<(f64, f64)>,
    phase: Phase,
    progress: Option<f64>,
}

impl Slot {
    fn evaluate(&self, offset: f64) -> (Phase, f64) {
        let Some((start, end)) = self.bounds else {
            return (Phase::Before, 0.0);
        };
        let end = end.max(start);
        let phase = if offset < start {
            Phase::Before
        } else if offset > end {
            Phase::After
        } else {
            Phase::Active
        };
        let progress = if end - start <= 0.0 {
            if offset >= start { 1.0 } else { 0.0 }
        } else {
            ((offset - start) / (end - start)).clamp(0.0, 1.0)
        };
        (phase, progress)
    }
}

/// Tracks registered regions against the canonical scroll offset.
#[derive(Default)]
pub struct ScrollObserver {
    slots: Vec<Slot>,
    next_id: u32,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region. Its pixel bounds are measured on the next [`ScrollObserver::refresh`].
    pub fn register(&mut self, region: ObservedRegion) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            region,
            bounds: None,
            phase: Phase::Before,
            progress: None,
        });
        id
    }

    /// Remove a region; its listener is dropped and never invoked again.
    pub fn unregister(&mut self, id: RegionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.id != id);
        self.slots.len() != before
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: RegionId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Last reported progress of a region.
    pub fn progress(&self, id: RegionId) -> Option<f64> {
        self.slot(id).and_then(|s| s.progress)
    }

    pub fn phase(&self, id: RegionId) -> Option<Phase> {
        self.slot(id).map(|s| s.phase)
    }

    /// Scroll offsets at which the region starts and ends, if its trigger could be measured.
    pub fn bounds(&self, id: RegionId) -> Option<(f64, f64)> {
        self.slot(id).and_then(|s| s.bounds)
    }

    /// Re-measure every region from current element geometry.
    ///
    /// A missing or zero-height trigger leaves its region unmeasured: it reports progress 0
    /// and fires no edge events until a later refresh succeeds.
    #[tracing::instrument(skip_all, fields(regions = self.slots.len()))]
    pub fn refresh(&mut self, tree: &RenderTree, viewport: Viewport) {
        for slot in &mut self.slots {
            slot.bounds = match tree.rect(slot.region.trigger) {
                Some(rect) if rect.height() > 0.0 => {
                    let start = slot.region.start.offset(rect.y0, rect.height(), viewport);
                    let end = slot.region.end.offset(rect.y0, rect.height(), viewport);
                    Some((start, end))
                }
                _ => {
                    tracing::debug!(
                        region = ?slot.id,
                        "trigger missing or empty; region unmeasured"
                    );
                    None
                }
            };
        }
    }

    /// Recompute every region for `offset`, invoke listeners, and return the fired events.
    ///
    /// Calling this again with an unchanged offset fires nothing.
    pub fn update(&mut self, offset: f64) -> Vec<RegionEvent> {
        let mut events = Vec::new();
        for slot in &mut self.slots {
            let (phase, progress) = slot.evaluate(offset);
            let mut kinds: Vec<RegionEventKind> = Vec::with_capacity(3);

            if slot.bounds.is_some() {
                match (slot.phase, phase) {
                    (Phase::Before, Phase::Active) => kinds.push(RegionEventKind::Enter),
                    (Phase::Before, Phase::After) => kinds.push(RegionEventKind::Enter),
                    (Phase::After, Phase::Active) | (Phase::After, Phase::Before) => {
                        kinds.push(RegionEventKind::EnterBack)
                    }
                    _ => {}
                }
            }
            if slot.progress != Some(progress) {
                kinds.push(RegionEventKind::Progress(progress));
            }
            if slot.bounds.is_some() {
                match (slot.phase, phase) {
                    (Phase::Active, Phase::After) | (Phase::Before, Phase::After) => {
                        kinds.push(RegionEventKind::Leave)
                    }
                    (Phase::Active, Phase::Before) | (Phase::After, Phase::Before) => {
                        kinds.push(RegionEventKind::LeaveBack)
                    }
                    _ => {}
                }
            }

            slot.phase = phase;
            slot.progress = Some(progress);

            for kind in kinds {
                if let Some(listener) = slot.region.listener.as_mut() {
                    match kind {
                        RegionEventKind::Enter => listener.on_enter(),
                        RegionEventKind::Leave => listener.on_leave(),
                        RegionEventKind::EnterBack => listener.on_enter_back(),
                        RegionEventKind::LeaveBack => listener.on_leave_back(),
                        RegionEventKind::Progress(p) => listener.on_progress(p),
                    }
                }
                events.push(RegionEvent {
                    region: slot.id,
                    kind,
                });
            }
        }
        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/observer.rs"]
mod tests;
