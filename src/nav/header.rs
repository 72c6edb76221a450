use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::{Position, PropertyTween, Timeline, TimelineDefaults, TweenOpts};
use crate::animation::value::{Property, Value};
use crate::foundation::error::ScrollworkResult;
use crate::runtime::session::{AnimationRuntime, TimelineId};
use crate::scene::tree::ElementId;
use crate::scroll::observer::{
    Anchor, ObservedRegion, RegionEvent, RegionEventKind, RegionId, Threshold,
};

/// Offset past which the header switches to its compact, scrolled look.
pub const SCROLLED_THRESHOLD: f64 = 20.0;

/// Header links, in display order.
pub const HEADER_LINKS: [&str; 6] = ["About", "Work", "Services", "Process", "Log", "Contact"];

/// Tracks which section currently straddles the middle of the viewport.
///
/// A section becomes active when its region is entered from either direction. Regions span
/// "top center" to "bottom center", so at most one is active at a time on a contiguous page.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    regions: Vec<(RegionId, String)>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `trigger` as section `name`. The first tracked section is active until another
    /// one is entered.
    pub fn track(
        &mut self,
        runtime: &mut AnimationRuntime,
        name: impl Into<String>,
        trigger: ElementId,
    ) -> RegionId {
        let name = name.into();
        let id = runtime.register_region(ObservedRegion::new(
            trigger,
            Threshold::new(Anchor::TOP, Anchor::CENTER),
            Threshold::new(Anchor::BOTTOM, Anchor::CENTER),
        ));
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.regions.push((id, name));
        id
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(|(_, name)| name.as_str())
    }

    /// Fold one frame of region events. Returns the newly active section when it changed.
    pub fn observe(&mut self, events: &[RegionEvent]) -> Option<&str> {
        let mut changed = false;
        for event in events {
            if !matches!(event.kind, RegionEventKind::Enter | RegionEventKind::EnterBack) {
                continue;
            }
            let Some((_, name)) = self.regions.iter().find(|(id, _)| *id == event.region) else {
                continue;
            };
            if self.active.as_deref() != Some(name.as_str()) {
                self.active = Some(name.clone());
                changed = true;
            }
        }
        if changed {
            tracing::debug!(active = ?self.active, "active section changed");
            self.active.as_deref()
        } else {
            None
        }
    }

    /// Unregister every region. Idempotent.
    pub fn clear(&mut self, runtime: &mut AnimationRuntime) {
        for (id, _) in self.regions.drain(..) {
            runtime.unregister_region(id);
        }
        self.active = None;
    }
}

/// Fixed page header: link entrance and scrolled state.
#[derive(Clone, Debug)]
pub struct Header {
    links: Vec<ElementId>,
    entrance: Option<TimelineId>,
    scrolled: bool,
}

impl Header {
    /// Play the staggered drop-in of `links`.
    pub fn mount(runtime: &mut AnimationRuntime, links: Vec<ElementId>) -> ScrollworkResult<Self> {
        let mut tl = Timeline::wall_clock(TimelineDefaults {
            ease: Ease::OutCubic,
            duration: 0.8,
            repeat: None,
        });
        tl.tween(
            runtime.tree(),
            &links,
            &[
                PropertyTween::from_to(Property::Opacity, Value::Scalar(0.0), Value::Scalar(1.0)),
                PropertyTween::from_to(Property::Y, Value::Scalar(-10.0), Value::Scalar(0.0)),
            ],
            Position::At(0.5),
            TweenOpts {
                stagger: Some(Stagger::new(0.1)),
                ..TweenOpts::default()
            },
        )?;
        let id = runtime.add_timeline(tl);
        runtime.play_timeline(id);
        Ok(Self {
            links,
            entrance: Some(id),
            scrolled: runtime.offset() > SCROLLED_THRESHOLD,
        })
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    pub fn entrance_timeline(&self) -> Option<TimelineId> {
        self.entrance
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Returns `true` when the scrolled state flipped.
    pub fn update(&mut self, offset: f64) -> bool {
        let scrolled = offset > SCROLLED_THRESHOLD;
        let flipped = scrolled != self.scrolled;
        self.scrolled = scrolled;
        flipped
    }

    pub fn unmount(&mut self, runtime: &mut AnimationRuntime) {
        if let Some(id) = self.entrance.take() {
            runtime.cancel_timeline(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/header.rs"]
mod tests;
