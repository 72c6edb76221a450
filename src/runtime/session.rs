use crate::animation::timeline::{PlaybackState, Timeline, TimelineKind};
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::scene::tree::RenderTree;
use crate::scroll::driver::{ScrollInput, ScrollState, SmoothScroll, SmoothScrollConfig};
use crate::scroll::observer::{ObservedRegion, RegionEvent, RegionId, ScrollObserver};

/// Generational handle to a timeline owned by an [`AnimationRuntime`].
///
/// Slots are reused once a timeline is cancelled; a handle to the old occupant goes stale.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimelineId {
    index: u32,
    generation: u32,
}

struct TimelineSlot {
    generation: u32,
    timeline: Option<Timeline>,
}

fn live_mut(slots: &mut [TimelineSlot], id: TimelineId) -> Option<&mut Timeline> {
    slots
        .get_mut(id.index as usize)
        .filter(|slot| slot.generation == id.generation)
        .and_then(|slot| slot.timeline.as_mut())
}

/// How a scrubbed timeline follows its region's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubMode {
    /// Seek to the region progress every frame.
    #[default]
    Immediate,
    /// Chase the region progress with `1 - exp(-dt / lag)` per frame.
    Smoothed {
        /// Catch-up time constant in seconds.
        lag: f64,
    },
}

/// Options for [`AnimationRuntime::bind_scrub`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubOpts {
    pub mode: ScrubMode,
    /// Render progress 0 on the first frame. When `false`, nothing is written until the
    /// region progress moves away from 0.
    pub immediate_render: bool,
    /// Progress held while reduced motion is on. The region is not followed then.
    pub rest: f64,
}

impl Default for ScrubOpts {
    fn default() -> Self {
        Self {
            mode: ScrubMode::Immediate,
            immediate_render: true,
            rest: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ScrubBinding {
    timeline: TimelineId,
    region: RegionId,
    mode: ScrubMode,
    rest: f64,
    smoothed: Option<f64>,
    applied: Option<f64>,
}

/// What happened during one [`AnimationRuntime::frame`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Frame clock in seconds.
    pub now: f64,
    /// Seconds since the previous frame (0 on the first frame).
    pub dt: f64,
    /// Canonical scroll offset every consumer observed this frame.
    pub offset: f64,
    /// Region events in firing order.
    pub events: Vec<RegionEvent>,
    /// Wall-clock timelines that completed since the previous frame.
    pub completed: Vec<TimelineId>,
}

/// Single-threaded animation context: scroll driver, observer, render tree and every timeline.
///
/// Nothing here is global. The embedder owns one runtime per page and calls
/// [`AnimationRuntime::frame`] once per display refresh.
pub struct AnimationRuntime {
    viewport: Viewport,
    document_height: f64,
    scroll: SmoothScroll,
    observer: ScrollObserver,
    tree: RenderTree,
    timelines: Vec<TimelineSlot>,
    free_timelines: Vec<u32>,
    bindings: Vec<ScrubBinding>,
    settled: Vec<TimelineId>,
    reduced_motion: bool,
    disposed: bool,
}

fn scroll_extent(viewport: Viewport, document_height: f64) -> f64 {
    (document_height - viewport.height).max(0.0)
}

impl AnimationRuntime {
    pub fn new(
        viewport: Viewport,
        document_height: f64,
        config: SmoothScrollConfig,
    ) -> ScrollworkResult<Self> {
        config.validate()?;
        if !document_height.is_finite() || document_height < 0.0 {
            return Err(ScrollworkError::validation(
                "document height must be finite and >= 0",
            ));
        }
        Ok(Self {
            viewport,
            document_height,
            scroll: SmoothScroll::new(config, scroll_extent(viewport, document_height)),
            observer: ScrollObserver::new(),
            tree: RenderTree::new(),
            timelines: Vec::new(),
            free_timelines: Vec::new(),
            bindings: Vec::new(),
            settled: Vec::new(),
            reduced_motion: false,
            disposed: false,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    pub fn observer(&self) -> &ScrollObserver {
        &self.observer
    }

    pub fn scroll_state(&self) -> &ScrollState {
        self.scroll.state()
    }

    /// The canonical scroll offset.
    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// With reduced motion, played timelines jump to their end and scrubbed timelines hold
    /// their [`ScrubOpts::rest`] progress instead of following the scroll.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn push_input(&mut self, input: ScrollInput) {
        self.scroll.push(input);
    }

    pub fn scroll_to(&mut self, offset: f64, immediate: bool) {
        self.scroll.scroll_to(offset, immediate);
    }

    /// Apply a viewport or document size change and re-measure every region.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport, document_height: f64) {
        self.viewport = viewport;
        if document_height.is_finite() && document_height >= 0.0 {
            self.document_height = document_height;
        }
        self.scroll
            .set_extent(scroll_extent(viewport, self.document_height));
        self.refresh();
    }

    /// Re-measure every region from the current element geometry.
    pub fn refresh(&mut self) {
        self.observer.refresh(&self.tree, self.viewport);
    }

    pub fn register_region(&mut self, region: ObservedRegion) -> RegionId {
        let id = self.observer.register(region);
        self.refresh();
        id
    }

    /// Remove a region and every scrub binding that reads it.
    pub fn unregister_region(&mut self, id: RegionId) -> bool {
        self.bindings.retain(|b| b.region != id);
        self.observer.unregister(id)
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> TimelineId {
        if let Some(index) = self.free_timelines.pop() {
            let slot = &mut self.timelines[index as usize];
            slot.timeline = Some(timeline);
            return TimelineId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.timelines.len()).unwrap_or(u32::MAX);
        self.timelines.push(TimelineSlot {
            generation: 0,
            timeline: Some(timeline),
        });
        TimelineId {
            index,
            generation: 0,
        }
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.timeline.as_ref())
    }

    /// Number of live timelines.
    pub fn timeline_count(&self) -> usize {
        self.timelines
            .iter()
            .filter(|slot| slot.timeline.is_some())
            .count()
    }

    /// Number of timeline slots ever allocated, live or free.
    pub fn timeline_slots(&self) -> usize {
        self.timelines.len()
    }

    pub fn timeline_state(&self, id: TimelineId) -> Option<PlaybackState> {
        self.timeline(id).map(Timeline::state)
    }

    /// Start a wall-clock timeline. Returns `false` for unknown, scrubbed or cancelled timelines.
    pub fn play_timeline(&mut self, id: TimelineId) -> bool {
        self.start_timeline(id, false)
    }

    /// Play a wall-clock timeline backwards from its current position.
    pub fn reverse_timeline(&mut self, id: TimelineId) -> bool {
        self.start_timeline(id, true)
    }

    fn start_timeline(&mut self, id: TimelineId, reversed: bool) -> bool {
        if self.disposed {
            return false;
        }
        let reduced = self.reduced_motion;
        let Some(timeline) = live_mut(&mut self.timelines, id) else {
            return false;
        };
        if timeline.kind() != TimelineKind::WallClock {
            tracing::debug!(?id, "scrubbed timelines follow their region; play ignored");
            return false;
        }
        let started = if reversed {
            timeline.reverse(&mut self.tree)
        } else {
            timeline.play(&mut self.tree)
        };
        if started && reduced {
            timeline.complete(&mut self.tree);
            self.settled.push(id);
        }
        started
    }

    /// Cancel a timeline and release it. It never writes again.
    pub fn cancel_timeline(&mut self, id: TimelineId) -> bool {
        self.bindings.retain(|b| b.timeline != id);
        self.settled.retain(|t| *t != id);
        let Some(slot) = self.timelines.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            return false;
        }
        let Some(mut timeline) = slot.timeline.take() else {
            return false;
        };
        timeline.cancel();
        slot.generation = slot.generation.wrapping_add(1);
        self.free_timelines.push(id.index);
        true
    }

    /// Drive a scrubbed timeline from a region's progress.
    pub fn bind_scrub(
        &mut self,
        timeline: TimelineId,
        region: RegionId,
        opts: ScrubOpts,
    ) -> ScrollworkResult<()> {
        match self.timeline(timeline) {
            Some(t) if t.kind() == TimelineKind::Scrubbed => {}
            Some(_) => {
                return Err(ScrollworkError::animation(
                    "only scrubbed timelines can be bound to a region",
                ));
            }
            None => {
                return Err(ScrollworkError::animation(format!(
                    "unknown timeline {timeline:?}"
                )));
            }
        }
        if self.observer.phase(region).is_none() {
            return Err(ScrollworkError::animation(format!(
                "unknown region {region:?}"
            )));
        }
        let seeded = (!opts.immediate_render).then_some(0.0);
        let rest = if opts.rest.is_finite() {
            opts.rest.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.bindings.retain(|b| b.timeline != timeline);
        self.bindings.push(ScrubBinding {
            timeline,
            region,
            mode: opts.mode,
            rest,
            smoothed: seeded,
            applied: seeded,
        });
        Ok(())
    }

    /// Seek a scrubbed timeline directly, bypassing any binding.
    pub fn seek_timeline(&mut self, id: TimelineId, progress: f64) -> usize {
        if self.disposed {
            return 0;
        }
        let Some(timeline) = live_mut(&mut self.timelines, id) else {
            return 0;
        };
        timeline.seek(progress, &mut self.tree)
    }

    /// Run one frame: integrate scroll, update regions, re-seek scrubbed timelines, then
    /// advance wall-clock timelines.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        if self.disposed {
            return FrameReport {
                now,
                offset: self.scroll.offset(),
                ..FrameReport::default()
            };
        }
        let dt = match self.scroll.state().last_frame_timestamp {
            Some(last) if now.is_finite() && now > last => now - last,
            _ => 0.0,
        };

        let offset = self.scroll.raf(now);
        let events = self.observer.update(offset);
        self.apply_scrub(dt);

        let mut completed = std::mem::take(&mut self.settled);
        self.advance_wall_clock(dt, &mut completed);

        FrameReport {
            now,
            dt,
            offset,
            events,
            completed,
        }
    }

    fn apply_scrub(&mut self, dt: f64) {
        for binding in &mut self.bindings {
            let Some(timeline) = live_mut(&mut self.timelines, binding.timeline) else {
                continue;
            };
            let target = if self.reduced_motion {
                binding.rest
            } else {
                self.observer.progress(binding.region).unwrap_or(0.0)
            };
            let p = match (binding.mode, binding.smoothed) {
                (ScrubMode::Smoothed { lag }, Some(current))
                    if !self.reduced_motion && lag > 0.0 =>
                {
                    let next = current + (target - current) * (1.0 - (-dt / lag).exp());
                    if (target - next).abs() < 1e-4 { target } else { next }
                }
                _ => target,
            };
            binding.smoothed = Some(p);
            if binding.applied != Some(p) {
                timeline.seek(p, &mut self.tree);
                binding.applied = Some(p);
            }
        }
    }

    fn advance_wall_clock(&mut self, dt: f64, completed: &mut Vec<TimelineId>) {
        for (index, slot) in self.timelines.iter_mut().enumerate() {
            let generation = slot.generation;
            let Some(timeline) = slot.timeline.as_mut() else {
                continue;
            };
            if timeline.kind() != TimelineKind::WallClock
                || timeline.state() != PlaybackState::Playing
            {
                continue;
            }
            let done = if self.reduced_motion {
                timeline.complete(&mut self.tree)
            } else {
                timeline.advance(dt, &mut self.tree)
            };
            if done {
                completed.push(TimelineId {
                    index: index as u32,
                    generation,
                });
            }
        }
    }

    /// Stop the scroll driver, cancel every timeline and drop every region. Idempotent.
    #[tracing::instrument(skip(self))]
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scroll.dispose();
        for timeline in self.timelines.iter_mut().filter_map(|slot| slot.timeline.as_mut()) {
            timeline.cancel();
        }
        self.bindings.clear();
        self.settled.clear();
        self.observer = ScrollObserver::new();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/session.rs"]
mod tests;
