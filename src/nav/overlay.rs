use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::animation::timeline::{
    Position, PropertyTween, Timeline, TimelineDefaults, TweenOpts,
};
use crate::animation::value::{Property, Value};
use crate::foundation::core::Rect;
use crate::foundation::error::ScrollworkResult;
use crate::runtime::session::{AnimationRuntime, FrameReport, TimelineId};
use crate::scene::tree::{ElementId, RenderTree};

/// Lifecycle of the full-screen navigation menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Shape of the overlay content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    /// Heading, split per character for its staggered entrance.
    pub title: String,
    /// Entries of the directory tree.
    pub items: usize,
    pub footer_items: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "Directory Exploration".to_owned(),
            items: 13,
            footer_items: 3,
        }
    }
}

#[derive(Clone, Debug)]
struct OverlayContent {
    container: ElementId,
    title: Vec<ElementId>,
    items: Vec<ElementId>,
    footer: Vec<ElementId>,
}

impl OverlayContent {
    fn mount(tree: &mut RenderTree, config: &OverlayConfig, bounds: Rect) -> Self {
        let row = 48.0;
        let container = tree.insert(bounds);
        let title = tree.insert_label(
            &config.title,
            Rect::new(bounds.x0 + 64.0, bounds.y0 + 96.0, bounds.x1 - 64.0, bounds.y0 + 160.0),
        );
        let items = (0..config.items)
            .map(|i| {
                let y0 = bounds.y0 + 200.0 + row * i as f64;
                tree.insert(Rect::new(bounds.x0 + 64.0, y0, bounds.x1 - 64.0, y0 + row))
            })
            .collect();
        let footer = (0..config.footer_items)
            .map(|i| {
                let x0 = bounds.x0 + 64.0 + 240.0 * i as f64;
                tree.insert(Rect::new(x0, bounds.y1 - 80.0, x0 + 200.0, bounds.y1 - 48.0))
            })
            .collect();
        Self {
            container,
            title,
            items,
            footer,
        }
    }

    fn unmount(&self, tree: &mut RenderTree) {
        let ids = std::iter::once(self.container)
            .chain(self.title.iter().copied())
            .chain(self.items.iter().copied())
            .chain(self.footer.iter().copied());
        for id in ids {
            tree.remove(id);
        }
    }

    fn entrance(&self, tree: &RenderTree) -> ScrollworkResult<Timeline> {
        let scalar = Value::Scalar;
        let fade_in = PropertyTween::from_to(Property::Opacity, scalar(0.0), scalar(1.0));
        let mut tl = Timeline::wall_clock(TimelineDefaults {
            ease: Ease::OutCubic,
            duration: 0.6,
            repeat: None,
        });
        tl.tween(
            tree,
            &[self.container],
            &[
                fade_in,
                PropertyTween::from_to(Property::Scale, scalar(1.02), scalar(1.0)),
                PropertyTween::from_to(Property::Blur, scalar(8.0), scalar(0.0)),
            ],
            Position::At(0.0),
            TweenOpts {
                ease: Some(Ease::OutExpo),
                ..TweenOpts::default()
            },
        )?;
        tl.tween(
            tree,
            &self.title,
            &[
                fade_in,
                PropertyTween::from_to(Property::Y, scalar(10.0), scalar(0.0)),
                PropertyTween::from_to(Property::RotateX, scalar(-90.0), scalar(0.0)),
            ],
            Position::At(0.2),
            TweenOpts {
                stagger: Some(Stagger::new(0.02)),
                ..TweenOpts::default()
            },
        )?;
        tl.tween(
            tree,
            &self.items,
            &[
                fade_in,
                PropertyTween::from_to(Property::X, scalar(-20.0), scalar(0.0)),
                PropertyTween::from_to(Property::RotateX, scalar(-15.0), scalar(0.0)),
                PropertyTween::from_to(Property::Blur, scalar(5.0), scalar(0.0)),
            ],
            Position::At(0.3),
            TweenOpts {
                stagger: Some(Stagger::new(0.04)),
                ..TweenOpts::default()
            },
        )?;
        tl.tween(
            tree,
            &self.footer,
            &[
                fade_in,
                PropertyTween::from_to(Property::Y, scalar(20.0), scalar(0.0)),
            ],
            Position::At(0.6),
            TweenOpts {
                stagger: Some(Stagger::new(0.1)),
                ..TweenOpts::default()
            },
        )?;
        Ok(tl)
    }

    /// Fade, blur and slightly enlarge the container from wherever it currently is.
    fn exit(&self, tree: &RenderTree) -> ScrollworkResult<Timeline> {
        let mut tl = Timeline::wall_clock(TimelineDefaults {
            ease: Ease::InExpo,
            duration: 0.4,
            repeat: None,
        });
        tl.tween(
            tree,
            &[self.container],
            &[
                PropertyTween::to(Property::Opacity, Value::Scalar(0.0)),
                PropertyTween::to(Property::Scale, Value::Scalar(1.02)),
                PropertyTween::to(Property::Blur, Value::Scalar(8.0)),
            ],
            Position::At(0.0),
            TweenOpts::default(),
        )?;
        Ok(tl)
    }
}

/// Closed → Opening → Open → Closing → Closed.
///
/// At most one opening or closing timeline is in flight. Closing while opening cancels the
/// opening timeline first. Content exists in the render tree only while not `Closed`.
#[derive(Debug)]
pub struct NavigationOverlay {
    config: OverlayConfig,
    state: OverlayState,
    content: Option<OverlayContent>,
    opening: Option<TimelineId>,
    closing: Option<TimelineId>,
    pending_scroll: Option<f64>,
}

impl NavigationOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            state: OverlayState::Closed,
            content: None,
            opening: None,
            closing: None,
            pending_scroll: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Offset a link click will scroll to once the exit completes.
    pub fn pending_scroll(&self) -> Option<f64> {
        self.pending_scroll
    }

    /// Root element of the mounted overlay content.
    pub fn container(&self) -> Option<ElementId> {
        self.content.as_ref().map(|c| c.container)
    }

    /// Mount the content and play the entrance. Only valid while `Closed`.
    pub fn open(&mut self, runtime: &mut AnimationRuntime) -> ScrollworkResult<bool> {
        if self.state != OverlayState::Closed {
            tracing::debug!(state = ?self.state, "open ignored");
            return Ok(false);
        }
        let vp = runtime.viewport();
        let content = OverlayContent::mount(
            runtime.tree_mut(),
            &self.config,
            Rect::new(0.0, 0.0, vp.width, vp.height),
        );
        let timeline = match content.entrance(runtime.tree()) {
            Ok(tl) => tl,
            Err(err) => {
                content.unmount(runtime.tree_mut());
                return Err(err);
            }
        };
        let id = runtime.add_timeline(timeline);
        runtime.play_timeline(id);
        self.content = Some(content);
        self.opening = Some(id);
        self.state = OverlayState::Opening;
        Ok(true)
    }

    /// Play the exit. Valid while `Open` or `Opening`; an in-flight entrance is cancelled first.
    pub fn close(&mut self, runtime: &mut AnimationRuntime) -> ScrollworkResult<bool> {
        if !matches!(self.state, OverlayState::Open | OverlayState::Opening) {
            tracing::debug!(state = ?self.state, "close ignored");
            return Ok(false);
        }
        if let Some(opening) = self.opening.take() {
            runtime.cancel_timeline(opening);
        }
        let Some(content) = &self.content else {
            self.state = OverlayState::Closed;
            return Ok(true);
        };
        let id = runtime.add_timeline(content.exit(runtime.tree())?);
        runtime.play_timeline(id);
        self.closing = Some(id);
        self.state = OverlayState::Closing;
        Ok(true)
    }

    /// Scroll to `offset`. While the menu is showing, close it first and scroll only once the
    /// exit has completed.
    pub fn navigate(
        &mut self,
        runtime: &mut AnimationRuntime,
        offset: f64,
    ) -> ScrollworkResult<()> {
        match self.state {
            OverlayState::Closed => runtime.scroll_to(offset, false),
            OverlayState::Closing => self.pending_scroll = Some(offset),
            OverlayState::Open | OverlayState::Opening => {
                self.pending_scroll = Some(offset);
                self.close(runtime)?;
            }
        }
        Ok(())
    }

    /// Settle transitions whose timelines completed this frame. Returns the new state, if any.
    pub fn on_frame(
        &mut self,
        runtime: &mut AnimationRuntime,
        report: &FrameReport,
    ) -> Option<OverlayState> {
        match self.state {
            OverlayState::Opening => {
                let id = self.opening?;
                if !report.completed.contains(&id) {
                    return None;
                }
                runtime.cancel_timeline(id);
                self.opening = None;
                self.state = OverlayState::Open;
            }
            OverlayState::Closing => {
                let id = self.closing?;
                if !report.completed.contains(&id) {
                    return None;
                }
                runtime.cancel_timeline(id);
                self.closing = None;
                if let Some(content) = self.content.take() {
                    content.unmount(runtime.tree_mut());
                }
                self.state = OverlayState::Closed;
                if let Some(offset) = self.pending_scroll.take() {
                    runtime.scroll_to(offset, false);
                }
            }
            OverlayState::Closed | OverlayState::Open => return None,
        }
        tracing::debug!(state = ?self.state, "overlay settled");
        Some(self.state)
    }

    /// Drop the overlay immediately, without an exit animation.
    pub fn unmount(&mut self, runtime: &mut AnimationRuntime) {
        for id in [self.opening.take(), self.closing.take()].into_iter().flatten() {
            runtime.cancel_timeline(id);
        }
        if let Some(content) = self.content.take() {
            content.unmount(runtime.tree_mut());
        }
        self.pending_scroll = None;
        self.state = OverlayState::Closed;
    }
}

impl Default for NavigationOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/overlay.rs"]
mod tests;
