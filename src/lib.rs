//! Scrollwork is the scroll-synchronized reveal engine of a studio marketing site.
//!
//! Everything runs inside one [`AnimationRuntime`] per page:
//!
//! - a smooth-scroll driver owns the canonical scroll offset
//! - a scroll observer maps that offset onto element regions
//! - progress-indexed timelines write element styles into a [`scene::tree::RenderTree`]
//! - reveal controllers, the navigation menu and the contact form build on top
//!
//! The embedder calls [`AnimationRuntime::frame`] (or [`Page::frame`]) once per display refresh.
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves, animated values and timelines.
pub mod animation;
pub mod contact;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod runtime;
pub mod scene;
pub mod scroll;

pub use crate::foundation::core::{Affine, Length, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{ScrollworkError, ScrollworkResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::timeline::{Timeline, TimelineKind};
pub use crate::nav::overlay::{NavigationOverlay, OverlayState};
pub use crate::page::config::PageConfig;
pub use crate::page::site::{Page, PageFrame};
pub use crate::reveal::recipe::{RevealRecipe, RevealStep};
pub use crate::runtime::session::{AnimationRuntime, FrameReport, TimelineId};
pub use crate::scroll::driver::{ScrollInput, SmoothScrollConfig};
pub use crate::scroll::observer::{ObservedRegion, RegionEventKind, Threshold};
