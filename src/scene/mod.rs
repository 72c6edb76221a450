//! Render targets written by the timeline engine.
//!
//! The engine never creates or destroys visual content on its own: sections and overlays insert
//! elements into a [`RenderTree`] and address them through [`ElementId`] handles. A handle whose
//! element was removed simply stops resolving, so late writes after an unmount are dropped.

/// Per-element visual state.
pub mod style;
/// Generational arena of render targets.
pub mod tree;
