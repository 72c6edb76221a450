//! The per-page animation context and its frame loop.

pub mod session;
