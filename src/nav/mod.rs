//! Site navigation: the full-screen directory menu, the header and active-section tracking.

pub mod header;
pub mod overlay;
