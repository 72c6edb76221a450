//! Scroll input: the smoothing driver that owns the canonical offset, and the observer that maps
//! that offset onto element regions.

pub mod driver;
pub mod observer;
