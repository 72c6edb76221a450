//! Contact form state and its submit animation.

pub mod form;
