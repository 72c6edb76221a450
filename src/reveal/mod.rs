//! Declarative section reveals.
//!
//! A [`recipe::RevealRecipe`] describes which element groups animate, how, and over which
//! scroll region. A [`controller::RevealController`] turns it into timelines inside an
//! [`crate::runtime::session::AnimationRuntime`].

pub mod builtin;
pub mod controller;
pub mod recipe;
