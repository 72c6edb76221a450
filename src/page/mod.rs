//! Whole-page assembly.
//!
//! A [`config::PageConfig`] describes the sections of a page and the element groups inside
//! them. [`site::Page`] lays those out in a render tree and wires up every reveal, the header,
//! the navigation menu and the contact form around one
//! [`crate::runtime::session::AnimationRuntime`].

pub mod config;
pub mod site;
