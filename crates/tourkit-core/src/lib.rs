#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and animation primitives.
//!
//! # Role in tourkit
//! `tourkit-core` is the dependency-light base the render kernel and the
//! tour widgets build on. It owns no terminal state; hosts translate their
//! input into [`event::Event`] and feed frame deltas into
//! [`animation::Animation`] values.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export logging macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
