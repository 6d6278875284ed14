//! Unfurl Animation System
//!
//! Fixed-duration tweens driven by a host clock.
//!
//! # Features
//!
//! - **Normalized time**: every tween reports progress `t` in `[0.0, 1.0]`
//! - **Linear interpolation**: values move from start to end proportionally to `t`
//! - **Owner-tagged scheduling**: frames carry the key of whoever started them
//! - **Synchronous cancellation**: a cancelled tween never emits another frame

pub mod scheduler;
pub mod tween;

pub use scheduler::{AnimationFrame, AnimationId, AnimationScheduler};
pub use tween::{lerp, Tween, DEFAULT_DURATION_MS};
