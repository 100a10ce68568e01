//! backtop Animation System
//!
//! Time-based scroll animations driven by the host's frame clock.
//!
//! # Features
//!
//! - **Easing**: jQuery-style `swing`, polynomial curves, CSS cubic-bezier
//! - **Scroll tweens**: Offset interpolation over a fixed duration
//! - **Scheduler**: One in-flight tween per target, last write wins

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, Frame};
pub use tween::ScrollTween;
