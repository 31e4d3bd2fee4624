//! Offset animation primitives used by the snap animation
//!
//! ## Atomic layer
//! - `easing` - Pure easing curves over [0, 1]
//! - `timing` - Progress and interpolation against an explicit clock
//!
//! ## Molecular layer
//! - `animation` - Offset animator combining both
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tickruler_core::scroll::OffsetAnimator;
//! use tickruler_core::EasingType;
//!
//! let start = Instant::now();
//! let mut animator = OffsetAnimator::new(0.0);
//! animator.animate_to(100.0, Duration::from_millis(200), EasingType::Linear, start);
//!
//! let frame = animator.update(start + Duration::from_millis(100));
//! assert_eq!(frame.offset(), 50.0);
//! ```

// Atomic layer
pub mod easing;
pub mod timing;

// Molecular layer
pub mod animation;

pub use animation::{AnimationFrame, OffsetAnimator};
pub use easing::EasingTypeExt;
