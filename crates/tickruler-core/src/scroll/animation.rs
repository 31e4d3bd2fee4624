//! Offset animation controller
//!
//! Combines easing functions and timing utilities to move a scroll offset
//! toward a target over a fixed duration.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active offset animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting offset
    from: f64,
    /// Target offset
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Result of advancing an [`OffsetAnimator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationFrame {
    /// No animation was running
    Idle { offset: f64 },
    /// Animation still in flight at the interpolated offset
    Running { offset: f64 },
    /// Animation reached its target on this update
    Completed { offset: f64 },
}

impl AnimationFrame {
    pub fn offset(&self) -> f64 {
        match *self {
            AnimationFrame::Idle { offset }
            | AnimationFrame::Running { offset }
            | AnimationFrame::Completed { offset } => offset,
        }
    }
}

/// Offset animation controller
///
/// Call `animate_to()` to begin an animation, then `update()` each frame
/// to get the current interpolated offset. Starting a new animation
/// replaces the one in flight.
#[derive(Debug, Clone, Default)]
pub struct OffsetAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Current offset (always up-to-date)
    current: f64,
}

impl OffsetAnimator {
    pub fn new(offset: f64) -> Self {
        Self {
            animation: None,
            current: offset,
        }
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[inline]
    pub fn current_offset(&self) -> f64 {
        self.current
    }

    /// Final offset after the running animation, or the current one
    pub fn target_offset(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    /// Set offset immediately, dropping any animation
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
    }

    /// Start animating from the current offset toward `target`
    pub fn animate_to(&mut self, target: f64, duration: Duration, easing: EasingType, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration,
            easing,
        });
    }

    /// Advance to `now` and report where the offset landed
    pub fn update(&mut self, now: Instant) -> AnimationFrame {
        let Some(anim) = self.animation.as_ref() else {
            return AnimationFrame::Idle {
                offset: self.current,
            };
        };

        if is_complete(anim.start, anim.duration, now) {
            self.current = anim.to;
            self.animation = None;
            AnimationFrame::Completed {
                offset: self.current,
            }
        } else {
            let t = progress(anim.start, anim.duration, now);
            let eased_t = anim.easing.apply(t);
            self.current = lerp(anim.from, anim.to, eased_t);
            AnimationFrame::Running {
                offset: self.current,
            }
        }
    }

    /// Cancel any active animation and stop at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}
