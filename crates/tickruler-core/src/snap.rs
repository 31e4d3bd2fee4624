//! Snap-to-tick scheduling
//!
//! A small state machine deciding when to snap and to which tick:
//!
//! ```text
//!   Idle --scroll ended--> PendingSnap --deadline--> Animating --done--> Idle
//!    ^                         |                         |
//!    +-------scroll resumed----+-------------------------+
//! ```
//!
//! The scheduler owns the pending timer as plain state, so cancelling it
//! is just dropping it. It never touches the viewport; [`crate::ScrollSession`]
//! carries out the decisions it returns.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{EasingType, RulerConfig};
use crate::mapper;

/// Offset difference below which the viewport counts as already snapped
const SNAP_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPhase {
    Idle,
    /// Debounce timer armed, fires at `deadline`
    PendingSnap { deadline: Instant },
    /// Offset animation toward `target_index` in flight
    Animating { target_index: usize },
}

/// What to do when a debounce timer fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapDecision {
    /// Animate the viewport to `target_offset`
    Animate {
        target_index: usize,
        target_offset: f64,
        duration: Duration,
        curve: EasingType,
    },
    /// Already on the tick; report it without moving
    AlreadySnapped { target_index: usize },
}

#[derive(Debug, Clone)]
pub struct SnapScheduler {
    enabled: bool,
    debounce: Duration,
    duration: Duration,
    curve: EasingType,
    phase: SnapPhase,
}

impl SnapScheduler {
    pub fn new(config: &RulerConfig) -> Self {
        Self {
            enabled: config.snapping,
            debounce: config.snap_debounce(),
            duration: config.snap_animation_duration(),
            curve: config.snap_animation_curve,
            phase: SnapPhase::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == SnapPhase::Idle
    }

    /// Arm (or re-arm) the debounce timer after a drag ends.
    ///
    /// Ignored while a snap animation is already running.
    pub fn scroll_ended(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        match self.phase {
            SnapPhase::Animating { target_index } => {
                debug!(target_index, "Scroll ended during snap animation, ignoring");
            }
            SnapPhase::Idle | SnapPhase::PendingSnap { .. } => {
                let deadline = now + self.debounce;
                debug!(debounce_ms = self.debounce.as_millis(), "Snap timer armed");
                self.phase = SnapPhase::PendingSnap { deadline };
            }
        }
    }

    /// Drop any pending timer or running animation.
    ///
    /// Returns the phase that was cancelled, if any, so the caller can stop
    /// a viewport animation.
    pub fn cancel(&mut self) -> Option<SnapPhase> {
        let previous = std::mem::replace(&mut self.phase, SnapPhase::Idle);
        match previous {
            SnapPhase::Idle => None,
            phase => {
                debug!(?phase, "Snap cancelled");
                Some(phase)
            }
        }
    }

    /// Fire the debounce timer if it is due at `now`.
    ///
    /// The target tick is computed from `current_offset` as read at fire
    /// time, never from the offset when the timer was armed.
    pub fn poll_timer(
        &mut self,
        now: Instant,
        current_offset: f64,
        max_extent: f64,
        config: &RulerConfig,
    ) -> Option<SnapDecision> {
        let SnapPhase::PendingSnap { deadline } = self.phase else {
            return None;
        };
        if now < deadline {
            return None;
        }

        let target_index = mapper::nearest_tick_index(current_offset, config);
        let target_offset = (target_index as f64 * config.tick_spacing).clamp(0.0, max_extent.max(0.0));
        self.phase = SnapPhase::Animating { target_index };

        if (target_offset - current_offset).abs() < SNAP_EPSILON {
            debug!(target_index, "Snap timer fired, already on tick");
            return Some(SnapDecision::AlreadySnapped { target_index });
        }

        debug!(target_index, target_offset, "Snap timer fired, animating");
        Some(SnapDecision::Animate {
            target_index,
            target_offset,
            duration: self.duration,
            curve: self.curve,
        })
    }

    /// Finish the running snap; returns the tick it landed on
    pub fn animation_completed(&mut self) -> Option<usize> {
        match self.phase {
            SnapPhase::Animating { target_index } => {
                self.phase = SnapPhase::Idle;
                debug!(target_index, "Snap animation completed");
                Some(target_index)
            }
            _ => None,
        }
    }

    /// Time until the pending timer fires, for hosts that sleep between frames
    pub fn time_until_deadline(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            SnapPhase::PendingSnap { deadline } => Some(deadline.saturating_duration_since(now)),
            _ => None,
        }
    }
}
