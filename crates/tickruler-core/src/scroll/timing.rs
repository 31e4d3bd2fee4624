//! Time calculation utilities for offset animations
//!
//! Every function takes the current instant explicitly so callers (and
//! tests) control the clock.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
