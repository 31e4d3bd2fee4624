//! Horizontal scrollable viewport abstraction
//!
//! A [`crate::ScrollSession`] drives its viewport through this trait and
//! never assumes a particular UI toolkit. [`SimulatedViewport`] is the
//! in-process implementation used by the terminal host and by tests.

use std::time::{Duration, Instant};

use crate::config::{EasingType, RulerConfig};
use crate::mapper;
use crate::scroll::{AnimationFrame, OffsetAnimator};

/// Outcome of advancing the viewport's running animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStatus {
    Idle,
    Running { offset: f64 },
    Completed { offset: f64 },
}

impl From<AnimationFrame> for AnimationStatus {
    fn from(frame: AnimationFrame) -> Self {
        match frame {
            AnimationFrame::Idle { .. } => AnimationStatus::Idle,
            AnimationFrame::Running { offset } => AnimationStatus::Running { offset },
            AnimationFrame::Completed { offset } => AnimationStatus::Completed { offset },
        }
    }
}

pub trait Viewport {
    /// Current horizontal offset
    fn offset(&self) -> f64;

    /// Largest reachable offset
    fn max_scroll_extent(&self) -> f64;

    /// Whether the first layout pass has happened; offsets are undefined before it
    fn has_dimensions(&self) -> bool;

    /// Move to `offset` instantly, cancelling any animation
    fn jump_to(&mut self, offset: f64);

    /// Begin animating toward `offset`; completion is reported by [`Viewport::advance`]
    fn animate_to(&mut self, offset: f64, duration: Duration, curve: EasingType, now: Instant);

    /// Step the running animation to `now`
    fn advance(&mut self, now: Instant) -> AnimationStatus;

    /// Halt a running animation where it is
    fn stop_animation(&mut self);
}

/// Viewport backed by an [`OffsetAnimator`]
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    animator: OffsetAnimator,
    max_extent: f64,
    dimensions: Option<(f64, f64)>,
}

impl SimulatedViewport {
    /// Viewport that has not been laid out yet
    pub fn new(max_extent: f64) -> Self {
        Self {
            animator: OffsetAnimator::new(0.0),
            max_extent: max_extent.max(0.0),
            dimensions: None,
        }
    }

    /// Viewport sized from the config, already laid out
    pub fn for_config(config: &RulerConfig) -> Self {
        let mut viewport = Self::new(mapper::max_scroll_extent(config));
        viewport.set_dimensions(config.viewport_width, config.viewport_height);
        viewport
    }

    /// Record a measured size; the first call is the first layout pass
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.dimensions = Some((width, height));
    }

    pub fn dimensions(&self) -> Option<(f64, f64)> {
        self.dimensions
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Target of the running animation, or the current offset
    pub fn target_offset(&self) -> f64 {
        self.animator.target_offset()
    }

    /// Move by `delta` as a user drag would, clamped to the extent
    pub fn drag_by(&mut self, delta: f64) -> f64 {
        let offset = (self.animator.current_offset() + delta).clamp(0.0, self.max_extent);
        self.animator.set_offset(offset);
        offset
    }
}

impl Viewport for SimulatedViewport {
    fn offset(&self) -> f64 {
        self.animator.current_offset()
    }

    fn max_scroll_extent(&self) -> f64 {
        self.max_extent
    }

    fn has_dimensions(&self) -> bool {
        self.dimensions.is_some()
    }

    fn jump_to(&mut self, offset: f64) {
        self.animator.set_offset(offset.clamp(0.0, self.max_extent));
    }

    fn animate_to(&mut self, offset: f64, duration: Duration, curve: EasingType, now: Instant) {
        let target = offset.clamp(0.0, self.max_extent);
        self.animator.animate_to(target, duration, curve, now);
    }

    fn advance(&mut self, now: Instant) -> AnimationStatus {
        self.animator.update(now).into()
    }

    fn stop_animation(&mut self) {
        self.animator.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_state() {
        let mut viewport = SimulatedViewport::new(100.0);
        assert!(!viewport.has_dimensions());
        viewport.set_dimensions(300.0, 60.0);
        assert!(viewport.has_dimensions());
        assert_eq!(viewport.dimensions(), Some((300.0, 60.0)));
    }

    #[test]
    fn test_for_config_uses_tick_extent() {
        let viewport = SimulatedViewport::for_config(&RulerConfig::default());
        assert_eq!(viewport.max_scroll_extent(), 2000.0);
        assert!(viewport.has_dimensions());
    }

    #[test]
    fn test_jump_and_drag_are_clamped() {
        let mut viewport = SimulatedViewport::new(100.0);
        viewport.jump_to(150.0);
        assert_eq!(viewport.offset(), 100.0);
        assert_eq!(viewport.drag_by(-130.0), 0.0);
        assert_eq!(viewport.drag_by(12.5), 12.5);
    }

    #[test]
    fn test_animation_reports_completion() {
        let t0 = Instant::now();
        let mut viewport = SimulatedViewport::new(100.0);
        viewport.animate_to(500.0, Duration::from_millis(10), EasingType::Linear, t0);
        assert_eq!(viewport.target_offset(), 100.0);
        assert!(matches!(
            viewport.advance(t0 + Duration::from_millis(5)),
            AnimationStatus::Running { .. }
        ));
        assert_eq!(
            viewport.advance(t0 + Duration::from_millis(10)),
            AnimationStatus::Completed { offset: 100.0 }
        );
        assert_eq!(viewport.advance(t0 + Duration::from_millis(20)), AnimationStatus::Idle);
    }

    #[test]
    fn test_stop_animation_freezes_offset() {
        let t0 = Instant::now();
        let mut viewport = SimulatedViewport::new(100.0);
        viewport.animate_to(100.0, Duration::from_millis(100), EasingType::Linear, t0);
        viewport.advance(t0 + Duration::from_millis(50));
        viewport.stop_animation();
        let offset = viewport.offset();
        assert_eq!(viewport.advance(t0 + Duration::from_millis(200)), AnimationStatus::Idle);
        assert_eq!(viewport.offset(), offset);
    }
}
