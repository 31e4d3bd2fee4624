//! Interaction controller for one mounted ruler
//!
//! Hosts forward viewport notifications (`on_scroll_position_changed`,
//! `on_scroll_ended`, `on_scroll_resumed`) and call [`ScrollSession::tick`]
//! every frame. The session turns those into value-changed notifications
//! and snap animations. Everything runs on the caller's thread.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::RulerConfig;
use crate::mapper;
use crate::snap::{SnapDecision, SnapPhase, SnapScheduler};
use crate::viewport::{AnimationStatus, Viewport};
use crate::Result;

/// Minimum change in value that produces a notification
const VALUE_TOLERANCE: f64 = 1e-6;

/// Receives every reported value
pub type ValueListener = Box<dyn FnMut(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    /// `initialize` ran before the viewport was laid out
    AwaitingLayout,
    Active,
    Disposed,
}

#[derive(Debug, Clone, Copy, Default)]
struct ScrollState {
    offset: f64,
    last_reported: Option<f64>,
}

pub struct ScrollSession<V: Viewport> {
    config: RulerConfig,
    viewport: V,
    state: ScrollState,
    scheduler: SnapScheduler,
    listener: Option<ValueListener>,
    lifecycle: Lifecycle,
}

impl<V: Viewport> ScrollSession<V> {
    /// Validate `config` and bind it to `viewport`
    pub fn new(config: RulerConfig, viewport: V) -> Result<Self> {
        config.validate()?;
        let scheduler = SnapScheduler::new(&config);
        let state = ScrollState {
            offset: mapper::offset_for_value(config.initial_value, &config),
            last_reported: None,
        };

        Ok(Self {
            config,
            viewport,
            state,
            scheduler,
            listener: None,
            lifecycle: Lifecycle::Created,
        })
    }

    /// Register the value-changed callback
    pub fn with_value_listener(mut self, listener: impl FnMut(f64) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Current content offset as last applied
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Last reported value, or the value at the current offset
    pub fn value(&self) -> f64 {
        self.state
            .last_reported
            .unwrap_or_else(|| mapper::value_for_offset(self.state.offset, &self.config))
    }

    pub fn phase(&self) -> SnapPhase {
        self.scheduler.phase()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Jump to the initial value and report it.
    ///
    /// If the viewport has not been laid out yet, the jump is deferred to
    /// the first [`ScrollSession::on_layout`] call.
    pub fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        if self.viewport.has_dimensions() {
            self.jump_to_initial();
        } else {
            debug!("Viewport not laid out yet, deferring initial jump");
            self.lifecycle = Lifecycle::AwaitingLayout;
        }
    }

    /// Post-layout continuation; runs the deferred initial jump once
    pub fn on_layout(&mut self) {
        if self.lifecycle == Lifecycle::AwaitingLayout && self.viewport.has_dimensions() {
            self.jump_to_initial();
        }
    }

    fn jump_to_initial(&mut self) {
        let offset = mapper::offset_for_value(self.config.initial_value, &self.config);
        self.viewport.jump_to(offset);
        self.lifecycle = Lifecycle::Active;
        info!(
            initial_value = self.config.initial_value,
            offset, "Ruler session initialized"
        );
        self.on_scroll_position_changed(offset);
    }

    /// Apply a scroll update from the host and report the value if it moved.
    ///
    /// A pending snap timer or running snap animation is cancelled first;
    /// snap animation frames are applied by [`ScrollSession::tick`] instead.
    pub fn on_scroll_position_changed(&mut self, new_offset: f64) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        if let Some(SnapPhase::Animating { .. }) = self.scheduler.cancel() {
            self.viewport.stop_animation();
        }
        self.apply_offset(new_offset);
    }

    fn apply_offset(&mut self, new_offset: f64) {
        self.state.offset = mapper::clamp_offset(new_offset, &self.config);
        let value = mapper::value_for_offset(self.state.offset, &self.config);
        self.report(value);
    }

    /// Drag finished; arms the snap timer when snapping is enabled
    pub fn on_scroll_ended(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        self.scheduler.scroll_ended(now);
    }

    /// Drag started again; drops any pending or running snap
    pub fn on_scroll_resumed(&mut self) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        if let Some(SnapPhase::Animating { .. }) = self.scheduler.cancel() {
            self.viewport.stop_animation();
            self.state.offset = mapper::clamp_offset(self.viewport.offset(), &self.config);
        }
    }

    /// Fire due timers and advance the snap animation to `now`
    pub fn tick(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }

        let current = self.viewport.offset();
        let max_extent = self.viewport.max_scroll_extent();
        if let Some(decision) = self.scheduler.poll_timer(now, current, max_extent, &self.config) {
            match decision {
                SnapDecision::Animate {
                    target_offset,
                    duration,
                    curve,
                    ..
                } => self.viewport.animate_to(target_offset, duration, curve, now),
                SnapDecision::AlreadySnapped { .. } => self.complete_snap(),
            }
        }

        match self.viewport.advance(now) {
            AnimationStatus::Idle => {
                // The viewport dropped the snap animation without telling us
                if let Some(SnapPhase::Animating { target_index }) = self.scheduler.cancel() {
                    debug!(target_index, "Snap animation stopped by viewport");
                    let offset = self.viewport.offset();
                    self.apply_offset(offset);
                }
            }
            AnimationStatus::Running { offset } => self.apply_offset(offset),
            AnimationStatus::Completed { offset } => {
                self.apply_offset(offset);
                self.complete_snap();
            }
        }
    }

    /// Report the snapped tick unless it was already the last value
    fn complete_snap(&mut self) {
        if let Some(target_index) = self.scheduler.animation_completed() {
            let value = mapper::value_for_index(target_index, &self.config) as f64;
            self.report(value);
        }
    }

    fn report(&mut self, value: f64) {
        let changed = self
            .state
            .last_reported
            .map_or(true, |last| (value - last).abs() > VALUE_TOLERANCE);
        if !changed {
            return;
        }
        self.state.last_reported = Some(value);
        if let Some(listener) = self.listener.as_mut() {
            listener(value);
        }
    }

    /// Cancel pending work and release the listener. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        if self.scheduler.cancel().is_some() {
            debug!("Cancelled pending snap on dispose");
        }
        self.viewport.stop_animation();
        self.listener = None;
        self.lifecycle = Lifecycle::Disposed;
        info!("Ruler session disposed");
    }
}

impl<V: Viewport> Drop for ScrollSession<V> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use crate::config::EasingType;
    use crate::error::{ConfigError, Error};
    use crate::viewport::SimulatedViewport;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn config() -> RulerConfig {
        RulerConfig {
            min_value: 20,
            max_value: 60,
            initial_value: 36,
            tick_spacing: 20.0,
            ..Default::default()
        }
    }

    fn session(config: RulerConfig) -> (ScrollSession<SimulatedViewport>, Rc<RefCell<Vec<f64>>>) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        let viewport = SimulatedViewport::for_config(&config);
        let session = ScrollSession::new(config, viewport)
            .unwrap()
            .with_value_listener(move |v| sink.borrow_mut().push(v));
        (session, values)
    }

    fn drag_to(session: &mut ScrollSession<SimulatedViewport>, offset: f64) {
        session.on_scroll_resumed();
        session.viewport_mut().jump_to(offset);
        let offset = session.viewport().offset();
        session.on_scroll_position_changed(offset);
    }

    fn assert_values(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_initial_jump_reports_initial_value() {
        let (mut session, values) = session(config());
        session.initialize();

        assert_eq!(session.viewport().offset(), 320.0);
        assert_eq!(session.offset(), 320.0);
        assert_eq!(*values.borrow(), vec![36.0]);
        assert_eq!(session.value(), 36.0);
    }

    #[test]
    fn test_initialize_twice_reports_once() {
        let (mut session, values) = session(config());
        session.initialize();
        session.initialize();
        session.on_layout();
        assert_eq!(values.borrow().len(), 1);
    }

    #[test]
    fn test_initial_jump_waits_for_layout() {
        let cfg = config();
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        let viewport = SimulatedViewport::new(mapper::max_scroll_extent(&cfg));
        let mut session = ScrollSession::new(cfg, viewport)
            .unwrap()
            .with_value_listener(move |v| sink.borrow_mut().push(v));

        session.initialize();
        assert!(!session.is_active());
        assert_eq!(session.viewport().offset(), 0.0);
        assert!(values.borrow().is_empty());

        // Updates before layout are ignored
        session.on_scroll_position_changed(100.0);
        assert!(values.borrow().is_empty());

        session.viewport_mut().set_dimensions(400.0, 80.0);
        session.on_layout();
        session.on_layout();

        assert!(session.is_active());
        assert_eq!(session.viewport().offset(), 320.0);
        assert_eq!(*values.borrow(), vec![36.0]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let cfg = RulerConfig {
            initial_value: 61,
            ..config()
        };
        let viewport = SimulatedViewport::for_config(&cfg);
        let err = ScrollSession::new(cfg, viewport).err().unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InitialValueOutOfRange { value: 61, .. })
        ));
    }

    #[test]
    fn test_drag_reports_fractional_values_once() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 2,
            ..config()
        });
        session.initialize();

        drag_to(&mut session, 330.0);
        drag_to(&mut session, 331.0);
        drag_to(&mut session, 336.0);

        assert_values(&values.borrow(), &[36.0, 36.5, 37.0]);
    }

    #[test]
    fn test_offsets_are_clamped() {
        let (mut session, values) = session(config());
        session.initialize();
        session.on_scroll_position_changed(-500.0);
        session.on_scroll_position_changed(10_000.0);
        assert_eq!(session.offset(), 800.0);
        assert_values(&values.borrow(), &[36.0, 20.0, 60.0]);
    }

    #[test]
    fn test_snap_animates_to_nearest_tick() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);

        session.tick(t0 + ms(50));
        assert!(matches!(session.phase(), SnapPhase::PendingSnap { .. }));

        session.tick(t0 + ms(100));
        assert_eq!(session.phase(), SnapPhase::Animating { target_index: 17 });

        session.tick(t0 + ms(200));
        session.tick(t0 + ms(300));

        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 340.0);
        assert_values(&values.borrow(), &[36.0, 36.8, 36.9, 37.0]);
    }

    #[test]
    fn test_snap_reports_final_value_once() {
        let (mut session, values) = session(config());
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 347.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));
        session.tick(t0 + ms(300));

        assert_values(&values.borrow(), &[36.0, 37.0]);
        assert_eq!(session.viewport().offset(), 340.0);
    }

    #[test]
    fn test_repeated_scroll_ended_snaps_once() {
        let cfg = RulerConfig {
            smaller_interval: 10,
            ..config()
        };
        let (mut session, values) = session(cfg);
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.on_scroll_ended(t0 + ms(10));

        // First deadline was replaced
        session.tick(t0 + ms(100));
        assert!(matches!(session.phase(), SnapPhase::PendingSnap { .. }));

        session.tick(t0 + ms(110));
        assert!(matches!(session.phase(), SnapPhase::Animating { .. }));
        session.on_scroll_ended(t0 + ms(120));
        session.tick(t0 + ms(310));
        assert_eq!(session.phase(), SnapPhase::Idle);

        // Ending again once snapped does not move or report anything
        session.on_scroll_ended(t0 + ms(400));
        session.on_scroll_ended(t0 + ms(401));
        session.tick(t0 + ms(600));
        assert_eq!(session.phase(), SnapPhase::Idle);

        let reported = values.borrow();
        assert_eq!(reported.iter().filter(|v| (**v - 37.0).abs() < 1e-9).count(), 1);
        assert_eq!(session.viewport().offset(), 340.0);
    }

    #[test]
    fn test_resume_cancels_pending_snap() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(50));
        drag_to(&mut session, 333.0);

        session.tick(t0 + ms(500));
        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 333.0);
        assert_values(&values.borrow(), &[36.0, 36.8, 36.7]);
    }

    #[test]
    fn test_resume_cancels_running_animation() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));
        session.tick(t0 + ms(200));
        assert!(session.viewport().is_animating());

        session.on_scroll_resumed();
        assert!(!session.viewport().is_animating());
        assert_eq!(session.phase(), SnapPhase::Idle);

        session.tick(t0 + ms(400));
        assert_eq!(session.viewport().offset(), 337.5);
        assert_values(&values.borrow(), &[36.0, 36.8, 36.9]);
    }

    #[test]
    fn test_scroll_update_cancels_pending_snap() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(50));

        // Host reports movement without a resume notification
        session.viewport_mut().jump_to(333.0);
        session.on_scroll_position_changed(333.0);
        assert_eq!(session.phase(), SnapPhase::Idle);

        session.tick(t0 + ms(400));
        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 333.0);
        assert_values(&values.borrow(), &[36.0, 36.8, 36.7]);
    }

    #[test]
    fn test_scroll_update_cancels_running_snap() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));
        assert_eq!(session.phase(), SnapPhase::Animating { target_index: 17 });

        session.viewport_mut().jump_to(505.0);
        session.on_scroll_position_changed(505.0);
        assert_eq!(session.phase(), SnapPhase::Idle);

        // Snapping still works afterwards
        session.on_scroll_ended(t0 + ms(150));
        session.tick(t0 + ms(250));
        assert_eq!(session.phase(), SnapPhase::Animating { target_index: 25 });
        session.tick(t0 + ms(450));

        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 500.0);
        assert_values(&values.borrow(), &[36.0, 36.8, 45.3, 45.0]);
    }

    #[test]
    fn test_viewport_dropping_animation_frees_scheduler() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));

        // Viewport moved on its own; no position notification
        session.viewport_mut().jump_to(505.0);
        session.tick(t0 + ms(150));
        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.offset(), 505.0);

        session.on_scroll_ended(t0 + ms(150));
        session.tick(t0 + ms(250));
        session.tick(t0 + ms(450));

        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 500.0);
        assert_values(&values.borrow(), &[36.0, 36.8, 45.3, 45.0]);
    }

    #[test]
    fn test_rejects_range_too_large() {
        let cfg = RulerConfig {
            min_value: i64::MIN,
            max_value: i64::MAX,
            initial_value: 0,
            ..config()
        };
        let viewport = SimulatedViewport::new(0.0);
        let err = ScrollSession::new(cfg, viewport).err().unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::RangeTooLarge { .. })
        ));
    }

    #[test]
    fn test_snapping_disabled_never_moves() {
        let (mut session, values) = session(RulerConfig {
            snapping: false,
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(1000));

        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 335.0);
        assert_values(&values.borrow(), &[36.0, 36.8]);
    }

    #[test]
    fn test_zero_duration_snap_lands_same_tick() {
        let (mut session, values) = session(RulerConfig {
            snap_animation_duration_ms: 0,
            snap_animation_curve: EasingType::Cubic,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 372.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));

        assert_eq!(session.phase(), SnapPhase::Idle);
        assert_eq!(session.viewport().offset(), 380.0);
        assert_values(&values.borrow(), &[36.0, 39.0]);
    }

    #[test]
    fn test_dispose_mid_animation() {
        let (mut session, values) = session(RulerConfig {
            smaller_interval: 10,
            ..config()
        });
        session.initialize();
        let t0 = Instant::now();

        drag_to(&mut session, 335.0);
        session.on_scroll_ended(t0);
        session.tick(t0 + ms(100));

        session.dispose();
        session.dispose();
        assert!(session.is_disposed());
        assert!(!session.viewport().is_animating());
        assert_eq!(session.phase(), SnapPhase::Idle);

        session.tick(t0 + ms(400));
        session.on_scroll_position_changed(10.0);
        session.on_scroll_ended(t0 + ms(500));
        assert_values(&values.borrow(), &[36.0, 36.8]);
    }
}
