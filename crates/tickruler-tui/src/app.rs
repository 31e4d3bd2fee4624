use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use tickruler_core::config::UiConfig;
use tickruler_core::{
    build_tick_descriptors, mapper, RulerConfig, ScrollSession, SimulatedViewport, SnapPhase,
    TickDescriptor, Viewport,
};

use crate::input::Action;
use crate::theme::Theme;

/// Terminal host state for one ruler
pub struct App {
    session: ScrollSession<SimulatedViewport>,
    /// Value notifications from the session listener
    values_rx: mpsc::UnboundedReceiver<f64>,
    /// Tick render model, fixed for the session's config
    ticks: Vec<TickDescriptor>,
    pub theme: Theme,
    pub ui: UiConfig,
    /// Latest reported value
    value: f64,
    /// Number of value notifications received
    reports: u64,
    /// Column of the last mouse position during a drag
    drag_column: Option<u16>,
    pub should_quit: bool,
}

impl App {
    /// Build the session; the initial jump waits for the first [`App::resize`]
    pub fn new(config: RulerConfig, ui: UiConfig) -> tickruler_core::Result<Self> {
        let (values_tx, values_rx) = mpsc::unbounded_channel();
        let theme = Theme::from_config(&config);
        let ticks = build_tick_descriptors(&config);
        let viewport = SimulatedViewport::new(mapper::max_scroll_extent(&config));

        let mut session = ScrollSession::new(config, viewport)?.with_value_listener(move |value| {
            if values_tx.send(value).is_err() {
                warn!("Failed to send ruler value: receiver dropped");
            }
        });
        session.initialize();
        let value = session.value();

        Ok(Self {
            session,
            values_rx,
            ticks,
            theme,
            ui,
            value,
            reports: 0,
            drag_column: None,
            should_quit: false,
        })
    }

    pub fn session(&self) -> &ScrollSession<SimulatedViewport> {
        &self.session
    }

    pub fn config(&self) -> &RulerConfig {
        self.session.config()
    }

    pub fn ticks(&self) -> &[TickDescriptor] {
        &self.ticks
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Content offset currently shown
    pub fn offset(&self) -> f64 {
        self.session.viewport().offset()
    }

    /// Ruler pixels covered by one terminal column
    pub fn pixels_per_column(&self) -> f64 {
        self.config().tick_spacing / self.ui.columns_per_tick.max(1) as f64
    }

    /// Record the ruler area size; the first call completes the initial layout
    pub fn resize(&mut self, width: u16, height: u16) {
        let px = self.pixels_per_column();
        self.session
            .viewport_mut()
            .set_dimensions(width as f64 * px, height as f64);
        self.session.on_layout();
        self.drain_values();
    }

    /// Whether the loop should poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.session.phase() != SnapPhase::Idle
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if !self.session.is_active() {
            return;
        }

        let px = self.pixels_per_column();
        match action {
            Action::Nudge(columns) => {
                self.drag_by(columns as f64 * px);
                self.session.on_scroll_ended(now);
            }
            Action::JumpToMin => {
                self.drag_to(0.0);
                self.session.on_scroll_ended(now);
            }
            Action::JumpToMax => {
                let extent = self.session.viewport().max_scroll_extent();
                self.drag_to(extent);
                self.session.on_scroll_ended(now);
            }
            Action::DragStart(column) => {
                self.drag_column = Some(column);
                self.session.on_scroll_resumed();
            }
            Action::DragTo(column) => {
                if let Some(previous) = self.drag_column {
                    // Content follows the pointer, so moving right scrolls back
                    self.drag_by((previous as f64 - column as f64) * px);
                    self.drag_column = Some(column);
                }
            }
            Action::DragEnd => {
                if self.drag_column.take().is_some() {
                    self.session.on_scroll_ended(now);
                }
            }
            Action::Quit | Action::None => {}
        }
        self.drain_values();
    }

    /// Advance timers and animations to `now`
    pub fn update(&mut self, now: Instant) {
        self.session.tick(now);
        self.drain_values();
    }

    fn drag_by(&mut self, delta: f64) {
        self.session.on_scroll_resumed();
        let offset = self.session.viewport_mut().drag_by(delta);
        self.session.on_scroll_position_changed(offset);
    }

    fn drag_to(&mut self, offset: f64) {
        self.session.on_scroll_resumed();
        self.session.viewport_mut().jump_to(offset);
        let offset = self.session.viewport().offset();
        self.session.on_scroll_position_changed(offset);
    }

    fn drain_values(&mut self) {
        while let Ok(value) = self.values_rx.try_recv() {
            debug!(value, "Ruler value changed");
            self.value = value;
            self.reports += 1;
        }
    }
}
