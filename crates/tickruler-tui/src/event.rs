use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    /// Poll faster while a snap is pending or animating
    pub fn with_animation_tick(tick_rate_ms: u64, animation_tick: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick,
        }
    }

    /// Poll for the next event, waiting at most one tick
    pub fn next(&self, fast: bool) -> Result<Option<AppEvent>> {
        let timeout = if fast { self.animation_tick } else { self.tick_rate };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse press, drag, release or wheel
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
