use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::{info, warn};

use tickruler_core::AppConfig;
use tickruler_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{RulerWidget, StatusBarWidget},
};

pub async fn run(config: AppConfig) -> Result<()> {
    let mut app = App::new(config.ruler, config.ui.clone())?;
    let event_handler =
        EventHandler::with_animation_tick(config.ui.tick_rate_ms, config.ui.animation_tick_duration());

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("tickruler"))?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            let _ = disable_raw_mode();
        },
    )?;

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(value = app.value(), "Ruler closed");
    println!("{}", app.value());
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let mut ruler_size: Option<(u16, u16)> = None;

    loop {
        let size = terminal.size()?;
        let (ruler_area, _) = split_areas(Rect::new(0, 0, size.width, size.height));
        let current = (ruler_area.width, ruler_area.height);
        if ruler_size != Some(current) {
            app.resize(current.0, current.1);
            ruler_size = Some(current);
        }

        app.update(Instant::now());

        terminal.draw(|frame| {
            let (ruler_area, status_area) = split_areas(frame.area());
            RulerWidget::render(frame, ruler_area, app);
            StatusBarWidget::render(frame, status_area, app);
        })?;

        if let Some(event) = event_handler.next(app.needs_fast_update())? {
            match event {
                AppEvent::Key(key) => app.apply(handle_key_event(key), Instant::now()),
                AppEvent::Mouse(mouse) => app.apply(handle_mouse_event(mouse), Instant::now()),
                // Picked up from the terminal size on the next iteration
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Run `setup`, calling `restore` before returning its error
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|e| {
        warn!(error = %e, "Terminal setup failed, restoring");
        restore();
    })
}

/// Ruler on top, one-line status bar below
fn split_areas(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}
