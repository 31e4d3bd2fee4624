use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tickruler_core::mapper::value_precision;
use tickruler_core::SnapPhase;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let session = app.session();

        let phase_str = if !session.is_active() {
            "WAITING"
        } else {
            match session.phase() {
                SnapPhase::Idle => "IDLE",
                SnapPhase::PendingSnap { .. } => "SETTLING",
                SnapPhase::Animating { .. } => "SNAPPING",
            }
        };

        let precision = value_precision(app.config().smaller_interval);
        let value_text = format!(" {:.*} ", precision, app.value());
        let status_text = format!("| {} | reports: {} ", phase_str, app.reports());

        let help_hint = " q:quit h/l:move H/L:fast g/G:ends ";
        let used = value_text.width() + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let base = Style::default().fg(theme.status_fg).bg(theme.status_bg);
        let line = Line::from(vec![
            Span::styled(value_text, base.add_modifier(Modifier::BOLD)),
            Span::styled(status_text, base),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, Style::default().fg(theme.hint).bg(theme.status_bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
