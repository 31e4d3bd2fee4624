use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Block,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tickruler_core::config::{LabelAlignment, RulerConfig};
use tickruler_core::layout::leading_padding;
use tickruler_core::TickDescriptor;

use crate::app::App;

const INDICATOR: &str = "▼";
const MAJOR_GLYPH: &str = "┃";
const MINOR_GLYPH: &str = "│";

/// Ruler pixels represented by one terminal row
const PIXELS_PER_ROW: f64 = 10.0;

/// Extra columns drawn past each edge so labels of off-screen ticks still clip in
const LABEL_MARGIN_COLUMNS: f64 = 8.0;

pub struct RulerWidget;

impl RulerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg)), area);
        draw_ruler(frame.buffer_mut(), area, app);
    }
}

/// Row assignment inside the ruler area
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rows {
    band_top: u16,
    major_rows: u16,
    minor_rows: u16,
    label_row: u16,
}

impl Rows {
    /// Needs at least three rows: indicator, one tick row and one label row
    fn new(area: Rect, config: &RulerConfig) -> Option<Self> {
        if area.height < 3 {
            return None;
        }
        let available = area.height - 1;
        let spacing_rows = ((config.label_style.spacing / PIXELS_PER_ROW).round().max(0.0) as u16)
            .min(available - 2);
        let major_rows = available - 1 - spacing_rows;

        let (band_top, label_row) = match config.label_style.alignment {
            LabelAlignment::Bottom => {
                let band_top = area.y + 1;
                (band_top, band_top + major_rows + spacing_rows)
            }
            LabelAlignment::Top => {
                let label_row = area.y + 1;
                (label_row + 1 + spacing_rows, label_row)
            }
        };

        let style = &config.tick_style;
        let minor_rows = if style.major_height > 0.0 {
            let ratio = style.minor_height / style.major_height;
            ((major_rows as f64 * ratio).round() as u16).clamp(1, major_rows)
        } else {
            major_rows
        };

        Some(Self {
            band_top,
            major_rows,
            minor_rows,
            label_row,
        })
    }
}

fn draw_ruler(buf: &mut Buffer, area: Rect, app: &App) {
    if area.width == 0 {
        return;
    }
    let config = app.config();
    let Some(rows) = Rows::new(area, config) else {
        return;
    };

    let centre = area.x + area.width / 2;
    buf.set_string(
        centre,
        area.y,
        INDICATOR,
        Style::default()
            .fg(app.theme.indicator)
            .add_modifier(Modifier::BOLD),
    );

    let px = app.pixels_per_column();
    let offset = app.offset();
    let origin = leading_padding(config) + offset;

    // Only ticks near the viewport are drawn
    let half_px = (area.width as f64 / 2.0 + LABEL_MARGIN_COLUMNS) * px;
    let first = ((offset - half_px) / config.tick_spacing).floor().max(0.0) as usize;
    let last = ((offset + half_px) / config.tick_spacing).ceil().max(0.0) as usize;

    for tick in app.ticks().iter().skip(first).take(last.saturating_sub(first) + 1) {
        let column = centre as i64 + ((tick.line.x - origin) / px).round() as i64;
        draw_tick(buf, area, rows, column, tick, app);
        draw_label(buf, area, rows, column, tick, app);
    }
}

fn draw_tick(buf: &mut Buffer, area: Rect, rows: Rows, column: i64, tick: &TickDescriptor, app: &App) {
    if column < area.x as i64 || column >= area.right() as i64 {
        return;
    }
    let column = column as u16;

    let (glyph, height, fallback) = if tick.is_major() {
        (MAJOR_GLYPH, rows.major_rows, app.theme.major)
    } else {
        (MINOR_GLYPH, rows.minor_rows, app.theme.minor)
    };
    let mut style = Style::default().fg(app.theme.color_or(&tick.line.color, fallback));
    if tick.is_major() || tick.is_matched {
        style = style.add_modifier(Modifier::BOLD);
    }

    for row in rows.band_top..(rows.band_top + height).min(area.bottom()) {
        buf.set_string(column, row, glyph, style);
    }
}

/// Labels are centred on their tick and clipped to the area.
/// Terminal cells cannot rotate text, so rotation is not drawn.
fn draw_label(buf: &mut Buffer, area: Rect, rows: Rows, column: i64, tick: &TickDescriptor, app: &App) {
    let (Some(label), Some(placement)) = (&tick.label, &tick.label_placement) else {
        return;
    };
    if rows.label_row >= area.bottom() {
        return;
    }
    let style = Style::default().fg(app.theme.color_or(&placement.color, app.theme.label));

    let mut x = column - (label.width() as i64) / 2;
    for ch in label.chars() {
        let width = ch.width().unwrap_or(0) as i64;
        if x >= area.x as i64 && x + width <= area.right() as i64 {
            buf.set_string(x as u16, rows.label_row, ch.to_string(), style);
        }
        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tickruler_core::config::UiConfig;

    fn app(alignment: LabelAlignment, height: u16) -> App {
        let mut config = RulerConfig {
            min_value: 20,
            max_value: 60,
            initial_value: 36,
            smaller_interval: 2,
            tick_spacing: 20.0,
            match_values: vec![38],
            ..Default::default()
        };
        config.label_style.alignment = alignment;
        let mut app = App::new(config, UiConfig::default()).unwrap();
        app.resize(40, height);
        app
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| RulerWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_rows_for_bottom_labels() {
        let config = RulerConfig::default();
        let rows = Rows::new(Rect::new(0, 0, 40, 6), &config).unwrap();
        assert_eq!(
            rows,
            Rows {
                band_top: 1,
                major_rows: 4,
                minor_rows: 2,
                label_row: 5,
            }
        );
        assert!(Rows::new(Rect::new(0, 0, 40, 2), &config).is_none());
    }

    #[test]
    fn test_indicator_sits_over_current_tick() {
        let app = app(LabelAlignment::Bottom, 6);
        let buf = render(&app, 40, 6);

        assert_eq!(buf[(20, 0)].symbol(), INDICATOR);
        // Value 36 is a minor tick, two rows tall
        assert_eq!(buf[(20, 1)].symbol(), MINOR_GLYPH);
        assert_eq!(buf[(20, 2)].symbol(), MINOR_GLYPH);
        assert_eq!(buf[(20, 3)].symbol(), " ");
        // Two columns per tick
        assert_eq!(buf[(21, 1)].symbol(), " ");
        assert_eq!(buf[(22, 1)].symbol(), MINOR_GLYPH);
    }

    #[test]
    fn test_major_ticks_and_labels() {
        let app = app(LabelAlignment::Bottom, 6);
        let buf = render(&app, 40, 6);

        // Value 40 is four ticks right of centre
        for y in 1..=4 {
            assert_eq!(buf[(28, y)].symbol(), MAJOR_GLYPH);
        }
        assert_eq!(buf[(12, 4)].symbol(), MAJOR_GLYPH);
        assert!(row(&buf, 5).contains("30"));
        assert_eq!(buf[(27, 5)].symbol(), "4");
        assert_eq!(buf[(28, 5)].symbol(), "0");
    }

    #[test]
    fn test_matched_tick_uses_matched_color() {
        let app = app(LabelAlignment::Bottom, 6);
        let buf = render(&app, 40, 6);
        assert_eq!(buf[(24, 1)].fg, app.theme.matched);
        assert_eq!(buf[(22, 1)].fg, app.theme.minor);
    }

    #[test]
    fn test_top_alignment_puts_labels_above_ticks() {
        let app = app(LabelAlignment::Top, 6);
        let buf = render(&app, 40, 6);

        assert_eq!(buf[(27, 1)].symbol(), "4");
        assert_eq!(buf[(28, 2)].symbol(), MAJOR_GLYPH);
        assert_eq!(buf[(28, 5)].symbol(), MAJOR_GLYPH);
    }

    #[test]
    fn test_tiny_area_draws_nothing() {
        let app = app(LabelAlignment::Bottom, 2);
        let buf = render(&app, 40, 2);
        assert!(!row(&buf, 0).contains(INDICATOR));
    }
}
