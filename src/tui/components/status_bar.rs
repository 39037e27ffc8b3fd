//! Status bar component.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Metal;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.refresh_indicator.is_visible_at(Instant::now()) {
        spans.push(Span::styled(
            " ⟳ Refreshing ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        spans.push(Span::raw("│"));
    }

    let loaded = app.loaded_count();
    let loaded_color = if loaded == Metal::ALL.len() {
        Color::Green
    } else {
        Color::White
    };
    spans.push(Span::styled(
        format!(" {loaded}/{} loaded ", Metal::ALL.len()),
        Style::default().fg(loaded_color),
    ));

    let loading = app.loading_count();
    if loading > 0 {
        spans.push(Span::raw("│"));
        spans.push(Span::styled(
            format!(" {loading} loading "),
            Style::default().fg(Color::Yellow),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
