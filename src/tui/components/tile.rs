//! Metal tile component.

use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::Metal;
use crate::models::quote::{format_clock, format_usd};
use crate::orchestrator::TileState;

/// Renders one metal tile. `highlighted` marks the tile under the cursor.
pub fn render(frame: &mut Frame, area: Rect, metal: Metal, state: &TileState, highlighted: bool) {
    let border_style = match state {
        TileState::Error(_) => Style::default().fg(Color::Red),
        _ if highlighted => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::DarkGray),
    };

    let mut title = vec![Span::styled(
        format!(" {} ", metal.display_name()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if matches!(state, TileState::Loading) {
        title.push(Span::styled("⟳ ", Style::default().fg(Color::Yellow)));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match state {
        TileState::Idle => vec![Line::from(Span::styled(
            "--",
            Style::default().fg(Color::DarkGray),
        ))],
        TileState::Loading => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Gray),
        ))],
        TileState::Error(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        TileState::Loaded(quote) => vec![
            Line::from(vec![
                Span::styled("24 Karat Price  ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}/g", format_usd(quote.price_24k)),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Current Price   ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}/oz", format_usd(quote.current_price)),
                    Style::default().fg(Color::Blue),
                ),
            ]),
            Line::from(vec![
                Span::styled("Last Updated    ", Style::default().fg(Color::DarkGray)),
                Span::raw(format_clock(&quote.timestamp.with_timezone(&Local))),
            ]),
        ],
    };

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}
