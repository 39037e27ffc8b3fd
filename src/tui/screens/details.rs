//! Detail screen for one selected quote.
//!
//! Shows the snapshot taken when the tile was selected plus the current
//! date and time. Nothing here triggers a price request.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::quote::{PriceQuote, format_clock, format_long_date, format_timestamp, format_usd};

/// Renders the detail screen for `quote`.
pub fn render(frame: &mut Frame, quote: &PriceQuote) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Header
            Constraint::Length(18), // Detail card
            Constraint::Min(0),
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!("{} Details", quote.metal),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, layout[0]);

    render_card(frame, layout[1], quote);

    let key = Style::default().fg(Color::Cyan);
    let help = Line::from(vec![
        Span::styled(" Esc", key),
        Span::raw(" back  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(help), layout[3]);
}

fn render_card(frame: &mut Frame, area: Rect, quote: &PriceQuote) {
    let now = Local::now();
    let price = Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC);

    let rows = [
        ("Metal Name", quote.metal.clone(), value),
        (
            "Current Price (per ounce)",
            format_usd(quote.current_price),
            price,
        ),
        (
            "24 Karat Price (per gram)",
            format_usd(quote.price_24k),
            price,
        ),
        ("Previous Open Price", format_usd(quote.previous_open), value),
        (
            "Previous Close Price",
            format_usd(quote.previous_close),
            value,
        ),
        ("Today's Date", format_long_date(&now), value),
        ("Current Time", format_clock(&now), value),
        ("Last Updated", format_timestamp(&quote.timestamp), muted),
    ];

    let mut lines = Vec::with_capacity(rows.len() * 2);
    for (label, text, style) in rows {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(text, style)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
