//! Home screen: the four metal tiles.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Metal;
use crate::tui::app::App;
use crate::tui::components::{status_bar, tile};

/// Height of one tile including borders.
const TILE_HEIGHT: u16 = 5;

/// Renders the home screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let mut constraints = vec![Constraint::Length(2)]; // Header
    constraints.extend(Metal::ALL.iter().map(|_| Constraint::Length(TILE_HEIGHT)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // Status bar
    constraints.push(Constraint::Length(1)); // Keybindings help

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, layout[0], app);

    for (i, metal) in Metal::ALL.into_iter().enumerate() {
        tile::render(frame, layout[i + 1], metal, app.tile(metal), i == app.cursor);
    }

    let footer = Metal::ALL.len() + 2;
    status_bar::render(frame, layout[footer], app);
    render_keybindings(frame, layout[footer + 1]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            "Metals Price Tracker",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Live prices updated every {} seconds",
                app.refresh_interval.as_secs()
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled(" j/k", key),
        Span::raw(" move  "),
        Span::styled("Enter", key),
        Span::raw(" details  "),
        Span::styled("r", key),
        Span::raw(" refresh  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
