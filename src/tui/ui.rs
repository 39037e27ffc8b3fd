//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Screen};
use super::screens::{details, home};

/// Renders the screen on top of the navigation stack.
pub fn render(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Home => home::render(frame, app),
        Screen::Details(quote) => details::render(frame, quote),
    }
}
