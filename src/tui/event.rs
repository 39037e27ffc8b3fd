//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::orchestrator::TileUpdate;

use super::app::{App, Screen};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// A tile changed in the orchestrator.
    Tile(TileUpdate),
    /// Request to quit the application.
    Quit,
}

/// Why a refresh of all tiles was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Pull-to-refresh.
    Manual,
    /// The home screen became visible again.
    Focus,
}

/// Actions that require the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    RefreshAll(RefreshTrigger),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            let polled = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await;

            let message = match polled {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    Message::Input(Event::Key(key))
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => Message::Input(Event::Resize(w, h)),
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(message).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Tile(tile) => {
            app.apply_update(tile);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.refresh_indicator.expire_at(Instant::now());
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        _ => {}
    }

    match app.screen {
        Screen::Home => handle_home_keys(app, key),
        Screen::Details(_) => handle_details_keys(app, key),
    }
}

/// Handles keys on the tile screen.
fn handle_home_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
            app.next_tile();
            None
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
            app.previous_tile();
            None
        }
        // Selecting a tile that is loading or failed does nothing.
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.open_selected();
            None
        }
        KeyCode::Char('r') => {
            app.refresh_indicator.start_at(Instant::now());
            Some(Action::RefreshAll(RefreshTrigger::Manual))
        }
        _ => None,
    }
}

/// Handles keys on the detail screen.
fn handle_details_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
            if app.close_details() {
                Some(Action::RefreshAll(RefreshTrigger::Focus))
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metal;
    use crate::models::quote::PriceQuote;
    use crate::orchestrator::TileState;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn press(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn app() -> App {
        App::new(Duration::from_secs(30), Duration::from_secs(1))
    }

    fn loaded_gold() -> Message {
        Message::Tile(TileUpdate {
            metal: Metal::Gold,
            state: TileState::Loaded(PriceQuote::new(
                Metal::Gold,
                dec!(2000),
                dec!(1980),
                dec!(2020),
                Utc::now(),
            )),
        })
    }

    #[test]
    fn pull_to_refresh_shows_indicator() {
        let mut app = app();
        let action = update(&mut app, press(KeyCode::Char('r')));
        assert_eq!(action, Some(Action::RefreshAll(RefreshTrigger::Manual)));
        assert!(app.refresh_indicator.is_active());

        // A tick right away must not hide it.
        update(&mut app, Message::Input(Event::Tick));
        assert!(app.refresh_indicator.is_active());
    }

    #[test]
    fn enter_on_error_tile_is_noop() {
        let mut app = app();
        update(
            &mut app,
            Message::Tile(TileUpdate {
                metal: Metal::Gold,
                state: TileState::Error("Failed to fetch gold price".to_string()),
            }),
        );
        assert_eq!(update(&mut app, press(KeyCode::Enter)), None);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn returning_home_refreshes_on_focus() {
        let mut app = app();
        update(&mut app, loaded_gold());
        update(&mut app, press(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::Details(_)));

        // Refresh key means nothing on the detail screen.
        assert_eq!(update(&mut app, press(KeyCode::Char('r'))), None);

        let action = update(&mut app, press(KeyCode::Esc));
        assert_eq!(action, Some(Action::RefreshAll(RefreshTrigger::Focus)));
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn esc_on_home_does_not_refresh() {
        let mut app = app();
        assert_eq!(update(&mut app, press(KeyCode::Esc)), None);
    }

    #[test]
    fn quit_keys() {
        let mut by_letter = app();
        update(&mut by_letter, press(KeyCode::Char('q')));
        assert!(by_letter.should_quit);

        let mut by_interrupt = app();
        update(
            &mut by_interrupt,
            Message::Input(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(by_interrupt.should_quit);

        let mut by_message = app();
        update(&mut by_message, Message::Quit);
        assert!(by_message.should_quit);
    }

    #[test]
    fn arrow_keys_move_cursor() {
        let mut app = app();
        update(&mut app, press(KeyCode::Down));
        assert_eq!(app.selected_metal(), Metal::Silver);
        update(&mut app, press(KeyCode::Up));
        update(&mut app, press(KeyCode::Up));
        assert_eq!(app.selected_metal(), Metal::Palladium);
    }
}
