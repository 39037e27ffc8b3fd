//! Terminal user interface for the metals price tracker.
//!
//! Two screens sit on a navigation stack: the home screen with one tile per
//! metal and a detail screen for a selected quote. The event loop feeds
//! terminal input and orchestrator tile updates into [`App`] and turns the
//! resulting [`Action`]s into refreshes.

pub mod app;
pub mod components;
pub mod event;
pub mod screens;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message, RefreshTrigger};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

use tokio::sync::mpsc;
use tracing::info;

use crate::config::RefreshConfig;
use crate::oracle::PriceSource;
use crate::orchestrator::{TileOrchestrator, TileUpdate};

/// Interval between UI ticks that expire the refresh indicator.
const TICK_INTERVAL_MS: u64 = 100;

/// Runs the interactive tracker until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or restored.
pub async fn run<S: PriceSource>(refresh: &RefreshConfig, source: S) -> crate::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, refresh, source).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop<S: PriceSource>(
    terminal: &mut Tui,
    refresh: &RefreshConfig,
    source: S,
) -> crate::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let (tile_tx, mut tile_rx) = mpsc::unbounded_channel::<TileUpdate>();

    let orchestrator = TileOrchestrator::with_updates(source, tile_tx);
    let mut app = App::new(refresh.interval, refresh.indicator_floor);

    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx, TICK_INTERVAL_MS);

    // Mount: load once now, then keep refreshing while the view is up.
    orchestrator.refresh_all();
    let _timer = orchestrator.start_auto_refresh(refresh.interval);
    info!("Price tracker started");

    loop {
        terminal.draw(|frame| render(frame, &app))?;

        let message = tokio::select! {
            Some(message) = rx.recv() => message,
            Some(tile) = tile_rx.recv() => Message::Tile(tile),
            else => break,
        };

        if let Some(Action::RefreshAll(trigger)) = event::update(&mut app, message) {
            info!(?trigger, "Refresh requested");
            orchestrator.refresh_all();
        }

        if app.should_quit {
            info!("Price tracker exiting");
            break;
        }
    }

    Ok(())
}
