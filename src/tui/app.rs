//! Application state for the TUI.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::models::Metal;
use crate::models::quote::PriceQuote;
use crate::orchestrator::{TileState, TileStatus, TileUpdate};

/// Central application state container.
pub struct App {
    /// Last known state of every tile, mirrored from orchestrator updates.
    pub tiles: BTreeMap<Metal, TileState>,
    /// Index into [`Metal::ALL`] of the highlighted tile.
    pub cursor: usize,
    /// Screen currently on top of the navigation stack.
    pub screen: Screen,
    /// Pull-to-refresh indicator.
    pub refresh_indicator: RefreshIndicator,
    /// Auto-refresh period, shown in the header.
    pub refresh_interval: Duration,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an app with every tile idle and the home screen showing.
    pub fn new(refresh_interval: Duration, indicator_floor: Duration) -> Self {
        Self {
            tiles: Metal::ALL
                .into_iter()
                .map(|metal| (metal, TileState::Idle))
                .collect(),
            cursor: 0,
            screen: Screen::Home,
            refresh_indicator: RefreshIndicator::new(indicator_floor),
            refresh_interval,
            should_quit: false,
        }
    }

    /// Metal under the cursor.
    pub fn selected_metal(&self) -> Metal {
        Metal::ALL[self.cursor.min(Metal::ALL.len() - 1)]
    }

    /// State of one tile.
    pub fn tile(&self, metal: Metal) -> &TileState {
        static IDLE: TileState = TileState::Idle;
        self.tiles.get(&metal).unwrap_or(&IDLE)
    }

    /// Moves the cursor down, wrapping around.
    pub fn next_tile(&mut self) {
        self.cursor = (self.cursor + 1) % Metal::ALL.len();
    }

    /// Moves the cursor up, wrapping around.
    pub fn previous_tile(&mut self) {
        self.cursor = self.cursor.checked_sub(1).unwrap_or(Metal::ALL.len() - 1);
    }

    /// Records a tile change reported by the orchestrator.
    ///
    /// An open detail view keeps its snapshot; it does not follow the tile.
    pub fn apply_update(&mut self, update: TileUpdate) {
        self.tiles.insert(update.metal, update.state);
    }

    /// Opens the detail view for the highlighted tile if it is loaded.
    ///
    /// Returns `true` if navigation happened.
    pub fn open_selected(&mut self) -> bool {
        if self.screen != Screen::Home {
            return false;
        }
        match self.tile(self.selected_metal()).selection().cloned() {
            Some(quote) => {
                self.screen = Screen::Details(quote);
                true
            }
            None => false,
        }
    }

    /// Returns to the home screen. Returns `true` if a detail view was open.
    pub fn close_details(&mut self) -> bool {
        match self.screen {
            Screen::Details(_) => {
                self.screen = Screen::Home;
                true
            }
            Screen::Home => false,
        }
    }

    /// Number of tiles currently showing a price.
    pub fn loaded_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|state| state.status() == TileStatus::Loaded)
            .count()
    }

    /// Number of tiles with a request in flight.
    pub fn loading_count(&self) -> usize {
        self.tiles
            .values()
            .filter(|state| state.status() == TileStatus::Loading)
            .count()
    }
}

/// Screens of the two-level navigation stack.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Four metal tiles.
    Home,
    /// Full details of the quote that was selected.
    Details(PriceQuote),
}

/// Pull-to-refresh spinner that stays up for a minimum duration.
///
/// Visibility depends only on when the refresh was requested, not on when
/// the requests complete.
#[derive(Clone, Debug)]
pub struct RefreshIndicator {
    floor: Duration,
    started: Option<Instant>,
}

impl RefreshIndicator {
    pub fn new(floor: Duration) -> Self {
        Self {
            floor,
            started: None,
        }
    }

    /// Shows the indicator from `now`. Restarting extends it.
    pub fn start_at(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.floor)
    }

    /// Hides the indicator once the floor has elapsed.
    pub fn expire_at(&mut self, now: Instant) {
        if !self.is_visible_at(now) {
            self.started = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }
}
