//! Per-tile refresh coordination.
//!
//! [`TileOrchestrator`] owns one [`TileState`] slot per [`Metal`] and refreshes
//! them through a [`PriceSource`]. Every refresh runs as its own tokio task
//! that writes only its own slot, so a slow or failing metal never holds up
//! the others.
//!
//! Requests are not sequenced: if an older request for a metal resolves
//! after a newer one, the older result overwrites the newer one.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::models::Metal;
use crate::models::quote::{PriceQuote, Quote};
use crate::oracle::PriceSource;

/// Coarse lifecycle of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// State of one metal tile. Each variant carries exactly the data valid for it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TileState {
    /// Never refreshed.
    #[default]
    Idle,
    /// A request is in flight; any previous result has been discarded.
    Loading,
    /// The last request succeeded.
    Loaded(PriceQuote),
    /// The last request failed with this message.
    Error(String),
}

impl TileState {
    pub fn status(&self) -> TileStatus {
        match self {
            TileState::Idle => TileStatus::Idle,
            TileState::Loading => TileStatus::Loading,
            TileState::Loaded(_) => TileStatus::Loaded,
            TileState::Error(_) => TileStatus::Error,
        }
    }

    pub fn quote(&self) -> Option<&PriceQuote> {
        match self {
            TileState::Loaded(quote) => Some(quote),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            TileState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the quote to open in the detail view, only when loaded.
    pub fn selection(&self) -> Option<&PriceQuote> {
        self.quote()
    }
}

impl From<Quote> for TileState {
    fn from(quote: Quote) -> Self {
        match quote {
            Quote::Success(price) => TileState::Loaded(price),
            Quote::Failure { error, .. } => TileState::Error(error),
        }
    }
}

/// Notification that a tile changed, sent to the optional update channel.
#[derive(Clone, Debug, PartialEq)]
pub struct TileUpdate {
    pub metal: Metal,
    pub state: TileState,
}

struct Shared<S> {
    source: S,
    tiles: HashMap<Metal, RwLock<TileState>>,
    updates: Option<mpsc::UnboundedSender<TileUpdate>>,
}

impl<S> Shared<S> {
    fn set(&self, metal: Metal, state: TileState) {
        if let Some(slot) = self.tiles.get(&metal) {
            *slot.write().unwrap_or_else(PoisonError::into_inner) = state.clone();
        }
        if let Some(tx) = &self.updates {
            // A closed receiver just means nobody is rendering anymore.
            let _ = tx.send(TileUpdate { metal, state });
        }
    }

    fn get(&self, metal: Metal) -> TileState {
        self.tiles
            .get(&metal)
            .map(|slot| slot.read().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }
}

/// Coordinates refreshes of the four metal tiles.
///
/// Cloning is cheap and clones share the same tiles.
pub struct TileOrchestrator<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for TileOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: PriceSource> TileOrchestrator<S> {
    /// Creates an orchestrator with all four tiles idle.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::build(source, None)
    }

    /// Creates an orchestrator that also reports every tile change on `updates`.
    #[must_use]
    pub fn with_updates(source: S, updates: mpsc::UnboundedSender<TileUpdate>) -> Self {
        Self::build(source, Some(updates))
    }

    fn build(source: S, updates: Option<mpsc::UnboundedSender<TileUpdate>>) -> Self {
        let tiles = Metal::ALL
            .into_iter()
            .map(|metal| (metal, RwLock::new(TileState::Idle)))
            .collect();
        Self {
            shared: Arc::new(Shared {
                source,
                tiles,
                updates,
            }),
        }
    }

    /// Current state of one tile.
    pub fn state(&self, metal: Metal) -> TileState {
        self.shared.get(metal)
    }

    /// Current state of every tile, in display order.
    pub fn snapshot(&self) -> BTreeMap<Metal, TileState> {
        Metal::ALL
            .into_iter()
            .map(|metal| (metal, self.shared.get(metal)))
            .collect()
    }

    /// Starts a refresh of one tile.
    ///
    /// The tile is `Loading` by the time this returns. The request itself runs
    /// on a spawned task; the handle may be dropped without cancelling it.
    pub fn refresh_one(&self, metal: Metal) -> JoinHandle<()> {
        self.shared.set(metal, TileState::Loading);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let quote = shared.source.request_price(metal.as_str()).await;
            match &quote {
                Quote::Success(price) => {
                    debug!(metal = %metal, price = %price.current_price, "Tile loaded");
                }
                Quote::Failure { error, .. } => {
                    warn!(metal = %metal, error = %error, "Tile failed to load");
                }
            }
            shared.set(metal, TileState::from(quote));
        })
    }

    /// Starts a refresh of every tile. Fire-and-forget: the returned batch can
    /// be dropped, or awaited with [`RefreshBatch::join`].
    pub fn refresh_all(&self) -> RefreshBatch {
        debug!("Refreshing all tiles");
        RefreshBatch {
            handles: Metal::ALL
                .into_iter()
                .map(|metal| self.refresh_one(metal))
                .collect(),
        }
    }

    /// Returns the quote to show in the detail view if `metal` is loaded.
    pub fn select(&self, metal: Metal) -> Option<PriceQuote> {
        let selected = self.state(metal).selection().cloned();
        if selected.is_none() {
            debug!(metal = %metal, "Ignoring selection of a tile that is not loaded");
        }
        selected
    }

    /// Refreshes all tiles every `period` until the returned timer is dropped.
    ///
    /// The first refresh fires one full period from now; the initial load is
    /// the caller's job.
    pub fn start_auto_refresh(&self, period: Duration) -> RefreshTimer {
        let orchestrator = self.clone();
        info!(period_ms = period.as_millis() as u64, "Starting auto-refresh");
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                orchestrator.refresh_all();
            }
        });
        RefreshTimer { handle }
    }
}

/// Handles for the four requests started by one [`TileOrchestrator::refresh_all`].
pub struct RefreshBatch {
    handles: Vec<JoinHandle<()>>,
}

impl RefreshBatch {
    /// Waits until every request in the batch has written its tile.
    pub async fn join(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                warn!("Tile refresh task ended abnormally: {e}");
            }
        }
    }
}

/// Recurring refresh driver. Stops when dropped.
pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Stops the timer. Requests already in flight still complete.
    pub fn stop(self) {}

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_quote() -> PriceQuote {
        PriceQuote::new(Metal::Gold, dec!(2001), dec!(1980), dec!(2020), Utc::now())
    }

    #[test]
    fn state_accessors_match_variant() {
        assert_eq!(TileState::Idle.status(), TileStatus::Idle);
        assert!(TileState::Loading.quote().is_none());
        assert!(TileState::Loading.error_message().is_none());

        let loaded = TileState::Loaded(sample_quote());
        assert_eq!(loaded.status(), TileStatus::Loaded);
        assert!(loaded.quote().is_some());
        assert!(loaded.error_message().is_none());

        let failed = TileState::Error("boom".to_string());
        assert_eq!(failed.status(), TileStatus::Error);
        assert_eq!(failed.error_message(), Some("boom"));
        assert!(failed.quote().is_none());
    }

    #[test]
    fn only_loaded_tiles_are_selectable() {
        assert!(TileState::Idle.selection().is_none());
        assert!(TileState::Loading.selection().is_none());
        assert!(TileState::Error("x".to_string()).selection().is_none());
        assert!(TileState::Loaded(sample_quote()).selection().is_some());
    }

    #[test]
    fn quote_outcome_maps_to_state() {
        let failure = Quote::failure("gold", "Failed to fetch gold price");
        assert_eq!(
            TileState::from(failure),
            TileState::Error("Failed to fetch gold price".to_string())
        );

        let price = sample_quote();
        assert_eq!(
            TileState::from(Quote::Success(price.clone())),
            TileState::Loaded(price)
        );
    }
}
