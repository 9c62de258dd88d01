//! # Discovery Loading
//!
//! One load per view: fetch live trips, merge them over the seed set, and
//! hand back something the view can swap in whole. The fetch is bound to a
//! `CancellationToken` so a torn-down view never receives a late result.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio_util::sync::CancellationToken;

use crate::discovery::reconcile;
use crate::models::Trip;
use crate::repository::TripRepository;

/// An immutable, fully merged trip list.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSnapshot {
    pub trips: Vec<Trip>,
    /// Documents dropped by decoding in the load that produced this snapshot
    pub rejected: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(TripSnapshot),
    /// User-facing message; no partial data accompanies it
    Failed(String),
    Cancelled,
}

/// What a discover surface currently shows.
#[derive(Debug, Clone)]
pub enum DiscoveryState {
    Loading,
    Ready(Arc<TripSnapshot>),
    Failed(String),
}

impl DiscoveryState {
    /// Applies a finished load. A cancelled load leaves the state as it was.
    pub fn apply(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(snapshot) => *self = Self::Ready(Arc::new(snapshot)),
            LoadOutcome::Failed(message) => *self = Self::Failed(message),
            LoadOutcome::Cancelled => {}
        }
    }

    pub fn snapshot(&self) -> Option<Arc<TripSnapshot>> {
        match self {
            Self::Ready(s) => Some(Arc::clone(s)),
            _ => None,
        }
    }
}

/// The shared `DiscoveryState` of a server plus a load counter.
///
/// Every load takes a ticket from `begin` and hands it back to `finish`.
/// Only the newest ticket may change the state, so a slow load can never
/// overwrite the result of one started after it.
#[derive(Debug)]
pub struct DiscoveryCell {
    state: RwLock<DiscoveryState>,
    latest: AtomicU64,
}

impl Default for DiscoveryCell {
    fn default() -> Self {
        Self {
            state: RwLock::new(DiscoveryState::Loading),
            latest: AtomicU64::new(0),
        }
    }
}

impl DiscoveryCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Applies `outcome` if `ticket` is still the newest load. Returns
    /// whether the state changed.
    pub fn finish(&self, ticket: u64, outcome: LoadOutcome) -> bool {
        let Ok(mut state) = self.state.write() else {
            log::error!("Discovery state lock poisoned; load #{ticket} dropped");
            return false;
        };
        if self.latest.load(Ordering::SeqCst) != ticket {
            log::debug!("Discarding load #{ticket}; a newer load has started");
            return false;
        }
        match &outcome {
            LoadOutcome::Cancelled => return false,
            LoadOutcome::Loaded(snapshot) => log::info!(
                "Load #{ticket}: {} trips ready ({} documents rejected) at {}",
                snapshot.trips.len(),
                snapshot.rejected,
                snapshot.loaded_at.to_rfc3339()
            ),
            LoadOutcome::Failed(message) => log::warn!("Load #{ticket} failed: {message}"),
        }
        state.apply(outcome);
        true
    }

    pub fn current(&self) -> DiscoveryState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|_| DiscoveryState::Failed("Discovery state unavailable".into()))
    }
}

/// Fetches live trips and reconciles them with `seed`, unless `token` fires
/// first.
pub async fn load_discovery(
    repo: &TripRepository,
    seed: &[Trip],
    token: &CancellationToken,
) -> LoadOutcome {
    let result = tokio::select! {
        biased;
        _ = token.cancelled() => {
            log::debug!("Trip load cancelled before the store answered");
            return LoadOutcome::Cancelled;
        }
        result = repo.fetch_all_trips() => result,
    };

    // The store may answer in the same turn the view goes away.
    if token.is_cancelled() {
        log::debug!("Discarding trip load that finished after cancellation");
        return LoadOutcome::Cancelled;
    }

    match result {
        Ok(batch) => LoadOutcome::Loaded(TripSnapshot {
            trips: reconcile(seed, &batch.trips),
            rejected: batch.rejected.len(),
            loaded_at: Utc::now(),
        }),
        Err(e) => LoadOutcome::Failed(e.to_string()),
    }
}
