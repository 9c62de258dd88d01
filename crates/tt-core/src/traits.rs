//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::RawDocument;

/// Read access to the external document database.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Scans an entire collection. No filtering happens store-side.
    async fn list_documents(&self, collection: &str) -> anyhow::Result<Vec<RawDocument>>;
}

/// Client-side persisted key/value state (sign-in and profile flags).
///
/// Writes must notify subscribers so that every open view can re-derive
/// its navigation state without polling.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Removes all given keys as one write.
    fn remove(&self, keys: &[&'static str]) -> anyhow::Result<()>;

    /// Re-reads state that may have been changed by another process.
    fn reload(&self) -> anyhow::Result<()>;

    /// Receiver whose value is bumped after every change.
    fn subscribe(&self) -> watch::Receiver<u64>;
}
