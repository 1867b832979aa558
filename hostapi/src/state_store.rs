//! Committed state storage abstraction.
//!
//! `StateStore` is the read-only view of committed world state. A `TxStub`
//! layers a `StateOverlay` on top of it: reads check the overlay first,
//! then fall through to the store.
//!
//! Implementations:
//! - `MemStore` (this crate) — in-memory BTreeMap
//! - A ledger peer's state database in production

use crate::error::HostError;

/// A committed key-value pair as returned by `StateStore::range`.
pub type StoreEntry = (Vec<u8>, Vec<u8>);

/// Abstraction over committed world state.
pub trait StateStore: Send + Sync {
    /// Get the value for a key from committed state.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError>;

    /// Check if a key exists in committed state.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &[u8]) -> Result<bool, HostError> {
        Ok(self.get(key)?.is_some())
    }

    /// All committed entries with `start <= key < end`, ascending by key.
    ///
    /// An empty `start` is unbounded below; an empty `end` is unbounded above.
    fn range(&self, start: &[u8], end: &[u8]) -> Result<Vec<StoreEntry>, HostError>;
}

/// Returns true if `key` falls in the half-open range `[start, end)`,
/// treating empty bounds as open.
pub fn key_in_range(key: &[u8], start: &[u8], end: &[u8]) -> bool {
    key >= start && (end.is_empty() || key < end)
}
