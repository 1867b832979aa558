//! Per-transaction write buffer.
//!
//! The overlay buffers writes during one contract invocation and makes them
//! visible to later reads in the same invocation. On success the buffered
//! writes are committed as one write set; on failure they are discarded.

use std::collections::BTreeMap;

use crate::state_store::{key_in_range, StoreEntry};

/// Write buffer overlaying committed state.
#[derive(Debug, Clone, Default)]
pub struct StateOverlay {
    /// Buffered writes: key → Some(value) for sets, key → None for deletions.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    /// Total bytes written (keys + values) for enforcing `max_write_bytes`.
    total_write_bytes: u64,
}

/// Result of looking up a key in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayResult {
    /// Key was set in this overlay.
    Found(Vec<u8>),
    /// Key was deleted in this overlay.
    Deleted,
    /// Key is untouched; the caller must check committed state.
    NotInOverlay,
}

impl StateOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes the buffer would hold after writing `value` (or a tombstone) at `key`.
    pub fn projected_bytes(&self, key: &[u8], value: Option<&[u8]>) -> u64 {
        let prev = self.entry_bytes(key);
        let next = (key.len() + value.map_or(0, <[u8]>::len)) as u64;
        self.total_write_bytes.saturating_sub(prev).saturating_add(next)
    }

    /// Set a key-value pair, replacing any earlier write or delete of the key.
    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.total_write_bytes = self.projected_bytes(&key, Some(&value));
        self.writes.insert(key, Some(value));
    }

    /// Mark a key as deleted.
    ///
    /// The key bytes still count toward the write budget.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.total_write_bytes = self.projected_bytes(&key, None);
        self.writes.insert(key, None);
    }

    pub fn get(&self, key: &[u8]) -> OverlayResult {
        match self.writes.get(key) {
            Some(Some(value)) => OverlayResult::Found(value.clone()),
            Some(None) => OverlayResult::Deleted,
            None => OverlayResult::NotInOverlay,
        }
    }

    /// Merge committed range results with this overlay.
    ///
    /// `committed` must already be restricted to `[start, end)`. Overlay
    /// sets in the range are added or replace committed values; overlay
    /// deletes remove them. Output is ordered by key.
    pub fn merge_range(
        &self,
        committed: Vec<StoreEntry>,
        start: &[u8],
        end: &[u8],
    ) -> Vec<StoreEntry> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = committed.into_iter().collect();
        for (key, value) in self.writes.range(start.to_vec()..) {
            if !key_in_range(key, start, end) {
                break;
            }
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged.into_iter().collect()
    }

    /// Consume the overlay and return the write set in key order.
    pub fn drain(self) -> BTreeMap<Vec<u8>, Option<Vec<u8>>> {
        self.writes
    }

    /// Discard all buffered writes.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.total_write_bytes = 0;
    }

    /// Number of keys touched (set or deleted).
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn total_write_bytes(&self) -> u64 {
        self.total_write_bytes
    }

    fn entry_bytes(&self, key: &[u8]) -> u64 {
        match self.writes.get(key) {
            Some(prev) => (key.len() + prev.as_ref().map_or(0, Vec::len)) as u64,
            None => 0,
        }
    }
}
