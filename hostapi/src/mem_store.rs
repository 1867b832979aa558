//! In-memory state store.
//!
//! `MemStore` implements `StateStore` using a `BTreeMap` so range queries
//! come back in key order without sorting. It backs the local runner and
//! every test in the workspace.

use std::collections::BTreeMap;

use crate::error::HostError;
use crate::state_store::{key_in_range, StateStore, StoreEntry};

/// In-memory state store backed by `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Insert a key-value pair into the store.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    /// Remove a key from the store.
    pub fn remove(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    /// Commit a transaction's write set.
    ///
    /// `Some(value)` entries are stored, `None` entries are deleted.
    pub fn apply_writes(&mut self, writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>) {
        for (key, value) in writes {
            match value {
                Some(v) => {
                    self.data.insert(key, v);
                }
                None => {
                    self.data.remove(&key);
                }
            }
        }
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Vec<u8>)> {
        self.data.iter()
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// BLAKE3 digest of the full contents.
    ///
    /// Each entry is hashed as `len(key) || key || len(value) || value`
    /// with little-endian u64 lengths, in key order. Two stores with the
    /// same contents always produce the same digest.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for (key, value) in &self.data {
            hasher.update(&(key.len() as u64).to_le_bytes());
            hasher.update(key);
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value);
        }
        *hasher.finalize().as_bytes()
    }

    /// Hex form of [`digest`](Self::digest).
    pub fn digest_hex(&self) -> String {
        blake3::Hash::from(self.digest()).to_hex().to_string()
    }
}

impl StateStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.data.get(key).cloned())
    }

    fn contains(&self, key: &[u8]) -> Result<bool, HostError> {
        Ok(self.data.contains_key(key))
    }

    fn range(&self, start: &[u8], end: &[u8]) -> Result<Vec<StoreEntry>, HostError> {
        Ok(self
            .data
            .range(start.to_vec()..)
            .take_while(|(k, _)| key_in_range(k, start, end))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
