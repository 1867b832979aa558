//! Per-transaction world-state stub.
//!
//! `TxStub` combines a committed `StateStore`, a `StateOverlay` write
//! buffer, and the host limits into the `WorldState` a contract invocation
//! runs against. It is created fresh for each invocation. The caller
//! decides afterwards whether to commit `into_writes()` or drop it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use crate::error::HostError;
use crate::overlay::{OverlayResult, StateOverlay};
use crate::state_store::StateStore;
use crate::traits::{StateIterator, WorldState};
use crate::types::{KeyValue, StubConfig};

/// World state for a single transaction.
pub struct TxStub {
    tx_id: String,
    /// Committed state (read-only during the invocation).
    state_store: Arc<dyn StateStore>,
    /// Writes buffered by this invocation.
    overlay: StateOverlay,
    config: StubConfig,
}

impl TxStub {
    /// Create a stub with default limits.
    pub fn new(tx_id: impl Into<String>, state_store: Arc<dyn StateStore>) -> Self {
        Self::with_config(tx_id, state_store, StubConfig::default())
    }

    pub fn with_config(
        tx_id: impl Into<String>,
        state_store: Arc<dyn StateStore>,
        config: StubConfig,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            state_store,
            overlay: StateOverlay::new(),
            config,
        }
    }

    /// The buffered write set.
    pub fn overlay(&self) -> &StateOverlay {
        &self.overlay
    }

    /// Consume the stub and return its write set in key order.
    pub fn into_writes(self) -> BTreeMap<Vec<u8>, Option<Vec<u8>>> {
        self.overlay.drain()
    }

    fn check_key(&self, key: &str) -> Result<(), HostError> {
        if key.is_empty() {
            return Err(HostError::EmptyKey);
        }
        if key.len() > self.config.max_key_len {
            return Err(HostError::KeyTooLarge {
                len: key.len(),
                max: self.config.max_key_len,
            });
        }
        Ok(())
    }

    fn check_write_budget(&self, key: &str, value: Option<&[u8]>) -> Result<(), HostError> {
        let projected = self.overlay.projected_bytes(key.as_bytes(), value);
        if projected > self.config.max_write_bytes {
            return Err(HostError::WriteLimit {
                used: projected,
                max: self.config.max_write_bytes,
            });
        }
        Ok(())
    }
}

impl WorldState for TxStub {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, HostError> {
        trace!(tx_id = %self.tx_id, key, "get_state");
        if key.is_empty() {
            return Ok(None);
        }
        match self.overlay.get(key.as_bytes()) {
            OverlayResult::Found(v) => Ok(Some(v)),
            OverlayResult::Deleted => Ok(None),
            OverlayResult::NotInOverlay => self.state_store.get(key.as_bytes()),
        }
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), HostError> {
        trace!(tx_id = %self.tx_id, key, len = value.len(), "put_state");
        self.check_key(key)?;
        if value.len() > self.config.max_value_len {
            return Err(HostError::ValueTooLarge {
                len: value.len(),
                max: self.config.max_value_len,
            });
        }
        self.check_write_budget(key, Some(value))?;
        self.overlay.set(key.as_bytes().to_vec(), value.to_vec());
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), HostError> {
        trace!(tx_id = %self.tx_id, key, "del_state");
        self.check_key(key)?;
        self.check_write_budget(key, None)?;
        self.overlay.delete(key.as_bytes().to_vec());
        Ok(())
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIterator, HostError> {
        trace!(tx_id = %self.tx_id, start, end, "get_state_by_range");
        if !end.is_empty() && start > end {
            return Ok(StateIterator::empty());
        }
        let committed = self.state_store.range(start.as_bytes(), end.as_bytes())?;
        let merged = self
            .overlay
            .merge_range(committed, start.as_bytes(), end.as_bytes());
        let entries = merged
            .into_iter()
            .map(|(key, value)| match String::from_utf8(key) {
                Ok(key) => Ok(KeyValue { key, value }),
                Err(e) => Err(HostError::InvalidKey(
                    String::from_utf8_lossy(e.as_bytes()).into_owned(),
                )),
            })
            .collect();
        Ok(StateIterator::new(entries))
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }
}
