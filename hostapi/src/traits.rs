//! World-state API — the host functions a contract is written against.
//!
//! The ledger runtime hands each contract invocation an implementation of
//! `WorldState`. The contract only ever sees string keys and opaque byte
//! values; ordering, endorsement, and persistence belong to the host.

use crate::error::HostError;
use crate::types::KeyValue;

/// Host-side key-value world state for one transaction.
pub trait WorldState {
    /// Read a value.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, HostError>;

    /// Write a value into the transaction's write set.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), HostError>;

    /// Delete a key in the transaction's write set.
    fn del_state(&mut self, key: &str) -> Result<(), HostError>;

    /// Range query over `[start, end)` in key order.
    ///
    /// Empty bounds are open, so `("", "")` scans the whole namespace.
    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIterator, HostError>;

    /// Identifier of the running transaction.
    fn tx_id(&self) -> &str;
}

/// Iterator over range-query results.
///
/// Yields `Err` for entries the host cannot hand to the contract; callers
/// propagate the first error with `?`.
#[derive(Debug)]
pub struct StateIterator {
    inner: std::vec::IntoIter<Result<KeyValue, HostError>>,
}

impl StateIterator {
    pub fn new(entries: Vec<Result<KeyValue, HostError>>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }

    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Iterator for StateIterator {
    type Item = Result<KeyValue, HostError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StateIterator {}
