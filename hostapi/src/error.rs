//! Host-side error types for the AssetChain world-state API.
//!
//! `HostError` is returned by every `WorldState` and `StateStore` method.
//! The contract never inspects the variants beyond reporting them; they
//! exist so tests and the runner can tell a rejected write from a backend
//! failure.

/// Error returned by world-state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Writes and deletes require a non-empty key.
    #[error("key must not be an empty string")]
    EmptyKey,

    /// Key exceeds `StubConfig::max_key_len`.
    #[error("key too large: {len} bytes (max {max})")]
    KeyTooLarge { len: usize, max: usize },

    /// Value exceeds `StubConfig::max_value_len`.
    #[error("value too large: {len} bytes (max {max})")]
    ValueTooLarge { len: usize, max: usize },

    /// Buffered writes for this transaction would exceed `StubConfig::max_write_bytes`.
    #[error("write limit exceeded: {used} bytes (max {max})")]
    WriteLimit { used: u64, max: u64 },

    /// A stored key is not valid UTF-8 and cannot be handed to the contract.
    #[error("invalid key in world state: {0}")]
    InvalidKey(String),

    /// Backend failure not caused by the caller.
    #[error("internal host error: {0}")]
    Internal(String),
}
