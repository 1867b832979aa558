//! Host-side configuration and result types.
//!
//! `StubConfig` bundles the resource limits a `TxStub` enforces for a
//! single transaction.

/// Maximum key length in the world state.
pub const MAX_KEY_LEN: usize = 256;

/// Maximum value length in the world state.
pub const MAX_VALUE_LEN: usize = 65_536; // 64 KiB

/// Resource limits for one transaction's writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Maximum length of a state key in bytes.
    pub max_key_len: usize,
    /// Maximum length of a state value in bytes.
    pub max_value_len: usize,
    /// Maximum total bytes (keys + values) buffered by one transaction.
    pub max_write_bytes: u64,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
            max_write_bytes: 4 * 1024 * 1024, // 4 MiB
        }
    }
}

/// One entry yielded by a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}
