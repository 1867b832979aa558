//! `assetchain-hostapi` — world-state API and local host for AssetChain contracts.
//!
//! This crate defines the interface a contract uses to read and write the
//! ledger's world state, plus an in-process host that implements it:
//!
//! - `WorldState` trait — get/put/delete/range over string keys
//! - `StateStore` trait — committed state backend abstraction
//! - `MemStore` — in-memory `StateStore`
//! - `StateOverlay` — per-transaction write buffer
//! - `TxStub` — `WorldState` for one transaction (store + overlay + limits)
//! - `StubConfig` — host resource limits
//! - `HostError` — host-side error type

pub mod error;
pub mod types;
pub mod state_store;
pub mod mem_store;
pub mod overlay;
pub mod traits;
pub mod stub;

// Re-export commonly used types at the crate root.
pub use error::HostError;
pub use types::{KeyValue, StubConfig, MAX_KEY_LEN, MAX_VALUE_LEN};
pub use state_store::StateStore;
pub use mem_store::MemStore;
pub use overlay::{OverlayResult, StateOverlay};
pub use traits::{StateIterator, WorldState};
pub use stub::TxStub;
