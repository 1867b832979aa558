//! `assetchain-contract` — asset CRUD contract over the ledger world state.
//!
//! The contract stores physical-asset records as JSON under their IDs and
//! exposes create, read, update, delete, transfer, list, and seeding
//! operations. Everything below the `WorldState` trait (ordering,
//! endorsement, persistence) belongs to the host.
//!
//! ## Architecture
//!
//! - [`asset::Asset`] — the stored record
//! - [`codec`] — canonical JSON bytes shared with Go-built peers
//! - [`contract::SmartContract`] — the operations, one method each
//! - [`invoke::Invocation`] — decoding of function name + string arguments
//! - [`invoke::ContractRouter`] — dispatch and `Response` encoding
//! - [`error::ContractError`] — every failure the caller can see

pub mod asset;
pub mod codec;
pub mod error;
pub mod contract;
pub mod invoke;

// Re-export key types for convenience
pub use asset::{seed_assets, Asset};
pub use contract::SmartContract;
pub use error::{ContractError, ContractResult};
pub use invoke::{ContractRouter, Invocation, Response, Status};
