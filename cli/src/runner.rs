//! Runs one contract invocation against the local world state.
//!
//! Each run gets a fresh `TxStub` over a snapshot of the committed store.
//! A successful submit applies the stub's write set; evaluate and failed
//! submits drop it.

use std::io::{self, Write};
use std::sync::Arc;

use assetchain_contract::{ContractRouter, Response};
use assetchain_hostapi::{MemStore, StubConfig, TxStub};
use tracing::{debug, info};

/// Whether a run may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Submit,
    Evaluate,
}

/// Result of one run.
#[derive(Debug)]
pub struct Outcome {
    pub response: Response,
    /// True if the write set was applied to the store.
    pub committed: bool,
    /// Number of keys the transaction touched.
    pub writes: usize,
}

/// Transaction ID for a call: BLAKE3 over the state digest, function, and
/// arguments, truncated to 32 hex characters.
pub fn derive_tx_id(store: &MemStore, function: &str, args: &[String]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&store.digest());
    hasher.update(function.as_bytes());
    for arg in args {
        hasher.update(&(arg.len() as u64).to_le_bytes());
        hasher.update(arg.as_bytes());
    }
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..32].to_string()
}

pub fn run(
    store: &mut MemStore,
    config: &StubConfig,
    tx_id: &str,
    mode: Mode,
    function: &str,
    args: &[String],
) -> Outcome {
    let mut stub = TxStub::with_config(tx_id, Arc::new(store.clone()), config.clone());
    let response = ContractRouter::new().invoke(&mut stub, function, args);
    let writes = stub.overlay().len();

    let committed = mode == Mode::Submit && response.is_ok();
    if committed {
        store.apply_writes(stub.into_writes());
        info!(tx_id, function, writes, "transaction committed");
    } else {
        debug!(tx_id, function, ?mode, ok = response.is_ok(), "write set discarded");
    }

    Outcome {
        response,
        committed,
        writes,
    }
}

/// Write a response for the user: the payload on success, otherwise the
/// error message and status code.
pub fn write_response<W: Write>(out: &mut W, response: &Response) -> io::Result<()> {
    if response.is_ok() {
        out.write_all(&response.payload)?;
        if !response.payload.is_empty() {
            writeln!(out)?;
        }
        Ok(())
    } else {
        writeln!(out, "{} ({})", response.message, response.status.code())
    }
}
