//! Command-line configuration.

use std::path::PathBuf;

use assetchain_hostapi::{StubConfig, MAX_VALUE_LEN};
use clap::{Parser, Subcommand};

/// Default world-state snapshot location.
pub const DEFAULT_STATE_FILE: &str = "world-state.json";

/// AssetChain local runner
#[derive(Parser, Debug)]
#[command(name = "assetchain")]
#[command(about = "Submit or evaluate asset contract calls against a local world-state snapshot")]
pub struct Args {
    /// World-state snapshot file (created on first commit)
    #[arg(short, long, default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    /// Transaction ID to report in logs (derived from state and call if omitted)
    #[arg(long)]
    pub tx_id: Option<String>,

    /// Maximum value size accepted by put_state, in bytes
    #[arg(long, default_value_t = MAX_VALUE_LEN)]
    pub max_value_len: usize,

    /// Maximum bytes one transaction may write
    #[arg(long, default_value_t = StubConfig::default().max_write_bytes)]
    pub max_write_bytes: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a contract function and commit its writes on success
    Submit {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a contract function and discard its writes
    Evaluate {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the BLAKE3 digest of the world state
    Digest,
}

impl Args {
    /// Host limits for each transaction.
    pub fn stub_config(&self) -> StubConfig {
        StubConfig {
            max_value_len: self.max_value_len,
            max_write_bytes: self.max_write_bytes,
            ..StubConfig::default()
        }
    }
}
