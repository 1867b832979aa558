//! AssetChain local runner.
//!
//! Loads a world-state snapshot, runs one asset contract call against it,
//! prints the payload or error message, and saves the snapshot if the call
//! was a successful submit. Logs go to stderr (`RUST_LOG`, default `info`) so stdout carries
//! only the result.

mod config;
mod runner;
mod snapshot;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Command};
use crate::runner::Mode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match execute(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<ExitCode> {
    let mut store = snapshot::load(&args.state)?;
    let config = args.stub_config();

    let (mode, function, call_args) = match &args.command {
        Command::Digest => {
            println!("{}", store.digest_hex());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Submit { function, args } => (Mode::Submit, function, args),
        Command::Evaluate { function, args } => (Mode::Evaluate, function, args),
    };

    let tx_id = match &args.tx_id {
        Some(id) => id.clone(),
        None => runner::derive_tx_id(&store, function, call_args),
    };

    let outcome = runner::run(&mut store, &config, &tx_id, mode, function, call_args);
    if outcome.committed {
        snapshot::save(&store, &args.state)?;
    }

    let response = outcome.response;
    runner::write_response(&mut std::io::stdout().lock(), &response)?;
    if response.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
