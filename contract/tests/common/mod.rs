//! Shared test helpers for integration tests.
//!
//! Provides committed-state fixtures, stub builders, a commit helper that
//! mimics the host applying a successful transaction, and argument
//! builders for the router.

#![allow(dead_code)]

use std::sync::Arc;

use assetchain_contract::{Asset, ContractRouter, Response};
use assetchain_hostapi::{MemStore, StubConfig, TxStub};

// ── Fixtures ──

/// An asset not present in the seed set.
pub fn sample_asset(id: &str) -> Asset {
    Asset {
        appraised_value: 820,
        color: "silver".into(),
        id: id.into(),
        manufacter: "Porsche".into(),
        material: "Titanium".into(),
        model: "911".into(),
        production_date: "18-05-2022".into(),
        recyclability: "high".into(),
        serial_number: "SN555666777".into(),
        size: 170,
        weight: 64.5,
    }
}

/// The router arguments for `CreateAsset` / `UpdateAsset` of `asset`.
pub fn asset_args(asset: &Asset) -> Vec<String> {
    vec![
        asset.id.clone(),
        asset.appraised_value.to_string(),
        asset.color.clone(),
        asset.manufacter.clone(),
        asset.material.clone(),
        asset.model.clone(),
        asset.production_date.clone(),
        asset.recyclability.clone(),
        asset.serial_number.clone(),
        asset.size.to_string(),
        asset.weight.to_string(),
    ]
}

// ── Ledger harness ──

/// A committed world state plus the logic to run one transaction at a
/// time against it, committing only successful submissions.
pub struct Ledger {
    pub store: MemStore,
    pub config: StubConfig,
    router: ContractRouter,
    tx_counter: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_config(StubConfig::default())
    }

    pub fn with_config(config: StubConfig) -> Self {
        Self {
            store: MemStore::new(),
            config,
            router: ContractRouter::new(),
            tx_counter: 0,
        }
    }

    /// A ledger on which `InitLedger` has already been committed.
    pub fn seeded() -> Self {
        let mut ledger = Self::new();
        let resp = ledger.submit("InitLedger", &[]);
        assert!(resp.is_ok(), "InitLedger failed: {}", resp.message);
        ledger
    }

    fn next_stub(&mut self) -> TxStub {
        self.tx_counter += 1;
        TxStub::with_config(
            format!("tx{}", self.tx_counter),
            Arc::new(self.store.clone()),
            self.config.clone(),
        )
    }

    /// Run and commit on success.
    pub fn submit(&mut self, function: &str, args: &[&str]) -> Response {
        let mut stub = self.next_stub();
        let resp = self.router.invoke(&mut stub, function, args);
        if resp.is_ok() {
            self.store.apply_writes(stub.into_writes());
        }
        resp
    }

    /// Same as [`submit`](Self::submit) for owned arguments.
    pub fn submit_owned(&mut self, function: &str, args: &[String]) -> Response {
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.submit(function, &refs)
    }

    /// Run and discard writes.
    pub fn evaluate(&mut self, function: &str, args: &[&str]) -> Response {
        let mut stub = self.next_stub();
        self.router.invoke(&mut stub, function, args)
    }

    /// Evaluate `ReadAsset` and decode the payload.
    pub fn read(&mut self, id: &str) -> Option<Asset> {
        let resp = self.evaluate("ReadAsset", &[id]);
        resp.is_ok()
            .then(|| serde_json::from_slice(&resp.payload).expect("asset payload"))
    }

    /// Evaluate `GetAllAssets` and decode the payload.
    pub fn all(&mut self) -> Vec<Asset> {
        let resp = self.evaluate("GetAllAssets", &[]);
        assert!(resp.is_ok(), "GetAllAssets failed: {}", resp.message);
        serde_json::from_slice(&resp.payload).expect("asset list payload")
    }
}
