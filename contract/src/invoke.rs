//! Invocation decoding and dispatch.
//!
//! The ledger runtime delivers a function name and a list of string
//! arguments. `Invocation::decode` turns them into a typed call;
//! `ContractRouter::invoke` runs it against the world state and encodes
//! the result as a `Response`.
//!
//! ## Argument layout
//!
//! ```text
//! InitLedger
//! CreateAsset   id appraisedValue color manufacter material model
//!               productionDate recyclability serialNumber size weight
//! ReadAsset     id
//! UpdateAsset   (same 11 arguments as CreateAsset)
//! DeleteAsset   id
//! AssetExists   id
//! TransferAsset id newManufacter
//! GetAllAssets
//! ```

use std::str::FromStr;

use assetchain_hostapi::WorldState;
use tracing::{debug, warn};

use crate::asset::Asset;
use crate::codec;
use crate::contract::SmartContract;
use crate::error::{ContractError, ContractResult};

/// Number of arguments taken by `CreateAsset` and `UpdateAsset`.
pub const ASSET_ARG_COUNT: usize = 11;

/// A decoded contract call.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    InitLedger,
    CreateAsset(Asset),
    ReadAsset { id: String },
    UpdateAsset(Asset),
    DeleteAsset { id: String },
    AssetExists { id: String },
    TransferAsset { id: String, new_manufacter: String },
    GetAllAssets,
}

impl Invocation {
    /// Names of every exported function, in declaration order.
    pub const FUNCTIONS: [&'static str; 8] = [
        "InitLedger",
        "CreateAsset",
        "ReadAsset",
        "UpdateAsset",
        "DeleteAsset",
        "AssetExists",
        "TransferAsset",
        "GetAllAssets",
    ];

    /// Decode a function name and its string arguments.
    pub fn decode<S: AsRef<str>>(function: &str, args: &[S]) -> ContractResult<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let arity = |expected: usize| -> ContractResult<()> {
            if args.len() != expected {
                return Err(ContractError::ArgumentCount {
                    function: function.to_string(),
                    expected,
                    received: args.len(),
                });
            }
            Ok(())
        };

        let invocation = match function {
            "InitLedger" => {
                arity(0)?;
                Self::InitLedger
            }
            "CreateAsset" => {
                arity(ASSET_ARG_COUNT)?;
                Self::CreateAsset(asset_from_args(&args)?)
            }
            "ReadAsset" => {
                arity(1)?;
                Self::ReadAsset { id: args[0].to_string() }
            }
            "UpdateAsset" => {
                arity(ASSET_ARG_COUNT)?;
                Self::UpdateAsset(asset_from_args(&args)?)
            }
            "DeleteAsset" => {
                arity(1)?;
                Self::DeleteAsset { id: args[0].to_string() }
            }
            "AssetExists" => {
                arity(1)?;
                Self::AssetExists { id: args[0].to_string() }
            }
            "TransferAsset" => {
                arity(2)?;
                Self::TransferAsset {
                    id: args[0].to_string(),
                    new_manufacter: args[1].to_string(),
                }
            }
            "GetAllAssets" => {
                arity(0)?;
                Self::GetAllAssets
            }
            other => return Err(ContractError::UnknownFunction(other.to_string())),
        };
        Ok(invocation)
    }

    /// The exported function name for this call.
    pub fn function(&self) -> &'static str {
        match self {
            Self::InitLedger => "InitLedger",
            Self::CreateAsset(_) => "CreateAsset",
            Self::ReadAsset { .. } => "ReadAsset",
            Self::UpdateAsset(_) => "UpdateAsset",
            Self::DeleteAsset { .. } => "DeleteAsset",
            Self::AssetExists { .. } => "AssetExists",
            Self::TransferAsset { .. } => "TransferAsset",
            Self::GetAllAssets => "GetAllAssets",
        }
    }

    /// True if the call never writes to world state.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::ReadAsset { .. } | Self::AssetExists { .. } | Self::GetAllAssets
        )
    }
}

fn asset_from_args(args: &[&str]) -> ContractResult<Asset> {
    Ok(Asset {
        id: args[0].to_string(),
        appraised_value: parse_arg(args, 1, "int")?,
        color: args[2].to_string(),
        manufacter: args[3].to_string(),
        material: args[4].to_string(),
        model: args[5].to_string(),
        production_date: args[6].to_string(),
        recyclability: args[7].to_string(),
        serial_number: args[8].to_string(),
        size: parse_arg(args, 9, "int")?,
        weight: parse_arg(args, 10, "float32")?,
    })
}

fn parse_arg<T: FromStr>(args: &[&str], index: usize, expected: &'static str) -> ContractResult<T> {
    args[index].parse().map_err(|_| ContractError::InvalidArgument {
        index,
        expected,
        value: args[index].to_string(),
    })
}

/// Outcome status of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    /// Numeric status code reported to the runtime.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Error => 500,
        }
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    /// Encoded return value; empty for calls that return nothing.
    pub payload: Vec<u8>,
    /// Error text when `status` is `Error`.
    pub message: String,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            payload,
            message: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            payload: Vec::new(),
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

/// Routes invocations to `SmartContract` and encodes their results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractRouter {
    contract: SmartContract,
}

impl ContractRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and run one invocation. Never panics; failures become
    /// `Status::Error` responses.
    pub fn invoke<S: AsRef<str>>(
        &self,
        state: &mut dyn WorldState,
        function: &str,
        args: &[S],
    ) -> Response {
        let result = Invocation::decode(function, args)
            .and_then(|invocation| self.execute(state, &invocation));
        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                warn!(tx_id = state.tx_id(), function, error = %err, "invocation failed");
                Response::error(err.to_string())
            }
        }
    }

    /// Run a decoded invocation and return its encoded payload.
    pub fn execute(
        &self,
        state: &mut dyn WorldState,
        invocation: &Invocation,
    ) -> ContractResult<Vec<u8>> {
        debug!(tx_id = state.tx_id(), function = invocation.function(), "executing");
        let c = &self.contract;
        let payload = match invocation {
            Invocation::InitLedger => {
                c.init_ledger(state)?;
                Vec::new()
            }
            Invocation::CreateAsset(asset) => {
                c.create_asset(state, asset.clone())?;
                Vec::new()
            }
            Invocation::ReadAsset { id } => codec::to_vec(&c.read_asset(state, id)?)?,
            Invocation::UpdateAsset(asset) => {
                c.update_asset(state, asset.clone())?;
                Vec::new()
            }
            Invocation::DeleteAsset { id } => {
                c.delete_asset(state, id)?;
                Vec::new()
            }
            Invocation::AssetExists { id } => codec::to_vec(&c.asset_exists(state, id)?)?,
            Invocation::TransferAsset { id, new_manufacter } => {
                c.transfer_asset(state, id, new_manufacter)?.into_bytes()
            }
            Invocation::GetAllAssets => codec::to_vec(&c.get_all_assets(state)?)?,
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetchain_hostapi::{MemStore, TxStub};
    use std::sync::Arc;

    fn asset_args(id: &str) -> Vec<String> {
        [
            id, "700", "grey", "Seat", "Steel", "Ibiza", "02-03-2021", "medium",
            "SN111222333", "140", "55.25",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn stub() -> TxStub {
        TxStub::new("tx-router", Arc::new(MemStore::new()))
    }

    #[test]
    fn test_decode_create_asset() {
        let inv = Invocation::decode("CreateAsset", &asset_args("a7")).unwrap();
        let asset = match inv {
            Invocation::CreateAsset(asset) => asset,
            other => panic!("expected CreateAsset, got {other:?}"),
        };
        assert_eq!(asset.id, "a7");
        assert_eq!(asset.appraised_value, 700);
        assert_eq!(asset.manufacter, "Seat");
        assert_eq!(asset.serial_number, "SN111222333");
        assert_eq!(asset.size, 140);
        assert_eq!(asset.weight, 55.25);
    }

    #[test]
    fn test_decode_simple_calls() {
        let none: [&str; 0] = [];
        assert_eq!(Invocation::decode("InitLedger", &none).unwrap(), Invocation::InitLedger);
        assert_eq!(Invocation::decode("GetAllAssets", &none).unwrap(), Invocation::GetAllAssets);
        assert_eq!(
            Invocation::decode("TransferAsset", &["asset1", "Kia"]).unwrap(),
            Invocation::TransferAsset {
                id: "asset1".into(),
                new_manufacter: "Kia".into()
            }
        );
        assert_eq!(
            Invocation::decode("DeleteAsset", &["asset1"]).unwrap(),
            Invocation::DeleteAsset { id: "asset1".into() }
        );
    }

    #[test]
    fn test_decode_unknown_function() {
        let err = Invocation::decode("BurnAsset", &["asset1"]).unwrap_err();
        assert!(matches!(err, ContractError::UnknownFunction(name) if name == "BurnAsset"));
        // Names are case-sensitive
        assert!(Invocation::decode("readAsset", &["asset1"]).is_err());
    }

    #[test]
    fn test_decode_wrong_arg_count() {
        let err = Invocation::decode("ReadAsset", &["a", "b"]).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount { expected: 1, received: 2, .. }
        ));

        let mut short = asset_args("a7");
        short.pop();
        let err = Invocation::decode("UpdateAsset", &short).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ArgumentCount { expected: 11, received: 10, .. }
        ));
    }

    #[test]
    fn test_decode_bad_numbers() {
        let mut args = asset_args("a7");
        args[1] = "lots".into();
        let err = Invocation::decode("CreateAsset", &args).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgument { index: 1, expected: "int", .. }
        ));

        let mut args = asset_args("a7");
        args[10] = "heavy".into();
        let err = Invocation::decode("CreateAsset", &args).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgument { index: 10, expected: "float32", .. }
        ));

        let mut args = asset_args("a7");
        args[9] = "1.5".into();
        assert!(Invocation::decode("CreateAsset", &args).is_err());

        for padded in [" 5", "5 ", "\t5"] {
            let mut args = asset_args("a7");
            args[9] = padded.into();
            let err = Invocation::decode("CreateAsset", &args).unwrap_err();
            assert!(matches!(err, ContractError::InvalidArgument { index: 9, .. }));
        }
    }

    #[test]
    fn test_function_names_roundtrip() {
        for name in Invocation::FUNCTIONS {
            let args: Vec<String> = match name {
                "CreateAsset" | "UpdateAsset" => asset_args("x"),
                "TransferAsset" => vec!["x".into(), "y".into()],
                "InitLedger" | "GetAllAssets" => Vec::new(),
                _ => vec!["x".into()],
            };
            let inv = Invocation::decode(name, &args).unwrap();
            assert_eq!(inv.function(), name);
        }
    }

    #[test]
    fn test_read_only_classification() {
        assert!(Invocation::GetAllAssets.is_read_only());
        assert!(Invocation::ReadAsset { id: "a".into() }.is_read_only());
        assert!(Invocation::AssetExists { id: "a".into() }.is_read_only());
        assert!(!Invocation::InitLedger.is_read_only());
        assert!(!Invocation::DeleteAsset { id: "a".into() }.is_read_only());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::Error.code(), 500);
    }

    #[test]
    fn test_invoke_payloads() {
        let router = ContractRouter::new();
        let mut state = stub();
        let none: [&str; 0] = [];

        let resp = router.invoke(&mut state, "InitLedger", &none);
        assert!(resp.is_ok());
        assert!(resp.payload.is_empty());

        let resp = router.invoke(&mut state, "AssetExists", &["asset1"]);
        assert_eq!(resp.payload, b"true");
        let resp = router.invoke(&mut state, "AssetExists", &["asset42"]);
        assert_eq!(resp.payload, b"false");

        let resp = router.invoke(&mut state, "ReadAsset", &["asset4"]);
        let asset: Asset = serde_json::from_slice(&resp.payload).unwrap();
        assert_eq!(asset.model, "Mustang");

        let resp = router.invoke(&mut state, "TransferAsset", &["asset4", "Dodge"]);
        assert!(resp.is_ok());
        assert_eq!(resp.payload, b"Ford");

        let resp = router.invoke(&mut state, "GetAllAssets", &none);
        let all: Vec<Asset> = serde_json::from_slice(&resp.payload).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[3].manufacter, "Dodge");
    }

    #[test]
    fn test_invoke_empty_list_is_json_array() {
        let router = ContractRouter::new();
        let mut state = stub();
        let none: [&str; 0] = [];
        let resp = router.invoke(&mut state, "GetAllAssets", &none);
        assert_eq!(resp.payload, b"[]");
    }

    #[test]
    fn test_invoke_errors_become_responses() {
        let router = ContractRouter::new();
        let mut state = stub();

        let resp = router.invoke(&mut state, "ReadAsset", &["asset1"]);
        assert_eq!(resp.status, Status::Error);
        assert_eq!(resp.message, "the asset asset1 does not exist");
        assert!(resp.payload.is_empty());

        let resp = router.invoke(&mut state, "Nope", &["asset1"]);
        assert_eq!(resp.status, Status::Error);
        assert!(resp.message.contains("Nope"));
    }
}
