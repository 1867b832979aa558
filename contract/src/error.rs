//! Contract error types.

use assetchain_hostapi::HostError;

/// Error returned by contract operations and invocation decoding.
///
/// The `Display` text is what the caller sees in a failed `Response`.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("the asset {0} already exists")]
    AlreadyExists(String),

    #[error("the asset {0} does not exist")]
    NotFound(String),

    /// `get_state` failed.
    #[error("failed to read from world state: {0}")]
    ReadState(HostError),

    /// `put_state` failed while seeding.
    #[error("failed to put to world state. {0}")]
    PutState(HostError),

    /// Any other world-state failure, reported as-is.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A stored value is not a valid asset record, or a result failed to encode.
    #[error(transparent)]
    Codec(#[from] serde_json::Error),

    #[error("function {0} not found in contract")]
    UnknownFunction(String),

    #[error("incorrect number of params for {function}: expected {expected}, received {received}")]
    ArgumentCount {
        function: String,
        expected: usize,
        received: usize,
    },

    #[error("error converting parameter {index} to {expected}: {value:?}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        value: String,
    },
}

/// Convenience result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
