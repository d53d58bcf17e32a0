use ethers_core::types::Bytes;
use thiserror::Error;

/// Fatal startup conditions. Any of these stops the process before the UI opens.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("private key not found: set {0} in the environment or in .env")]
    MissingKey(&'static str),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("invalid contract address {address}: {reason}")]
    InvalidContractAddress { address: String, reason: String },

    #[error("contract ABI: {0}")]
    Abi(String),

    #[error("cannot reach RPC endpoint {url}: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Errors surfaced by a `ChainClient`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    /// The node answered with a JSON-RPC error object.
    #[error("RPC error: {message}")]
    Rpc {
        message: String,
        revert_data: Option<Bytes>,
    },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Rejected form input. Raised before anything is sent to the node.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("{field} must be between {min} and {max}, got {got}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        got: String,
    },
}
