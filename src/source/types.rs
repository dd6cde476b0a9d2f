//! Data source errors

use crate::market::UnitsError;
use thiserror::Error;

/// Errors from remote market reads
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON-RPC error object returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
    },
    /// Response carried neither result nor error
    #[error("Empty RPC response")]
    EmptyResponse,
    /// Return data could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// Fixed-point amount out of range
    #[error(transparent)]
    Units(#[from] UnitsError),
    /// Request amount was not positive
    #[error("Quote amount must be positive")]
    NonPositiveAmount,
    /// Source cannot serve this request
    #[error("{0} unavailable")]
    Unavailable(&'static str),
}
