//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::conformance::ConformanceError;
use crate::costs::CostError;
use crate::request::RequestError;
use crate::response::ResponseError;

/// Any failure raised by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A type is not a plain data record.
    #[error(transparent)]
    Conformance(#[from] ConformanceError),

    /// A request failed validation.
    #[error("Invalid backtest request: {0}")]
    Request(#[from] RequestError),

    /// A request body could not be decoded.
    #[error("Failed to decode backtest request: {0}")]
    RequestDecode(#[source] serde_json::Error),

    /// A cost estimate fell outside the `Decimal` range.
    #[error(transparent)]
    Cost(#[from] CostError),

    /// A response could not be decoded or summarised.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
