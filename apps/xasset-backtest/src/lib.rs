// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Cross-asset backtest datatypes.
//!
//! Plain data records exchanged with the cross-asset backtest API and the
//! tooling around them:
//!
//! - `models`: the records (`Transaction`, `AdditionalResults`, `DateConfig`,
//!   `Trade`, `Configuration`, `TransactionCostConfig`, ...) and the
//!   `plain_data_record!` declaration macro
//! - `conformance`: asserts a list of types were declared as plain records
//! - `request`: request validation and defaulting
//! - `costs`: transaction cost estimation
//! - `response`: response decoding and summaries
//! - `config` / `telemetry`: YAML configuration and tracing setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod conformance;
pub mod costs;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod telemetry;
pub mod tenor;

pub use conformance::{ConformanceChecker, ConformanceError, ConformanceReport};
pub use error::{Error, Result};
pub use models::record::{is_plain_data_record, record_violation};
pub use models::{
    AdditionalResults, BasicBacktestRequest, BasicBacktestResponse, Configuration, DateConfig,
    Trade, Transaction, TransactionCostConfig,
};
