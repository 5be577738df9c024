//! Request and response envelopes for a basic backtest run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::backtest::{
    AdditionalResults, Configuration, DateConfig, Trade, Transaction, TransactionCostConfig,
};
use super::instrument::Instrument;

crate::plain_data_record! {
    /// Request body for a basic backtest.
    pub struct BasicBacktestRequest {
        /// Date window and evaluation frequency.
        pub dates: DateConfig,
        /// Trades entered over the window.
        pub trades: Vec<Trade>,
        /// Risk measures to report, e.g. `Price` or `Delta`.
        #[serde(default)]
        pub measures: Vec<String>,
        /// Pricing configuration.
        #[serde(default)]
        pub configuration: Option<Configuration>,
        /// Transaction cost configuration.
        #[serde(default)]
        pub transaction_cost_config: Option<TransactionCostConfig>,
    }
}

crate::plain_data_record! {
    /// Response body of a basic backtest.
    pub struct BasicBacktestResponse {
        /// Held portfolio per date.
        #[serde(default)]
        pub portfolio: BTreeMap<NaiveDate, Vec<Instrument>>,
        /// Transactions per date.
        #[serde(default)]
        pub transactions: BTreeMap<NaiveDate, Vec<Transaction>>,
        /// Risk measure series keyed by measure name.
        #[serde(default)]
        pub risks: BTreeMap<String, BTreeMap<NaiveDate, Decimal>>,
        /// Hedges and diagnostics.
        #[serde(default)]
        pub additional_results: Option<AdditionalResults>,
    }
}
