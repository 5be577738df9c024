//! Priceable instrument as carried in backtest payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Asset class of an instrument.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Equities.
    Equity,
    /// Interest rates.
    Rates,
    /// Foreign exchange.
    FX,
    /// Commodities.
    Commod,
    /// Credit.
    Credit,
    /// Multi-asset.
    #[serde(rename = "Cross Asset")]
    CrossAsset,
    /// Loans.
    Loan,
    /// Mortgages.
    Mortgage,
}

crate::described_enum!(AssetClass);

crate::plain_data_record! {
    /// An instrument leg.
    ///
    /// Only the identifying attributes are typed; pricing parameters
    /// (strike, expiry, notional, ...) differ per instrument type and are
    /// kept as raw JSON.
    pub struct Instrument {
        /// Asset class.
        pub asset_class: AssetClass,
        /// Instrument type, e.g. `Option` or `IRSwap`.
        #[serde(rename = "type")]
        pub instrument_type: String,
        /// Display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        /// Instrument-specific parameters.
        #[serde(flatten)]
        pub properties: BTreeMap<String, serde_json::Value>,
    }
}
