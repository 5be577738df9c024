//! Backtest datatypes exchanged with the cross-asset backtest API.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::instrument::Instrument;

/// Whether a transaction opens or closes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionDirection {
    /// Position entry.
    Entry,
    /// Position exit.
    Exit,
}

/// Unit the trade quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuantityType {
    /// Number of units.
    #[default]
    Quantity,
    /// Notional amount.
    Notional,
    /// Vega exposure.
    Vega,
    /// Delta exposure.
    Delta,
    /// Fraction of net asset value.
    #[serde(rename = "NAV")]
    Nav,
}

/// Measure a scaled cost model multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCostScalingType {
    /// Scale by traded quantity.
    Quantity,
    /// Scale by traded notional.
    Notional,
    /// Scale by traded vega.
    Vega,
}

/// How an aggregate cost model combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostAggregationType {
    /// Sum of all children.
    Sum,
    /// Largest child cost.
    Max,
    /// Smallest child cost.
    Min,
}

/// Market data snapshot location.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingLocation {
    /// New York close.
    NYC,
    /// London close.
    LDN,
    /// Hong Kong close.
    HKG,
    /// Tokyo close.
    TKO,
}

/// Equity volatility surface dynamics.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquityMarketModel {
    /// Sticky fixed strike.
    SFK,
    /// Sticky delta.
    SD,
}

/// Roll date convention for expiring legs.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollDateMode {
    /// Over-the-counter roll dates.
    OTC,
    /// Exchange listed roll dates.
    Listed,
}

/// Transaction cost model, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionCostModel {
    /// Flat cost per transaction.
    Fixed(FixedCostModel),
    /// Cost proportional to a traded measure.
    Scaled(ScaledCostModel),
    /// Combination of other models.
    Aggregate(AggregateCostModel),
}

crate::described_enum!(
    TransactionDirection,
    QuantityType,
    TransactionCostScalingType,
    CostAggregationType,
    PricingLocation,
    EquityMarketModel,
    RollDateMode,
    TransactionCostModel,
);

/// Evaluation frequency assumed for a request that names none.
pub const DEFAULT_FREQUENCY: &str = "1b";

const fn default_true() -> bool {
    true
}

crate::plain_data_record! {
    /// A single transaction generated by the backtest.
    pub struct Transaction {
        /// Instruments traded.
        pub portfolio: Vec<Instrument>,
        /// Price of the traded portfolio.
        #[serde(default)]
        pub portfolio_price: Option<Decimal>,
        /// Transaction cost.
        #[serde(default)]
        pub cost: Option<Decimal>,
        /// Currency of price and cost.
        #[serde(default)]
        pub currency: Option<String>,
        /// Entry or exit.
        #[serde(default)]
        pub direction: Option<TransactionDirection>,
        /// Traded quantity.
        #[serde(default)]
        pub quantity: Option<Decimal>,
    }
}

crate::plain_data_record! {
    /// Results returned alongside the main backtest series.
    pub struct AdditionalResults {
        /// Hedge portfolio per date.
        #[serde(default)]
        pub hedges: Option<BTreeMap<NaiveDate, Vec<Instrument>>>,
        /// Hedge P&L per date.
        #[serde(default)]
        pub hedge_pnl: Option<BTreeMap<NaiveDate, Decimal>>,
        /// Number of pricing calculations performed.
        #[serde(default)]
        pub no_of_calculations: Option<u64>,
    }
}

crate::plain_data_record! {
    /// Backtest date window and schedule.
    pub struct DateConfig {
        /// First date (inclusive).
        pub start_date: NaiveDate,
        /// Last date (inclusive).
        pub end_date: NaiveDate,
        /// Evaluation frequency tenor; [`DEFAULT_FREQUENCY`] when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub frequency: Option<String>,
        /// Holiday calendar name.
        #[serde(default)]
        pub holiday_calendar: Option<String>,
    }
}

crate::plain_data_record! {
    /// A periodically entered trade.
    pub struct Trade {
        /// Instruments entered on each buy date.
        #[serde(default)]
        pub legs: Option<Vec<Instrument>>,
        /// Tenor between entries.
        pub buy_frequency: String,
        /// Explicit entry dates, overriding the frequency.
        #[serde(default)]
        pub buy_dates: Option<Vec<NaiveDate>>,
        /// Tenor each entry is held for.
        pub holding_period: String,
        /// Explicit exit dates.
        #[serde(default)]
        pub exit_dates: Option<Vec<NaiveDate>>,
        /// Size of each entry.
        #[serde(default)]
        pub quantity: Option<Decimal>,
        /// Unit of `quantity`.
        #[serde(default)]
        pub quantity_type: QuantityType,
    }
}

crate::plain_data_record! {
    /// Flat cost per transaction.
    pub struct FixedCostModel {
        /// Cost charged.
        pub cost: Decimal,
    }
}

crate::plain_data_record! {
    /// Cost proportional to a traded measure.
    pub struct ScaledCostModel {
        /// Measure scaled.
        pub scaling_type: TransactionCostScalingType,
        /// Cost per unit of the measure.
        pub scaling_level: Decimal,
    }
}

crate::plain_data_record! {
    /// Combination of cost models.
    pub struct AggregateCostModel {
        /// Child models.
        pub models: Vec<TransactionCostModel>,
        /// How child costs are combined.
        pub aggregate_type: CostAggregationType,
    }
}

crate::plain_data_record! {
    /// Transaction costs for trades and hedges.
    pub struct TransactionCostConfig {
        /// Cost model applied to trade transactions.
        #[serde(default)]
        pub trade_cost_model: Option<TransactionCostModel>,
        /// Cost model applied to hedge transactions.
        #[serde(default)]
        pub hedge_cost_model: Option<TransactionCostModel>,
    }
}

crate::plain_data_record! {
    /// Pricing configuration for the backtest run.
    pub struct Configuration {
        /// Market data location.
        #[serde(default)]
        pub market_data_location: Option<PricingLocation>,
        /// Equity vol surface model.
        #[serde(default)]
        pub market_model: Option<EquityMarketModel>,
        /// Accrue interest on cash.
        #[serde(default = "default_true")]
        pub cash_accrual: bool,
        /// Roll date convention.
        #[serde(default)]
        pub roll_date_mode: Option<RollDateMode>,
        /// Merge entries produced by roll signals.
        #[serde(default)]
        pub combine_roll_signal_entries: bool,
    }
}
