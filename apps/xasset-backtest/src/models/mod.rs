//! Datatypes of the cross-asset backtest API.
//!
//! Every struct here is declared with [`plain_data_record!`](crate::plain_data_record)
//! and carries no behaviour of its own; validation, cost estimation and
//! summaries live in the modules that consume these types.

pub mod record;

mod backtest;
mod envelope;
mod instrument;

pub use backtest::{
    AdditionalResults, AggregateCostModel, Configuration, CostAggregationType, DEFAULT_FREQUENCY,
    DateConfig,
    EquityMarketModel, FixedCostModel, PricingLocation, QuantityType, RollDateMode,
    ScaledCostModel, Trade, Transaction, TransactionCostConfig, TransactionCostModel,
    TransactionCostScalingType, TransactionDirection,
};
pub use envelope::{BasicBacktestRequest, BasicBacktestResponse};
pub use instrument::{AssetClass, Instrument};
pub use record::{Described, FieldInfo, PlainDataRecord, TypeInfo, TypeKind};
