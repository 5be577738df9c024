//! Transaction cost estimation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{CostAggregationType, TransactionCostModel, TransactionCostScalingType};

/// Traded measures a cost model can scale with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CostBasis {
    /// Traded quantity.
    pub quantity: Decimal,
    /// Traded notional.
    pub notional: Decimal,
    /// Traded vega.
    pub vega: Decimal,
}

impl CostBasis {
    const fn measure(&self, scaling_type: TransactionCostScalingType) -> Decimal {
        match scaling_type {
            TransactionCostScalingType::Quantity => self.quantity,
            TransactionCostScalingType::Notional => self.notional,
            TransactionCostScalingType::Vega => self.vega,
        }
    }
}

/// Cost estimation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CostError {
    /// The cost does not fit in a `Decimal`.
    #[error("transaction cost overflowed")]
    Overflow,
}

/// Estimate the cost of one transaction.
///
/// Scaled models charge on the absolute measure so buys and sells cost the
/// same. An aggregate with no children costs nothing.
pub fn estimate_cost(model: &TransactionCostModel, basis: &CostBasis) -> Result<Decimal, CostError> {
    match model {
        TransactionCostModel::Fixed(fixed) => Ok(fixed.cost),
        TransactionCostModel::Scaled(scaled) => scaled
            .scaling_level
            .checked_mul(basis.measure(scaled.scaling_type).abs())
            .ok_or(CostError::Overflow),
        TransactionCostModel::Aggregate(aggregate) => {
            let costs = aggregate
                .models
                .iter()
                .map(|m| estimate_cost(m, basis))
                .collect::<Result<Vec<_>, _>>()?;
            match aggregate.aggregate_type {
                CostAggregationType::Sum => costs
                    .into_iter()
                    .try_fold(Decimal::ZERO, Decimal::checked_add)
                    .ok_or(CostError::Overflow),
                CostAggregationType::Max => Ok(costs.into_iter().max().unwrap_or(Decimal::ZERO)),
                CostAggregationType::Min => Ok(costs.into_iter().min().unwrap_or(Decimal::ZERO)),
            }
        }
    }
}
