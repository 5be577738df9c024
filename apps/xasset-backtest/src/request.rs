//! Validation and defaulting of backtest requests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::RequestDefaults;
use crate::models::{
    BasicBacktestRequest, Configuration, DEFAULT_FREQUENCY, DateConfig, Trade,
    TransactionCostConfig, TransactionCostModel,
};
use crate::tenor::{Tenor, TenorError};

/// Request validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Start date after end date.
    #[error("start date {start} is after end date {end}")]
    InvertedDates {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A tenor field failed to parse.
    #[error("{field}: {source}")]
    InvalidTenor {
        /// Field path.
        field: String,
        /// Parse failure.
        source: TenorError,
    },

    /// No trades in the request.
    #[error("request has no trades")]
    NoTrades,

    /// A trade has an empty leg list.
    #[error("trade {index} has no legs")]
    EmptyLegs {
        /// Trade position in the request.
        index: usize,
    },

    /// A trade quantity is zero or negative.
    #[error("trade {index} quantity {quantity} must be positive")]
    NonPositiveQuantity {
        /// Trade position in the request.
        index: usize,
        /// Offending quantity.
        quantity: Decimal,
    },

    /// Explicit dates are not strictly ascending.
    #[error("{field} must be strictly ascending")]
    UnorderedDates {
        /// Field path.
        field: String,
    },

    /// An explicit date falls outside the backtest window.
    #[error("{field} date {date} is outside {start}..={end}")]
    DateOutOfRange {
        /// Field path.
        field: String,
        /// Offending date.
        date: NaiveDate,
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// A cost model has a negative parameter.
    #[error("{field} must not be negative")]
    NegativeCost {
        /// Field path.
        field: String,
    },

    /// An aggregate cost model has no children.
    #[error("{field} aggregates no models")]
    EmptyAggregate {
        /// Field path.
        field: String,
    },
}

/// Validate a request before submission.
///
/// Returns the first problem found, checking dates, then trades in order,
/// then cost models.
pub fn validate_request(request: &BasicBacktestRequest) -> Result<(), RequestError> {
    validate_dates(&request.dates)?;

    if request.trades.is_empty() {
        return Err(RequestError::NoTrades);
    }
    for (index, trade) in request.trades.iter().enumerate() {
        validate_trade(index, trade, &request.dates)?;
    }

    if let Some(costs) = &request.transaction_cost_config {
        validate_costs(costs)?;
    }

    tracing::debug!(
        trades = request.trades.len(),
        measures = request.measures.len(),
        "request validated"
    );
    Ok(())
}

/// Fill missing request fields from configured defaults.
pub fn apply_defaults(request: &mut BasicBacktestRequest, defaults: &RequestDefaults) {
    if request
        .dates
        .frequency
        .as_deref()
        .is_none_or(|f| f.trim().is_empty())
    {
        request.dates.frequency = Some(defaults.frequency.clone());
    }
    if request.dates.holiday_calendar.is_none() {
        request.dates.holiday_calendar.clone_from(&defaults.holiday_calendar);
    }
    if request.configuration.is_none() {
        request.configuration = Some(Configuration {
            market_data_location: None,
            market_model: None,
            cash_accrual: defaults.cash_accrual,
            roll_date_mode: None,
            combine_roll_signal_entries: false,
        });
    }
}

fn parse_tenor(field: String, value: &str) -> Result<Tenor, RequestError> {
    value
        .parse()
        .map_err(|source| RequestError::InvalidTenor { field, source })
}

fn validate_dates(dates: &DateConfig) -> Result<(), RequestError> {
    if dates.start_date > dates.end_date {
        return Err(RequestError::InvertedDates {
            start: dates.start_date,
            end: dates.end_date,
        });
    }
    parse_tenor(
        "dates.frequency".to_string(),
        dates.frequency.as_deref().unwrap_or(DEFAULT_FREQUENCY),
    )?;
    Ok(())
}

fn validate_trade(index: usize, trade: &Trade, dates: &DateConfig) -> Result<(), RequestError> {
    parse_tenor(format!("trades[{index}].buy_frequency"), &trade.buy_frequency)?;
    parse_tenor(format!("trades[{index}].holding_period"), &trade.holding_period)?;

    if trade.legs.as_ref().is_some_and(Vec::is_empty) {
        return Err(RequestError::EmptyLegs { index });
    }

    if let Some(quantity) = trade.quantity {
        if quantity <= Decimal::ZERO {
            return Err(RequestError::NonPositiveQuantity { index, quantity });
        }
    }

    if let Some(buy_dates) = &trade.buy_dates {
        validate_schedule(format!("trades[{index}].buy_dates"), buy_dates, dates)?;
    }
    if let Some(exit_dates) = &trade.exit_dates {
        validate_schedule(format!("trades[{index}].exit_dates"), exit_dates, dates)?;
    }

    Ok(())
}

fn validate_schedule(
    field: String,
    schedule: &[NaiveDate],
    dates: &DateConfig,
) -> Result<(), RequestError> {
    if schedule.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(RequestError::UnorderedDates { field });
    }

    if let Some(&date) = schedule
        .iter()
        .find(|d| **d < dates.start_date || **d > dates.end_date)
    {
        return Err(RequestError::DateOutOfRange {
            field,
            date,
            start: dates.start_date,
            end: dates.end_date,
        });
    }

    Ok(())
}

fn validate_costs(costs: &TransactionCostConfig) -> Result<(), RequestError> {
    if let Some(model) = &costs.trade_cost_model {
        validate_cost_model("trade_cost_model", model)?;
    }
    if let Some(model) = &costs.hedge_cost_model {
        validate_cost_model("hedge_cost_model", model)?;
    }
    Ok(())
}

fn validate_cost_model(field: &str, model: &TransactionCostModel) -> Result<(), RequestError> {
    match model {
        TransactionCostModel::Fixed(fixed) => {
            if fixed.cost < Decimal::ZERO {
                return Err(RequestError::NegativeCost {
                    field: format!("{field}.cost"),
                });
            }
        }
        TransactionCostModel::Scaled(scaled) => {
            if scaled.scaling_level < Decimal::ZERO {
                return Err(RequestError::NegativeCost {
                    field: format!("{field}.scaling_level"),
                });
            }
        }
        TransactionCostModel::Aggregate(aggregate) => {
            if aggregate.models.is_empty() {
                return Err(RequestError::EmptyAggregate {
                    field: field.to_string(),
                });
            }
            for (i, child) in aggregate.models.iter().enumerate() {
                validate_cost_model(&format!("{field}.models[{i}]"), child)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AggregateCostModel, CostAggregationType, FixedCostModel, QuantityType,
        ScaledCostModel, TransactionCostScalingType,
    };
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trade() -> Trade {
        Trade {
            legs: None,
            buy_frequency: "1m".to_string(),
            buy_dates: None,
            holding_period: "3m".to_string(),
            exit_dates: None,
            quantity: Some(dec!(1)),
            quantity_type: QuantityType::Quantity,
        }
    }

    fn request() -> BasicBacktestRequest {
        BasicBacktestRequest {
            dates: DateConfig {
                start_date: date(2024, 1, 2),
                end_date: date(2024, 12, 31),
                frequency: Some("1b".to_string()),
                holiday_calendar: None,
            },
            trades: vec![trade()],
            measures: vec!["Price".to_string()],
            configuration: None,
            transaction_cost_config: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert_eq!(validate_request(&request()), Ok(()));
    }

    #[test]
    fn test_inverted_dates() {
        let mut req = request();
        req.dates.end_date = date(2023, 12, 29);
        assert!(matches!(
            validate_request(&req),
            Err(RequestError::InvertedDates { .. })
        ));
    }

    #[test]
    fn test_bad_frequency() {
        let mut req = request();
        req.dates.frequency = Some("fortnightly".to_string());
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().starts_with("dates.frequency"));
    }

    #[test]
    fn test_no_trades() {
        let mut req = request();
        req.trades.clear();
        assert_eq!(validate_request(&req), Err(RequestError::NoTrades));
    }

    #[test]
    fn test_bad_holding_period_names_trade() {
        let mut req = request();
        req.trades.push(Trade {
            holding_period: "0m".to_string(),
            ..trade()
        });
        let err = validate_request(&req).unwrap_err();
        assert!(err.to_string().starts_with("trades[1].holding_period"));
    }

    #[test]
    fn test_empty_legs() {
        let mut req = request();
        req.trades[0].legs = Some(Vec::new());
        assert_eq!(
            validate_request(&req),
            Err(RequestError::EmptyLegs { index: 0 })
        );
    }

    #[test]
    fn test_non_positive_quantity() {
        let mut req = request();
        req.trades[0].quantity = Some(dec!(0));
        assert!(matches!(
            validate_request(&req),
            Err(RequestError::NonPositiveQuantity { index: 0, .. })
        ));
    }

    #[test]
    fn test_unordered_buy_dates() {
        let mut req = request();
        req.trades[0].buy_dates = Some(vec![date(2024, 3, 1), date(2024, 3, 1)]);
        assert!(matches!(
            validate_request(&req),
            Err(RequestError::UnorderedDates { .. })
        ));
    }

    #[test]
    fn test_exit_date_outside_window() {
        let mut req = request();
        req.trades[0].exit_dates = Some(vec![date(2024, 6, 3), date(2025, 1, 2)]);
        let err = validate_request(&req).unwrap_err();
        assert_eq!(
            err,
            RequestError::DateOutOfRange {
                field: "trades[0].exit_dates".to_string(),
                date: date(2025, 1, 2),
                start: date(2024, 1, 2),
                end: date(2024, 12, 31),
            }
        );
    }

    #[test]
    fn test_negative_nested_cost() {
        let mut req = request();
        req.transaction_cost_config = Some(TransactionCostConfig {
            trade_cost_model: Some(TransactionCostModel::Aggregate(AggregateCostModel {
                models: vec![
                    TransactionCostModel::Fixed(FixedCostModel { cost: dec!(1) }),
                    TransactionCostModel::Scaled(ScaledCostModel {
                        scaling_type: TransactionCostScalingType::Vega,
                        scaling_level: dec!(-0.1),
                    }),
                ],
                aggregate_type: CostAggregationType::Sum,
            })),
            hedge_cost_model: None,
        });
        assert_eq!(
            validate_request(&req),
            Err(RequestError::NegativeCost {
                field: "trade_cost_model.models[1].scaling_level".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_aggregate() {
        let mut req = request();
        req.transaction_cost_config = Some(TransactionCostConfig {
            trade_cost_model: None,
            hedge_cost_model: Some(TransactionCostModel::Aggregate(AggregateCostModel {
                models: Vec::new(),
                aggregate_type: CostAggregationType::Min,
            })),
        });
        assert_eq!(
            validate_request(&req),
            Err(RequestError::EmptyAggregate {
                field: "hedge_cost_model".to_string(),
            })
        );
    }

    #[test]
    fn test_apply_defaults_fills_missing() {
        let mut req = request();
        req.dates.frequency = None;
        let defaults = RequestDefaults {
            frequency: "1w".to_string(),
            holiday_calendar: Some("LDN".to_string()),
            cash_accrual: false,
        };

        apply_defaults(&mut req, &defaults);

        assert_eq!(req.dates.frequency.as_deref(), Some("1w"));
        assert_eq!(req.dates.holiday_calendar.as_deref(), Some("LDN"));
        assert_eq!(req.configuration.map(|c| c.cash_accrual), Some(false));
    }

    #[test]
    fn test_absent_frequency_validates_as_default() {
        let mut req = request();
        req.dates.frequency = None;
        assert_eq!(validate_request(&req), Ok(()));
    }

    #[test]
    fn test_apply_defaults_replaces_blank_frequency() {
        let mut req = request();
        req.dates.frequency = Some("  ".to_string());
        let defaults = RequestDefaults {
            frequency: "1m".to_string(),
            ..RequestDefaults::default()
        };

        apply_defaults(&mut req, &defaults);

        assert_eq!(req.dates.frequency.as_deref(), Some("1m"));
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let mut req = request();
        req.dates.holiday_calendar = Some("NYC".to_string());
        req.configuration = Some(Configuration {
            market_data_location: None,
            market_model: None,
            cash_accrual: true,
            roll_date_mode: None,
            combine_roll_signal_entries: true,
        });

        apply_defaults(&mut req, &RequestDefaults::default());

        assert_eq!(req.dates.frequency.as_deref(), Some("1b"));
        assert_eq!(req.dates.holiday_calendar.as_deref(), Some("NYC"));
        assert!(req.configuration.unwrap().combine_roll_signal_entries);
    }
}
