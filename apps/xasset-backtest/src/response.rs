//! Decoding and summarising backtest responses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{BasicBacktestResponse, TransactionDirection};

/// Response handling errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Body is not a valid response document.
    #[error("Failed to decode backtest response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transaction costs sum past the `Decimal` range.
    #[error("total transaction cost overflowed at {date}")]
    CostOverflow {
        /// Date of the transaction that overflowed the total.
        date: NaiveDate,
    },
}

/// Headline figures of a backtest response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    /// Earliest date with a portfolio, transaction or risk value.
    pub first_date: Option<NaiveDate>,
    /// Latest such date.
    pub last_date: Option<NaiveDate>,
    /// Total transactions.
    pub transaction_count: usize,
    /// Entry transactions.
    pub entries: usize,
    /// Exit transactions.
    pub exits: usize,
    /// Sum of transaction costs; missing costs count as zero.
    pub total_cost: Decimal,
    /// Dates carrying a hedge portfolio.
    pub hedge_count: usize,
    /// Pricing calculations reported by the service.
    pub no_of_calculations: Option<u64>,
}

/// Decode a response body.
pub fn decode_response(body: &str) -> Result<BasicBacktestResponse, ResponseError> {
    let response: BasicBacktestResponse = serde_json::from_str(body)?;
    tracing::debug!(
        portfolio_dates = response.portfolio.len(),
        transaction_dates = response.transactions.len(),
        measures = response.risks.len(),
        "backtest response decoded"
    );
    Ok(response)
}

/// Summarise a decoded response.
pub fn summarize(response: &BasicBacktestResponse) -> Result<ResponseSummary, ResponseError> {
    let dates: Vec<NaiveDate> = response
        .portfolio
        .keys()
        .chain(response.transactions.keys())
        .chain(response.risks.values().flat_map(|series| series.keys()))
        .copied()
        .collect();
    let first_date = dates.iter().min().copied();
    let last_date = dates.iter().max().copied();

    let transactions = response
        .transactions
        .iter()
        .flat_map(|(date, txs)| txs.iter().map(move |tx| (*date, tx)));
    let mut summary = ResponseSummary {
        first_date,
        last_date,
        transaction_count: 0,
        entries: 0,
        exits: 0,
        total_cost: Decimal::ZERO,
        hedge_count: 0,
        no_of_calculations: None,
    };

    for (date, transaction) in transactions {
        summary.transaction_count += 1;
        match transaction.direction {
            Some(TransactionDirection::Entry) => summary.entries += 1,
            Some(TransactionDirection::Exit) => summary.exits += 1,
            None => {}
        }
        summary.total_cost = summary
            .total_cost
            .checked_add(transaction.cost.unwrap_or(Decimal::ZERO))
            .ok_or(ResponseError::CostOverflow { date })?;
    }

    if let Some(additional) = &response.additional_results {
        summary.hedge_count = additional.hedges.as_ref().map_or(0, |h| h.len());
        summary.no_of_calculations = additional.no_of_calculations;
    }

    tracing::info!(
        transactions = summary.transaction_count,
        entries = summary.entries,
        exits = summary.exits,
        total_cost = %summary.total_cost,
        "backtest response summarised"
    );
    Ok(summary)
}
