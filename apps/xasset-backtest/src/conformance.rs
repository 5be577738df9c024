//! Conformance check for backtest datatypes.
//!
//! Asserts that a fixed list of types were declared as plain data records.
//! The check reads declaration-time [`TypeInfo`] only: no values are built
//! and no fields are touched, so running it twice gives the same report.

use serde::Serialize;
use thiserror::Error;

use crate::models::record::{
    Described, PlainDataRecord, RecordViolation, TypeInfo, record_violation,
};
use crate::models::{
    AdditionalResults, AggregateCostModel, BasicBacktestRequest, BasicBacktestResponse,
    Configuration, DateConfig, FixedCostModel, Instrument, ScaledCostModel, Trade, Transaction,
    TransactionCostConfig,
};

/// A type that failed the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceFailure {
    /// Name of the offending type.
    pub type_name: &'static str,
    /// What disqualified it.
    pub violation: RecordViolation,
}

impl std::fmt::Display for ConformanceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.type_name, self.violation)
    }
}

/// Conformance check errors.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// One or more types are not plain data records.
    #[error("not plain data records: {}", format_failures(.failures))]
    NotPlainDataRecord {
        /// Every failing type, in check order.
        failures: Vec<ConformanceFailure>,
    },

    /// Nothing was registered to check.
    #[error("no types registered for conformance check")]
    Empty,
}

impl ConformanceError {
    /// Names of the failing types.
    #[must_use]
    pub fn failing_types(&self) -> Vec<&'static str> {
        match self {
            Self::NotPlainDataRecord { failures } => failures.iter().map(|f| f.type_name).collect(),
            Self::Empty => Vec::new(),
        }
    }
}

fn format_failures(failures: &[ConformanceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a passing check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    /// Types checked, in check order.
    pub checked: Vec<&'static str>,
}

/// Checks a closed list of types against the plain data record predicate.
#[derive(Debug, Clone, Default)]
pub struct ConformanceChecker {
    types: Vec<TypeInfo>,
}

impl ConformanceChecker {
    /// Create an empty checker.
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// The backtest response datatypes.
    #[must_use]
    pub fn response_datatypes() -> Self {
        Self::new()
            .with_record::<Transaction>()
            .with_record::<AdditionalResults>()
            .with_record::<DateConfig>()
            .with_record::<Trade>()
            .with_record::<TransactionCostConfig>()
            .with_record::<Configuration>()
    }

    /// Every struct datatype, including envelopes and cost model variants.
    #[must_use]
    pub fn all_datatypes() -> Self {
        Self::response_datatypes()
            .with_record::<Instrument>()
            .with_record::<FixedCostModel>()
            .with_record::<ScaledCostModel>()
            .with_record::<AggregateCostModel>()
            .with_record::<BasicBacktestRequest>()
            .with_record::<BasicBacktestResponse>()
    }

    /// Add a type declared with [`plain_data_record!`](crate::plain_data_record).
    ///
    /// The bound rejects anything else at compile time; the runtime check
    /// still inspects its metadata.
    #[must_use]
    pub fn with_record<T: PlainDataRecord>(self) -> Self {
        self.with_type::<T>()
    }

    /// Add any described type to the list.
    #[must_use]
    pub fn with_type<T: Described>(self) -> Self {
        self.with_info(T::TYPE_INFO)
    }

    /// Add raw type metadata to the list.
    #[must_use]
    pub fn with_info(mut self, info: TypeInfo) -> Self {
        self.types.push(info);
        self
    }

    /// Names of the registered types.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.name).collect()
    }

    /// Run the check.
    ///
    /// Every type is inspected before reporting, so the error lists all
    /// offenders rather than the first one.
    pub fn check(&self) -> Result<ConformanceReport, ConformanceError> {
        if self.types.is_empty() {
            return Err(ConformanceError::Empty);
        }

        let mut failures = Vec::new();
        for info in &self.types {
            match record_violation(info) {
                None => {
                    tracing::debug!(type_name = info.name, fields = ?info.field_names(), "plain data record");
                }
                Some(violation) => {
                    tracing::warn!(type_name = info.name, %violation, "not a plain data record");
                    failures.push(ConformanceFailure {
                        type_name: info.name,
                        violation,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(ConformanceReport {
                checked: self.type_names(),
            })
        } else {
            Err(ConformanceError::NotPlainDataRecord { failures })
        }
    }
}
