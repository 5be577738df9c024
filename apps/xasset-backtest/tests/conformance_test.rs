//! Integration tests for the datatype conformance check.

use xasset_backtest::conformance::{ConformanceChecker, ConformanceError};
use xasset_backtest::models::record::{Described, FieldInfo, TypeInfo, TypeKind};
use xasset_backtest::models::{
    AdditionalResults, Configuration, DateConfig, Trade, Transaction, TransactionCostConfig,
};
use xasset_backtest::{is_plain_data_record, plain_data_record};

#[test]
fn response_datatypes_are_plain_data_records() {
    let types = [
        Transaction::TYPE_INFO,
        AdditionalResults::TYPE_INFO,
        DateConfig::TYPE_INFO,
        Trade::TYPE_INFO,
        TransactionCostConfig::TYPE_INFO,
        Configuration::TYPE_INFO,
    ];
    for info in &types {
        assert!(is_plain_data_record(info), "{} is not a plain data record", info.name);
    }

    ConformanceChecker::response_datatypes().check().unwrap();
}

/// A `Trade` lookalike with the same fields but hand-written behaviour.
#[allow(dead_code)]
struct HandWrittenTrade {
    legs: Option<Vec<String>>,
    buy_frequency: String,
    holding_period: String,
    cached_schedule: std::cell::RefCell<Vec<String>>,
}

impl Described for HandWrittenTrade {
    const TYPE_INFO: TypeInfo = TypeInfo {
        name: "Trade",
        kind: TypeKind::Opaque,
        fields: &[
            FieldInfo { name: "legs", type_name: "Option<Vec<String>>" },
            FieldInfo { name: "buy_frequency", type_name: "String" },
            FieldInfo { name: "holding_period", type_name: "String" },
        ],
    };
}

#[test]
fn non_record_trade_is_identified() {
    let err = ConformanceChecker::new()
        .with_type::<Transaction>()
        .with_type::<AdditionalResults>()
        .with_type::<DateConfig>()
        .with_type::<HandWrittenTrade>()
        .with_type::<TransactionCostConfig>()
        .with_type::<Configuration>()
        .check()
        .unwrap_err();

    assert_eq!(err.failing_types(), vec!["Trade"]);
    assert!(err.to_string().contains("Trade declared as opaque"));
}

plain_data_record! {
    /// Record declared outside the crate.
    pub struct Fill {
        /// Fill price.
        pub price: rust_decimal::Decimal,
        /// Venue.
        #[serde(default)]
        pub venue: Option<String>,
    }
}

#[test]
fn records_declared_downstream_pass() {
    let report = ConformanceChecker::new().with_record::<Fill>().check().unwrap();
    assert_eq!(report.checked, vec!["Fill"]);

    let fill: Fill = serde_json::from_str(r#"{"price": "101.25"}"#).unwrap();
    assert_eq!(fill.venue, None);
}

#[test]
fn every_failure_is_reported() {
    const LEDGER: TypeInfo = TypeInfo {
        name: "Ledger",
        kind: TypeKind::Opaque,
        fields: &[],
    };

    let err = ConformanceChecker::new()
        .with_type::<HandWrittenTrade>()
        .with_type::<Fill>()
        .with_info(LEDGER)
        .check()
        .unwrap_err();

    let ConformanceError::NotPlainDataRecord { failures } = &err else {
        panic!("expected record failures, got {err:?}");
    };
    assert_eq!(failures.len(), 2);
    assert_eq!(err.failing_types(), vec!["Trade", "Ledger"]);
}

#[test]
fn repeated_checks_agree() {
    let checker = ConformanceChecker::response_datatypes();
    let first = checker.check().unwrap();
    let second = checker.check().unwrap();
    assert_eq!(first, second);
}
