//! Defaults applied to incoming backtest requests.

use serde::{Deserialize, Serialize};

/// Request defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Evaluation frequency used when a request omits one.
    #[serde(default = "default_frequency")]
    pub frequency: String,
    /// Holiday calendar filled into requests without one.
    #[serde(default)]
    pub holiday_calendar: Option<String>,
    /// Cash accrual for requests without a configuration.
    #[serde(default = "default_true")]
    pub cash_accrual: bool,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            holiday_calendar: None,
            cash_accrual: true,
        }
    }
}

fn default_frequency() -> String {
    "1b".to_string()
}

const fn default_true() -> bool {
    true
}
