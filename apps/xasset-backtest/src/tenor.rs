//! Tenor strings such as `1b`, `3m` or `1y`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Tenor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenorUnit {
    /// Business days.
    BusinessDay,
    /// Calendar days.
    Day,
    /// Weeks.
    Week,
    /// Months.
    Month,
    /// Years.
    Year,
}

impl TenorUnit {
    const fn suffix(self) -> char {
        match self {
            Self::BusinessDay => 'b',
            Self::Day => 'd',
            Self::Week => 'w',
            Self::Month => 'm',
            Self::Year => 'y',
        }
    }
}

/// Tenor parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenorError {
    /// Empty input.
    #[error("tenor is empty")]
    Empty,
    /// No leading count.
    #[error("tenor '{0}' has no count")]
    MissingCount(String),
    /// Count too large for a `u32`.
    #[error("tenor '{0}' count is too large")]
    CountOverflow(String),
    /// Count of zero.
    #[error("tenor '{0}' has a zero count")]
    ZeroCount(String),
    /// Unrecognised unit suffix.
    #[error("tenor '{tenor}' has unknown unit '{unit}'")]
    UnknownUnit {
        /// Input tenor.
        tenor: String,
        /// Offending unit.
        unit: String,
    },
}

/// A count of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    /// Number of units, at least one.
    pub count: u32,
    /// Unit.
    pub unit: TenorUnit,
}

impl FromStr for Tenor {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tenor = s.trim();
        if tenor.is_empty() {
            return Err(TenorError::Empty);
        }

        let split = tenor
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tenor.len());
        let (digits, suffix) = tenor.split_at(split);

        if digits.is_empty() {
            return Err(TenorError::MissingCount(tenor.to_string()));
        }
        // Only overflow is left once the digits are known to be non-empty ASCII.
        let count: u32 = digits
            .parse()
            .map_err(|_| TenorError::CountOverflow(tenor.to_string()))?;
        if count == 0 {
            return Err(TenorError::ZeroCount(tenor.to_string()));
        }

        let unit = match suffix.to_ascii_lowercase().as_str() {
            "b" => TenorUnit::BusinessDay,
            "d" => TenorUnit::Day,
            "w" => TenorUnit::Week,
            "m" => TenorUnit::Month,
            "y" => TenorUnit::Year,
            _ => {
                return Err(TenorError::UnknownUnit {
                    tenor: tenor.to_string(),
                    unit: suffix.to_string(),
                });
            }
        };

        Ok(Self { count, unit })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}
