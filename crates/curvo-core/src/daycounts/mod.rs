//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how accrued interest and discount
//! periods are measured by specifying how to count days between two dates
//! and the year basis.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - Money market convention
//! - [`Thirty360`]: 30/360 Bond Basis - coupon bond convention
//!
//! # Usage
//!
//! ```rust
//! use curvo_core::daycounts::{Act360, DayCount};
//! use curvo_core::types::Date;
//!
//! let dc = Act360;
//! let start = Date::from_ymd(2016, 4, 1).unwrap();
//! let end = Date::from_ymd(2016, 10, 1).unwrap();
//!
//! let days = dc.day_count(start, end);
//! let year_fraction = dc.year_fraction(start, end);
//! ```

mod act360;
mod thirty360;

pub use act360::Act360;
pub use thirty360::Thirty360;

use crate::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Both are signed: inverted date order yields a negative result
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; for 30/360
    /// conventions it uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Provides a convenient way to select a convention at runtime, e.g. when
/// an instrument quote carries the convention as data.
///
/// # Example
///
/// ```rust
/// use curvo_core::daycounts::{DayCount, DayCountConvention};
/// use curvo_core::types::Date;
///
/// let convention = DayCountConvention::Act360;
/// let dc = convention.to_day_count();
///
/// let start = Date::from_ymd(2016, 4, 1).unwrap();
/// let end = Date::from_ymd(2016, 10, 1).unwrap();
/// let yf = dc.year_fraction(start, end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - Money market instruments, floating legs
    #[default]
    Act360,

    /// 30/360 Bond Basis - coupon bonds, fixed swap legs
    Thirty360,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Thirty360 => Box::new(Thirty360),
        }
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[DayCountConvention::Act360, DayCountConvention::Thirty360]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts market-style names ("ACT/360", "30/360") and enum-style
    /// names ("Act360", "Thirty360"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        let normalized = normalized.trim();

        match normalized {
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "30/360" | "30/360 BOND" | "BOND" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_act360() {
        let dc = Act360;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 181);
        let yf = dc.year_fraction(start, end);
        assert!(yf > dec!(0.5));
    }

    #[test]
    fn test_thirty360() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 360);
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_convention_enum() {
        for convention in DayCountConvention::all() {
            let dc = convention.to_day_count();
            assert!(!dc.name().is_empty());

            let start = Date::from_ymd(2025, 1, 1).unwrap();
            let end = Date::from_ymd(2025, 7, 1).unwrap();
            let yf = dc.year_fraction(start, end);

            // Both conventions give roughly half a year here
            assert!(yf > dec!(0.4) && yf < dec!(0.6));
        }
    }

    #[test]
    fn test_convention_display() {
        assert_eq!(format!("{}", DayCountConvention::Act360), "ACT/360");
        assert_eq!(format!("{}", DayCountConvention::Thirty360), "30/360");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ACT/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "act360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert!("INVALID".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }
}
