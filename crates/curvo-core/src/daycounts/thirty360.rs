//! 30/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 day count convention (Bond Basis).
///
/// Treats every month as 30 days on a 360-day year. The start day
/// contributes at most 30 days of its month and the end day is capped
/// at 30, so a full calendar year always counts as 360 days.
///
/// # Usage
///
/// - Coupon bonds
/// - Fixed legs of interest rate swaps
///
/// # Formula
///
/// $$\text{Days} = 360(Y_2 - Y_1) + 30(M_2 - M_1 - 1) + \max(0, 30 - D_1) + \min(30, D_2)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = self.day_count(start, end);
        Decimal::from(days) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        // Count on the ordered pair, carry the sign for inverted dates
        if end < start {
            return -self.day_count(end, start);
        }

        let years = i64::from(end.year() - start.year());
        let months = i64::from(end.month()) - i64::from(start.month());
        let d1 = i64::from(start.day());
        let d2 = i64::from(end.day());

        360 * years + 30 * (months - 1) + (30 - d1).max(0) + d2.min(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty360_full_year() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 360);
        assert_eq!(dc.year_fraction(start, end), dec!(1));
    }

    #[test]
    fn test_thirty360_half_year() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert_eq!(dc.day_count(start, end), 180);
        assert_eq!(dc.year_fraction(start, end), dec!(0.5));
    }

    #[test]
    fn test_thirty360_same_day() {
        let dc = Thirty360;
        let date = Date::from_ymd(2025, 6, 15).unwrap();

        assert_eq!(dc.day_count(date, date), 0);
        assert_eq!(dc.year_fraction(date, date), dec!(0));
    }

    #[test]
    fn test_thirty360_start_day_31() {
        let dc = Thirty360;

        // Start on the 31st contributes 0 days from its month
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 1).unwrap();

        // 30*(3-1-1) + max(0, 30-31) + min(30, 1) = 30 + 0 + 1 = 31
        assert_eq!(dc.day_count(start, end), 31);
    }

    #[test]
    fn test_thirty360_end_day_31_capped() {
        let dc = Thirty360;

        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();

        // 30*(3-1-1) + (30-15) + min(30, 31) = 30 + 15 + 30 = 75
        assert_eq!(dc.day_count(start, end), 75);
    }

    #[test]
    fn test_thirty360_february() {
        let dc = Thirty360;

        // Feb 28 (non-leap) to Mar 31: (30-28) + min(30,31) = 32
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_eq!(dc.day_count(start, end), 32);
    }

    #[test]
    fn test_thirty360_cross_year() {
        let dc = Thirty360;

        let start = Date::from_ymd(2024, 11, 15).unwrap();
        let end = Date::from_ymd(2025, 5, 15).unwrap();

        // 360 + 30*(5-11-1) + (30-15) + 15 = 360 - 210 + 30 = 180
        assert_eq!(dc.day_count(start, end), 180);
    }

    #[test]
    fn test_thirty360_inverted_dates() {
        let dc = Thirty360;

        let start = Date::from_ymd(2025, 6, 15).unwrap();
        let end = Date::from_ymd(2025, 3, 15).unwrap();

        assert_eq!(dc.day_count(start, end), -90);
        assert_eq!(dc.year_fraction(start, end), dec!(-0.25));
    }
}
