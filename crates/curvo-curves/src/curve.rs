//! Zero-coupon discount curve.

use curvo_core::daycounts::{Act360, DayCount, DayCountConvention};
use curvo_core::types::{Date, Frequency};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{CurveError, CurveResult};
use crate::interpolation::{lerp, InterpolationMethod};

/// A zero-coupon discount curve.
///
/// The curve is defined by a set of knots, each carrying a maturity (in
/// years), a continuously compounded zero rate (in percent), and the
/// implied discount factor `DF = exp(-rate/100 * t)`.
///
/// Curves are immutable once constructed. Recalibration produces a new
/// curve instance; instrument descriptions rebind to it via
/// [`with_curve`](crate::instruments::InstrumentDescription::with_curve).
/// This makes sharing through `Arc` safe without interior mutability.
///
/// # Queries
///
/// Discount factors at interior tenors are interpolated between the
/// bracketing knots according to the curve's [`InterpolationMethod`];
/// outside the knot range the nearest knot's value is used flat (the curve
/// never extrapolates).
///
/// # Example
///
/// ```rust
/// use curvo_curves::curve::ZeroCouponCurve;
/// use curvo_curves::interpolation::InterpolationMethod;
///
/// let curve = ZeroCouponCurve::from_zero_rates(
///     &[5.0, 5.5, 6.0],
///     &[0.5, 1.0, 2.0],
///     InterpolationMethod::LinearDiscount,
/// )
/// .unwrap();
///
/// let df = curve.discount_factor(1.5);
/// assert!(df > 0.0 && df < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroCouponCurve {
    /// Knot maturities in years, strictly increasing.
    maturities: Vec<f64>,
    /// Continuously compounded zero rates at the knots, in percent.
    zero_rates_percent: Vec<f64>,
    /// Discount factors implied by the knot rates.
    discount_factors: Vec<f64>,
    /// Interpolation policy between knots.
    method: InterpolationMethod,
}

impl ZeroCouponCurve {
    /// Builds a curve from continuous zero rates (in percent) and maturities
    /// (in years).
    ///
    /// Each knot's discount factor is `exp(-rate/100 * t)`.
    ///
    /// # Errors
    ///
    /// - `InsufficientPoints` if no knots are given
    /// - `Validation` if the slices have different lengths
    /// - `NonMonotonicTenors` if maturities are not strictly increasing
    /// - `InvalidValue` for non-finite rates or non-positive maturities
    pub fn from_zero_rates(
        rates_percent: &[f64],
        maturities: &[f64],
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        if maturities.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        if rates_percent.len() != maturities.len() {
            return Err(CurveError::validation(format!(
                "rates and maturities length mismatch: {} vs {}",
                rates_percent.len(),
                maturities.len()
            )));
        }

        for (i, (&t, &r)) in maturities.iter().zip(rates_percent).enumerate() {
            if !t.is_finite() || t <= 0.0 {
                return Err(CurveError::invalid_value(format!(
                    "maturity at index {i} must be finite and positive, got {t}"
                )));
            }
            if !r.is_finite() {
                return Err(CurveError::invalid_value(format!(
                    "zero rate at index {i} is not finite"
                )));
            }
            if i > 0 && maturities[i - 1] >= t {
                return Err(CurveError::non_monotonic_tenors(i, maturities[i - 1], t));
            }
        }

        let discount_factors = rates_percent
            .iter()
            .zip(maturities)
            .map(|(&r, &t)| (-r / 100.0 * t).exp())
            .collect();

        Ok(Self {
            maturities: maturities.to_vec(),
            zero_rates_percent: rates_percent.to_vec(),
            discount_factors,
            method,
        })
    }

    /// Builds a curve from knot dates instead of year fractions.
    ///
    /// Maturities are derived from `issue_date` with the given day count
    /// convention, then construction proceeds as
    /// [`from_zero_rates`](Self::from_zero_rates).
    ///
    /// # Errors
    ///
    /// Same as [`from_zero_rates`](Self::from_zero_rates); dates on or
    /// before `issue_date` surface as invalid maturities.
    pub fn from_dates(
        issue_date: Date,
        rates_percent: &[f64],
        dates: &[Date],
        convention: DayCountConvention,
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        let dc = convention.to_day_count();
        let maturities: Vec<f64> = dates
            .iter()
            .map(|&d| dc.year_fraction(issue_date, d).to_f64().unwrap_or(f64::NAN))
            .collect();

        Self::from_zero_rates(rates_percent, &maturities, method)
    }

    /// Returns the discount factor at tenor `t` (in years).
    ///
    /// Interior tenors interpolate between the bracketing knots; tenors
    /// outside the knot range clamp flat to the nearest knot.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        let first = self.maturities[0];
        let last = *self.maturities.last().unwrap_or(&first);

        if t <= first {
            return self.discount_factors[0];
        }
        if t >= last {
            return *self.discount_factors.last().unwrap_or(&1.0);
        }

        // partition_point gives the first knot with maturity > t
        let hi = self.maturities.partition_point(|&m| m <= t);
        let lo = hi - 1;

        match self.method {
            InterpolationMethod::LinearDiscount => lerp(
                t,
                self.maturities[lo],
                self.discount_factors[lo],
                self.maturities[hi],
                self.discount_factors[hi],
            ),
            InterpolationMethod::LogLinearRate => {
                let rate = lerp(
                    t,
                    self.maturities[lo],
                    self.zero_rates_percent[lo],
                    self.maturities[hi],
                    self.zero_rates_percent[hi],
                );
                (-rate / 100.0 * t).exp()
            }
        }
    }

    /// Returns the continuously compounded zero rate (decimal) at tenor `t`.
    ///
    /// At or before the first knot this is the first knot's rate; elsewhere
    /// it is implied from the interpolated discount factor as `-ln(DF)/t`.
    #[must_use]
    pub fn zero_rate(&self, t: f64) -> f64 {
        if t <= self.maturities[0] {
            return self.zero_rates_percent[0] / 100.0;
        }
        -self.discount_factor(t).ln() / t
    }

    /// Returns the periodically compounded spot rate (decimal) at tenor `t`.
    ///
    /// Converts the continuous zero rate to the effective rate for the given
    /// compounding frequency.
    #[must_use]
    pub fn spot_rate(&self, t: f64, frequency: Frequency) -> f64 {
        Self::continuous_to_effective(self.zero_rate(t), frequency)
    }

    /// Returns the continuous forward rate (decimal) between tenors `a`
    /// and `b`.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if `a >= b`
    /// - `TenorOutOfRange` if `b` lies beyond the last knot
    pub fn forward_rate(&self, a: f64, b: f64) -> CurveResult<f64> {
        if a >= b {
            return Err(CurveError::invalid_value(format!(
                "forward rate requires a < b, got a={a}, b={b}"
            )));
        }
        let last = self.last_maturity();
        if b > last {
            return Err(CurveError::tenor_out_of_range(b, 0.0, last));
        }

        let df_a = self.discount_factor(a);
        let df_b = self.discount_factor(b);
        Ok(-(df_b / df_a).ln() / (b - a))
    }

    /// Converts a continuous rate to the effective rate for a compounding
    /// frequency: `n * (exp(r/n) - 1)`.
    #[must_use]
    pub fn continuous_to_effective(rate: f64, frequency: Frequency) -> f64 {
        let n = f64::from(frequency.periods_per_year());
        n * ((rate / n).exp() - 1.0)
    }

    /// Returns the ACT/360 year fraction between two dates.
    #[must_use]
    pub fn year_fraction(from: Date, to: Date) -> f64 {
        Act360.year_fraction(from, to).to_f64().unwrap_or(0.0)
    }

    /// Returns the knot maturities in years.
    #[must_use]
    pub fn maturities(&self) -> &[f64] {
        &self.maturities
    }

    /// Returns the knot discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Returns the knot zero rates in percent.
    #[must_use]
    pub fn zero_rates_percent(&self) -> &[f64] {
        &self.zero_rates_percent
    }

    /// Returns the first knot maturity.
    #[must_use]
    pub fn first_maturity(&self) -> f64 {
        self.maturities[0]
    }

    /// Returns the last knot maturity.
    #[must_use]
    pub fn last_maturity(&self) -> f64 {
        *self.maturities.last().unwrap_or(&0.0)
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn interpolation_method(&self) -> InterpolationMethod {
        self.method
    }
}
