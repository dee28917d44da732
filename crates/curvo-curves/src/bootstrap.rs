//! Sequential curve bootstrap.
//!
//! Solves each market quote's discount factor in maturity order, using the
//! partial curve of already-solved knots for intermediate cash flows.

use log::debug;

use curvo_core::types::{Date, Frequency};

use crate::curve::ZeroCouponCurve;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationMethod;

/// A market quote queued for bootstrap.
#[derive(Debug, Clone)]
enum Quote {
    /// Money market deposit: simple interest, single payment.
    Deposit {
        /// Quoted rate in percent.
        rate_percent: f64,
        /// Months from the base date to maturity.
        months: u32,
    },
    /// Par swap quote.
    ParSwap {
        /// Quoted fixed rate in percent.
        rate_percent: f64,
        /// Months from the base date to maturity.
        months: u32,
        /// Fixed leg payment frequency.
        fixed_frequency: Frequency,
        /// Floating leg payment frequency.
        ///
        /// Recorded as part of the quote; the par condition itself is a
        /// fixed-leg identity (the floating leg reprices to par by
        /// construction), so only the fixed frequency enters the solve.
        floating_frequency: Frequency,
    },
}

/// Sequential bootstrapper for zero-coupon discount curves.
///
/// Quotes are added fluently, then [`calibrate`](Self::calibrate) sorts
/// them by maturity and solves each knot in closed form:
///
/// - Deposit: `DF = 1 / (1 + r * tau)` with `tau` the ACT/360 fraction.
/// - Par swap: the last payment's discount factor follows from the par
///   condition once every earlier payment is discounted off the partial
///   curve built from already-solved knots.
///
/// # Example
///
/// ```rust
/// use curvo_core::Date;
/// use curvo_curves::bootstrap::CurveBootstrapper;
///
/// let base = Date::from_ymd(2016, 4, 1).unwrap();
/// let curve = CurveBootstrapper::new(base)
///     .add_deposit(5.0, 6)
///     .add_swap(5.5, 12)
///     .add_swap(6.0, 18)
///     .calibrate()
///     .unwrap();
///
/// assert_eq!(curve.maturities().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CurveBootstrapper {
    base_date: Date,
    quotes: Vec<Quote>,
    interpolation: InterpolationMethod,
}

impl CurveBootstrapper {
    /// Creates a bootstrapper anchored at the given base date.
    #[must_use]
    pub fn new(base_date: Date) -> Self {
        Self {
            base_date,
            quotes: Vec::new(),
            interpolation: InterpolationMethod::default(),
        }
    }

    /// Sets the interpolation method of the resulting curve (and of the
    /// partial curves used while solving).
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Adds a deposit quote (`rate_percent` simple interest, maturing
    /// `months` from the base date).
    #[must_use]
    pub fn add_deposit(mut self, rate_percent: f64, months: u32) -> Self {
        self.quotes.push(Quote::Deposit {
            rate_percent,
            months,
        });
        self
    }

    /// Adds a par swap quote with semi-annual legs.
    #[must_use]
    pub fn add_swap(self, rate_percent: f64, months: u32) -> Self {
        self.add_swap_with_frequencies(
            rate_percent,
            months,
            Frequency::SemiAnnual,
            Frequency::SemiAnnual,
        )
    }

    /// Adds a par swap quote with explicit leg frequencies.
    #[must_use]
    pub fn add_swap_with_frequencies(
        mut self,
        rate_percent: f64,
        months: u32,
        fixed_frequency: Frequency,
        floating_frequency: Frequency,
    ) -> Self {
        self.quotes.push(Quote::ParSwap {
            rate_percent,
            months,
            fixed_frequency,
            floating_frequency,
        });
        self
    }

    /// Bootstraps the curve from the queued quotes.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` when no quotes were added
    /// - `MathError` when a quote implies a non-positive discount factor
    /// - Date arithmetic failures surface as `Core` errors
    pub fn calibrate(self) -> CurveResult<ZeroCouponCurve> {
        if self.quotes.is_empty() {
            return Err(CurveError::empty_input("bootstrap"));
        }

        // Pair each quote with its ACT/360 maturity fraction, then solve in
        // maturity order. The sort is stable: equal maturities keep their
        // insertion order.
        let mut dated: Vec<(f64, Quote)> = self
            .quotes
            .iter()
            .map(|quote| {
                let months = match quote {
                    Quote::Deposit { months, .. } | Quote::ParSwap { months, .. } => *months,
                };
                let maturity_date = self.base_date.add_months(months as i32)?;
                let tau = ZeroCouponCurve::year_fraction(self.base_date, maturity_date);
                Ok((tau, quote.clone()))
            })
            .collect::<CurveResult<_>>()?;
        dated.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut taus: Vec<f64> = Vec::with_capacity(dated.len());
        let mut zeros_percent: Vec<f64> = Vec::with_capacity(dated.len());

        for (tau, quote) in dated {
            let df = match &quote {
                Quote::Deposit { rate_percent, .. } => {
                    1.0 / (1.0 + rate_percent / 100.0 * tau)
                }
                Quote::ParSwap {
                    rate_percent,
                    months,
                    fixed_frequency,
                    floating_frequency,
                } => {
                    debug!(
                        "solving par swap: {rate_percent}% {months}m fixed={fixed_frequency} floating={floating_frequency}"
                    );
                    self.solve_par_swap(
                        rate_percent / 100.0,
                        *months,
                        *fixed_frequency,
                        &taus,
                        &zeros_percent,
                    )?
                }
            };

            if df <= 0.0 || !df.is_finite() {
                return Err(CurveError::math_error(format!(
                    "quote at {tau:.4}y implies discount factor {df}"
                )));
            }

            let zero_percent = -df.ln() / tau * 100.0;
            debug!("bootstrapped knot: t={tau:.4}y df={df:.6} zero={zero_percent:.4}%");

            taus.push(tau);
            zeros_percent.push(zero_percent);
        }

        ZeroCouponCurve::from_zero_rates(&zeros_percent, &taus, self.interpolation)
    }

    /// Solves the maturity discount factor of a par swap.
    ///
    /// With fixed rate `s`, per-period fraction `dt = 1 / frequency`, and
    /// payment tenors `t_1 .. t_n`:
    ///
    /// ```text
    /// DF(t_n) = (1 - s * dt * sum_{i<n} DF(t_i)) / (1 + s * dt)
    /// ```
    ///
    /// Intermediate discount factors come from the partial curve of solved
    /// knots; before any knot exists the partial curve is flat at the
    /// swap's own quote.
    fn solve_par_swap(
        &self,
        fixed_rate: f64,
        months: u32,
        frequency: Frequency,
        solved_taus: &[f64],
        solved_zeros_percent: &[f64],
    ) -> CurveResult<f64> {
        let dt = frequency.period_year_fraction();
        let step = frequency.months_per_period();
        let count = months.div_ceil(step).max(1);

        let partial = if solved_taus.is_empty() {
            None
        } else {
            Some(ZeroCouponCurve::from_zero_rates(
                solved_zeros_percent,
                solved_taus,
                self.interpolation,
            )?)
        };

        let mut annuity = 0.0;
        for k in 1..count {
            let pay_date = self.base_date.add_months((k * step) as i32)?;
            let t = ZeroCouponCurve::year_fraction(self.base_date, pay_date);
            let df = match &partial {
                Some(curve) => curve.discount_factor(t),
                // Flat at the quote itself until the first knot is solved
                None => (-fixed_rate * t).exp(),
            };
            annuity += df;
        }

        Ok((1.0 - fixed_rate * dt * annuity) / (1.0 + fixed_rate * dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> Date {
        Date::from_ymd(2016, 4, 1).unwrap()
    }

    #[test]
    fn test_empty_bootstrap_errors() {
        let err = CurveBootstrapper::new(base()).calibrate().unwrap_err();
        assert!(matches!(err, CurveError::EmptyInput { .. }));
    }

    #[test]
    fn test_single_deposit() {
        let curve = CurveBootstrapper::new(base())
            .add_deposit(5.0, 6)
            .calibrate()
            .unwrap();

        // 2016-04-01 to 2016-10-01 is 183 days under ACT/360
        let tau = 183.0 / 360.0;
        assert_relative_eq!(curve.maturities()[0], tau, epsilon = 1e-12);
        assert_relative_eq!(
            curve.discount_factor(tau),
            1.0 / (1.0 + 0.05 * tau),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_quotes_sorted_by_maturity() {
        // Insertion order deliberately scrambled
        let curve = CurveBootstrapper::new(base())
            .add_swap(6.0, 18)
            .add_deposit(5.0, 6)
            .add_swap(5.5, 12)
            .calibrate()
            .unwrap();

        let maturities = curve.maturities();
        assert_eq!(maturities.len(), 3);
        assert!(maturities.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_one_period_swap_matches_deposit_shape() {
        // A 6m semi-annual swap has a single payment: DF = 1 / (1 + s*dt)
        let curve = CurveBootstrapper::new(base())
            .add_swap(5.0, 6)
            .calibrate()
            .unwrap();

        let tau = curve.maturities()[0];
        assert_relative_eq!(
            curve.discount_factor(tau),
            1.0 / (1.0 + 0.05 * 0.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_upward_quotes_give_decreasing_dfs() {
        let curve = CurveBootstrapper::new(base())
            .add_deposit(5.0, 6)
            .add_swap(5.5, 12)
            .add_swap(6.0, 18)
            .add_swap(6.4, 24)
            .calibrate()
            .unwrap();

        let dfs = curve.discount_factors();
        assert!(dfs.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_interpolation_method_carries_to_curve() {
        let curve = CurveBootstrapper::new(base())
            .add_deposit(5.0, 6)
            .add_swap(5.5, 12)
            .with_interpolation(InterpolationMethod::LogLinearRate)
            .calibrate()
            .unwrap();

        assert_eq!(
            curve.interpolation_method(),
            InterpolationMethod::LogLinearRate
        );
    }
}
