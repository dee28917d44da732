//! Fixed-coupon bond pricer.

use log::warn;

use super::{Instrument, InstrumentDescription, InstrumentKind, InstrumentKindTag};
use crate::error::{CurveError, CurveResult};

/// Iteration cap for the yield solver.
const YTM_MAX_ITERATIONS: usize = 100;
/// Price tolerance for the yield solver.
const YTM_TOLERANCE: f64 = 1e-10;

/// Result of a yield to maturity solve.
///
/// Non-convergence is reported, not raised: the best estimate found is
/// returned with `converged = false`.
#[derive(Debug, Clone, Copy)]
pub struct YieldResult {
    /// Continuously compounded yield (decimal).
    pub yield_rate: f64,
    /// Iterations used by the solver.
    pub iterations: usize,
    /// Whether the solver met the price tolerance.
    pub converged: bool,
}

/// Pricer for a fixed-coupon bond.
///
/// The present value discounts each coupon `coupon_rate / frequency *
/// notional` at its payment time, plus the notional at maturity:
///
/// ```text
/// PV = sum_i c * DF(t_i) + N * DF(T)
/// ```
#[derive(Debug, Clone)]
pub struct Bond {
    description: InstrumentDescription,
}

impl Bond {
    /// Builds a bond pricer from a validated description.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Validation` if the description is not a bond or
    /// fails term validation.
    pub fn new(description: &InstrumentDescription) -> CurveResult<Self> {
        description.validate()?;
        if !matches!(description.kind, InstrumentKind::Bond { .. }) {
            return Err(CurveError::validation(format!(
                "expected a Bond description, got {}",
                description.kind.tag()
            )));
        }
        Ok(Self {
            description: description.clone(),
        })
    }

    fn coupon_amount(&self) -> f64 {
        match &self.description.kind {
            InstrumentKind::Bond {
                coupon_rate,
                frequency,
                ..
            } => coupon_rate / f64::from(frequency.periods_per_year()) * self.description.notional,
            _ => unreachable!("constructor enforces the Bond kind"),
        }
    }

    fn coupon_times(&self) -> &[f64] {
        match &self.description.kind {
            InstrumentKind::Bond { coupon_times, .. } => coupon_times,
            _ => unreachable!("constructor enforces the Bond kind"),
        }
    }

    /// Present value of the bond's cash flows at a flat continuous yield.
    fn price_at_yield(&self, yield_rate: f64) -> f64 {
        let coupon = self.coupon_amount();
        let mut pv = 0.0;
        for &t in self.coupon_times() {
            pv += coupon * (-yield_rate * t).exp();
        }
        pv + self.description.notional * (-yield_rate * self.description.maturity).exp()
    }

    /// Solves for the continuous yield that reprices the bond to
    /// `market_price`, via Newton-Raphson.
    ///
    /// A flat derivative or the iteration cap ends the solve with the best
    /// estimate found and `converged = false`.
    #[must_use]
    pub fn yield_to_maturity(&self, market_price: f64) -> YieldResult {
        let coupon = self.coupon_amount();
        let notional = self.description.notional;
        let maturity = self.description.maturity;

        let mut y = 0.05;
        for iteration in 0..YTM_MAX_ITERATIONS {
            let residual = self.price_at_yield(y) - market_price;
            if residual.abs() < YTM_TOLERANCE {
                return YieldResult {
                    yield_rate: y,
                    iterations: iteration,
                    converged: true,
                };
            }

            let mut derivative = -maturity * notional * (-y * maturity).exp();
            for &t in self.coupon_times() {
                derivative -= t * coupon * (-y * t).exp();
            }

            if derivative.abs() < f64::EPSILON {
                warn!("yield solve stalled on a flat derivative at y={y:.6}");
                return YieldResult {
                    yield_rate: y,
                    iterations: iteration,
                    converged: false,
                };
            }

            y -= residual / derivative;
        }

        warn!("yield solve hit the iteration cap at y={y:.6}");
        YieldResult {
            yield_rate: y,
            iterations: YTM_MAX_ITERATIONS,
            converged: false,
        }
    }
}

impl Instrument for Bond {
    fn price(&self) -> CurveResult<f64> {
        let coupon = self.coupon_amount();
        let curve = &self.description.curve;

        let mut pv = 0.0;
        for &t in self.coupon_times() {
            pv += coupon * curve.discount_factor(t);
        }
        pv += self.description.notional * curve.discount_factor(self.description.maturity);

        Ok(pv)
    }

    fn kind(&self) -> InstrumentKindTag {
        InstrumentKindTag::Bond
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::test_support::{base_date, flat_curve};
    use approx::assert_relative_eq;
    use curvo_core::Frequency;

    fn bond_description() -> InstrumentDescription {
        InstrumentDescription::new(
            InstrumentKind::Bond {
                coupon_rate: 0.06,
                frequency: Frequency::SemiAnnual,
                coupon_times: vec![0.5, 1.0, 1.5, 2.0],
            },
            100.0,
            2.0,
            base_date(),
            flat_curve(5.0),
        )
    }

    #[test]
    fn test_bond_price_sums_discounted_cash_flows() {
        let desc = bond_description();
        let bond = Bond::new(&desc).unwrap();

        // 3.0 per semi-annual coupon on a 100 notional
        let mut expected = 0.0;
        for &t in &[0.5, 1.0, 1.5, 2.0] {
            expected += 3.0 * desc.curve.discount_factor(t);
        }
        expected += 100.0 * desc.curve.discount_factor(2.0);

        assert_relative_eq!(bond.price().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_bond_above_par_when_coupon_beats_curve() {
        // 6% coupon on a flat 5% curve prices above par
        let bond = Bond::new(&bond_description()).unwrap();
        assert!(bond.price().unwrap() > 100.0);
    }

    #[test]
    fn test_yield_to_maturity_recovers_pricing_yield() {
        let bond = Bond::new(&bond_description()).unwrap();

        // Price at a known flat yield, then solve it back
        let target_yield = 0.055;
        let price = bond.price_at_yield(target_yield);

        let result = bond.yield_to_maturity(price);
        assert!(result.converged);
        assert_relative_eq!(result.yield_rate, target_yield, epsilon = 1e-8);
    }

    #[test]
    fn test_yield_to_maturity_par_bond() {
        let bond = Bond::new(&bond_description()).unwrap();
        let result = bond.yield_to_maturity(bond.price_at_yield(0.05));

        assert!(result.converged);
        assert!(result.iterations < 20);
        assert_relative_eq!(result.yield_rate, 0.05, epsilon = 1e-8);
    }

    #[test]
    fn test_bond_rejects_wrong_kind() {
        let mut desc = bond_description();
        desc.kind = InstrumentKind::Deposit { rate: 0.05 };
        assert!(Bond::new(&desc).is_err());
    }
}
