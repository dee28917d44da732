//! Interest rate swap pricer.

use curvo_core::daycounts::DayCountConvention;
use curvo_core::types::{Date, Frequency};
use rust_decimal::prelude::ToPrimitive;

use super::{Instrument, InstrumentDescription, InstrumentKind, InstrumentKindTag};
use crate::curve::ZeroCouponCurve;
use crate::error::{CurveError, CurveResult};

/// Pricer for a fixed-for-floating interest rate swap, from the fixed
/// payer's perspective.
///
/// Payment dates step through the calendar from the issue date at the fixed
/// leg's frequency. For each period the fixed leg accrues
/// `notional * fixed_rate * tau` and the floating leg accrues
/// `notional * r_k * tau`, where the first floating rate is the initial
/// fixing and later ones are forward rates off the curve converted to the
/// floating leg's effective compounding. Accruals use the description's day
/// count convention; discounting tenors use ACT/360.
///
/// Notional exchange cancels between the legs and is omitted:
/// `PV = floating - fixed`.
#[derive(Debug, Clone)]
pub struct Swap {
    description: InstrumentDescription,
}

/// One payment period of the swap schedule.
struct Period {
    /// Discounting tenor of the period start (years, ACT/360).
    start_tenor: f64,
    /// Discounting tenor of the payment date (years, ACT/360).
    end_tenor: f64,
    /// Accrual fraction under the description's day count.
    accrual: f64,
}

impl Swap {
    /// Builds a swap pricer from a validated description.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Validation` if the description is not a swap or
    /// fails term validation.
    pub fn new(description: &InstrumentDescription) -> CurveResult<Self> {
        description.validate()?;
        if !matches!(description.kind, InstrumentKind::Swap { .. }) {
            return Err(CurveError::validation(format!(
                "expected a Swap description, got {}",
                description.kind.tag()
            )));
        }
        Ok(Self {
            description: description.clone(),
        })
    }

    fn terms(&self) -> (f64, Frequency, Frequency, f64, DayCountConvention) {
        match &self.description.kind {
            InstrumentKind::Swap {
                fixed_rate,
                fixed_frequency,
                floating_frequency,
                initial_fixing,
                day_count,
                ..
            } => (
                *fixed_rate,
                *fixed_frequency,
                *floating_frequency,
                *initial_fixing,
                *day_count,
            ),
            _ => unreachable!("constructor enforces the Swap kind"),
        }
    }

    /// Builds the payment schedule at the fixed leg's frequency.
    fn schedule(&self) -> CurveResult<Vec<Period>> {
        let (_, fixed_frequency, _, _, day_count) = self.terms();
        let issue = self.description.issue_date;
        let dc = day_count.to_day_count();

        let periods_per_year = f64::from(fixed_frequency.periods_per_year());
        let count = (self.description.maturity * periods_per_year).round() as i32;
        if count < 1 {
            return Err(CurveError::validation(format!(
                "swap maturity {} shorter than one {} period",
                self.description.maturity, fixed_frequency
            )));
        }

        let step = fixed_frequency.months_per_period() as i32;
        let mut periods = Vec::with_capacity(count as usize);
        let mut prev_date = issue;

        for k in 1..=count {
            let pay_date = issue.add_months(k * step)?;
            periods.push(Period {
                start_tenor: Self::act360_tenor(issue, prev_date),
                end_tenor: Self::act360_tenor(issue, pay_date),
                accrual: dc
                    .year_fraction(prev_date, pay_date)
                    .to_f64()
                    .unwrap_or(0.0),
            });
            prev_date = pay_date;
        }

        Ok(periods)
    }

    fn act360_tenor(issue: Date, date: Date) -> f64 {
        ZeroCouponCurve::year_fraction(issue, date)
    }

    /// Floating rate for period `k` (1-based).
    fn floating_rate(&self, k: usize, period: &Period) -> CurveResult<f64> {
        let (_, _, floating_frequency, initial_fixing, _) = self.terms();
        if k == 1 {
            return Ok(initial_fixing);
        }

        let forward = self
            .description
            .curve
            .forward_rate(period.start_tenor, period.end_tenor)?;
        Ok(ZeroCouponCurve::continuous_to_effective(
            forward,
            floating_frequency,
        ))
    }

    /// Present value of the fixed leg's coupons.
    ///
    /// # Errors
    ///
    /// Propagates schedule construction failures.
    pub fn fixed_leg(&self) -> CurveResult<f64> {
        let (fixed_rate, ..) = self.terms();
        let curve = &self.description.curve;

        let mut pv = 0.0;
        for period in self.schedule()? {
            pv += self.description.notional
                * fixed_rate
                * period.accrual
                * curve.discount_factor(period.end_tenor);
        }
        Ok(pv)
    }

    /// Present value of the floating leg's coupons.
    ///
    /// # Errors
    ///
    /// Propagates curve errors from forward rate queries.
    pub fn floating_leg(&self) -> CurveResult<f64> {
        let curve = &self.description.curve;

        let mut pv = 0.0;
        for (k, period) in self.schedule()?.iter().enumerate() {
            let rate = self.floating_rate(k + 1, period)?;
            pv += self.description.notional
                * rate
                * period.accrual
                * curve.discount_factor(period.end_tenor);
        }
        Ok(pv)
    }
}

impl Instrument for Swap {
    fn price(&self) -> CurveResult<f64> {
        Ok(self.floating_leg()? - self.fixed_leg()?)
    }

    fn kind(&self) -> InstrumentKindTag {
        InstrumentKindTag::Swap
    }
}
