//! Money market deposit pricer.

use super::{Instrument, InstrumentDescription, InstrumentKind, InstrumentKindTag};
use crate::error::{CurveError, CurveResult};

/// Pricer for a zero-coupon money market deposit.
///
/// The deposit pays its notional at maturity, so its present value is
/// `notional * DF(maturity)`. Against a curve bootstrapped from the
/// deposit's own quote this equals the simple-interest price
/// `notional / (1 + rate * tau)`.
#[derive(Debug, Clone)]
pub struct Deposit {
    description: InstrumentDescription,
}

impl Deposit {
    /// Builds a deposit pricer from a validated description.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Validation` if the description is not a deposit
    /// or fails term validation.
    pub fn new(description: &InstrumentDescription) -> CurveResult<Self> {
        description.validate()?;
        if !matches!(description.kind, InstrumentKind::Deposit { .. }) {
            return Err(CurveError::validation(format!(
                "expected a Deposit description, got {}",
                description.kind.tag()
            )));
        }
        Ok(Self {
            description: description.clone(),
        })
    }

    /// Returns the quoted simple interest rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        match self.description.kind {
            InstrumentKind::Deposit { rate } => rate,
            _ => unreachable!("constructor enforces the Deposit kind"),
        }
    }
}

impl Instrument for Deposit {
    fn price(&self) -> CurveResult<f64> {
        let df = self.description.curve.discount_factor(self.description.maturity);
        Ok(self.description.notional * df)
    }

    fn kind(&self) -> InstrumentKindTag {
        InstrumentKindTag::Deposit
    }
}
