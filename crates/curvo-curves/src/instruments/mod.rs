//! Instrument descriptions and pricers.
//!
//! An [`InstrumentDescription`] is the passive, serializable statement of an
//! instrument's terms: what kind it is, its notional, maturity, issue date,
//! and the discount curve it prices against. Pricers are built from
//! descriptions through the [`InstrumentRegistry`] and expose the
//! [`Instrument`] trait.

mod bond;
mod deposit;
mod registry;
mod swap;

pub use bond::{Bond, YieldResult};
pub use deposit::Deposit;
pub use registry::InstrumentRegistry;
pub use swap::Swap;

use std::fmt;
use std::sync::Arc;

use curvo_core::daycounts::DayCountConvention;
use curvo_core::types::{Date, Frequency};
use serde::{Deserialize, Serialize};

use crate::curve::ZeroCouponCurve;
use crate::error::{CurveError, CurveResult};

/// The kind of an instrument, carrying its kind-specific terms.
///
/// Dispatch on kind is explicit: pricers and the registry match on the
/// variant rather than downcasting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Zero-coupon money market deposit quoted at a simple interest rate.
    Deposit {
        /// Simple interest rate (decimal, e.g. 0.05 for 5%).
        rate: f64,
    },
    /// Fixed-coupon bond.
    Bond {
        /// Annual coupon rate (decimal).
        coupon_rate: f64,
        /// Coupon payment frequency.
        frequency: Frequency,
        /// Coupon payment times in years from issue.
        coupon_times: Vec<f64>,
    },
    /// Fixed-for-floating interest rate swap.
    Swap {
        /// Fixed leg rate (decimal).
        fixed_rate: f64,
        /// Fixed leg payment frequency.
        fixed_frequency: Frequency,
        /// Floating leg payment frequency.
        floating_frequency: Frequency,
        /// Known rate for the first floating period (decimal).
        initial_fixing: f64,
        /// Name of the floating rate index (e.g. "EURIBOR6M").
        floating_index: String,
        /// Day count convention for accruals.
        day_count: DayCountConvention,
    },
}

impl InstrumentKind {
    /// Returns the tag identifying this kind.
    #[must_use]
    pub fn tag(&self) -> InstrumentKindTag {
        match self {
            InstrumentKind::Deposit { .. } => InstrumentKindTag::Deposit,
            InstrumentKind::Bond { .. } => InstrumentKindTag::Bond,
            InstrumentKind::Swap { .. } => InstrumentKindTag::Swap,
        }
    }
}

/// Data-free tag for an instrument kind, used as registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKindTag {
    /// Money market deposit.
    Deposit,
    /// Fixed-coupon bond.
    Bond,
    /// Interest rate swap.
    Swap,
}

impl fmt::Display for InstrumentKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKindTag::Deposit => "Deposit",
            InstrumentKindTag::Bond => "Bond",
            InstrumentKindTag::Swap => "Swap",
        };
        write!(f, "{name}")
    }
}

/// The terms of an instrument plus the curve it prices against.
///
/// Descriptions are values: rebinding to a new curve via
/// [`with_curve`](Self::with_curve) produces a new description rather than
/// mutating in place, so a description shared across calibration iterations
/// never changes under a holder's feet.
#[derive(Debug, Clone)]
pub struct InstrumentDescription {
    /// Kind-specific terms.
    pub kind: InstrumentKind,
    /// Notional amount.
    pub notional: f64,
    /// Maturity in years from the issue date.
    pub maturity: f64,
    /// Issue / valuation date.
    pub issue_date: Date,
    /// Discount curve used for pricing.
    pub curve: Arc<ZeroCouponCurve>,
}

impl InstrumentDescription {
    /// Creates a new instrument description.
    #[must_use]
    pub fn new(
        kind: InstrumentKind,
        notional: f64,
        maturity: f64,
        issue_date: Date,
        curve: Arc<ZeroCouponCurve>,
    ) -> Self {
        Self {
            kind,
            notional,
            maturity,
            issue_date,
            curve,
        }
    }

    /// Returns a copy of this description bound to a different curve.
    #[must_use]
    pub fn with_curve(&self, curve: Arc<ZeroCouponCurve>) -> Self {
        Self {
            curve,
            ..self.clone()
        }
    }

    /// Validates the description's terms.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Validation` naming the first violated rule:
    /// positive maturity and notional for every kind, plus kind-specific
    /// checks on rates, schedules, and fixings.
    pub fn validate(&self) -> CurveResult<()> {
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(CurveError::validation(format!(
                "maturity must be positive, got {}",
                self.maturity
            )));
        }
        if !self.notional.is_finite() || self.notional <= 0.0 {
            return Err(CurveError::validation(format!(
                "notional must be positive, got {}",
                self.notional
            )));
        }

        match &self.kind {
            InstrumentKind::Deposit { rate } => {
                if !rate.is_finite() {
                    return Err(CurveError::validation("deposit rate is not finite"));
                }
            }
            InstrumentKind::Bond {
                coupon_rate,
                coupon_times,
                ..
            } => {
                if !(0.0..=1.0).contains(coupon_rate) {
                    return Err(CurveError::validation(format!(
                        "bond coupon rate must be in [0, 1], got {coupon_rate}"
                    )));
                }
                if coupon_times.is_empty() {
                    return Err(CurveError::validation(
                        "bond must have at least one coupon time",
                    ));
                }
            }
            InstrumentKind::Swap {
                fixed_rate,
                initial_fixing,
                floating_index,
                ..
            } => {
                if !(0.0..=1.0).contains(fixed_rate) {
                    return Err(CurveError::validation(format!(
                        "swap fixed rate must be in [0, 1], got {fixed_rate}"
                    )));
                }
                if *initial_fixing < 0.0 || !initial_fixing.is_finite() {
                    return Err(CurveError::validation(format!(
                        "swap initial fixing must be non-negative, got {initial_fixing}"
                    )));
                }
                if floating_index.is_empty() {
                    return Err(CurveError::validation("swap floating index must be named"));
                }
            }
        }

        Ok(())
    }
}

/// A priced instrument.
///
/// Implementations hold a validated description and price it against the
/// description's curve.
pub trait Instrument: std::fmt::Debug + Send + Sync {
    /// Returns the present value of the instrument.
    ///
    /// # Errors
    ///
    /// Returns a `CurveError` if the curve cannot serve a tenor the
    /// instrument's schedule needs.
    fn price(&self) -> CurveResult<f64>;

    /// Returns the instrument's kind tag.
    fn kind(&self) -> InstrumentKindTag;
}


#[cfg(test)]
mod tests {
    use super::test_support::{base_date, flat_curve};
    use super::*;

    fn deposit_description() -> InstrumentDescription {
        InstrumentDescription::new(
            InstrumentKind::Deposit { rate: 0.05 },
            100.0,
            0.5,
            base_date(),
            flat_curve(5.0),
        )
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            InstrumentKind::Deposit { rate: 0.05 }.tag(),
            InstrumentKindTag::Deposit
        );
        assert_eq!(format!("{}", InstrumentKindTag::Swap), "Swap");
    }

    #[test]
    fn test_validate_deposit_ok() {
        assert!(deposit_description().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_maturity() {
        let mut desc = deposit_description();
        desc.maturity = 0.0;
        assert!(matches!(
            desc.validate(),
            Err(CurveError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_notional() {
        let mut desc = deposit_description();
        desc.notional = -100.0;
        assert!(matches!(
            desc.validate(),
            Err(CurveError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_bond_rules() {
        let mut desc = deposit_description();

        desc.kind = InstrumentKind::Bond {
            coupon_rate: 1.5,
            frequency: Frequency::SemiAnnual,
            coupon_times: vec![0.5, 1.0],
        };
        assert!(desc.validate().is_err());

        desc.kind = InstrumentKind::Bond {
            coupon_rate: 0.05,
            frequency: Frequency::SemiAnnual,
            coupon_times: vec![],
        };
        assert!(desc.validate().is_err());

        desc.kind = InstrumentKind::Bond {
            coupon_rate: 0.05,
            frequency: Frequency::SemiAnnual,
            coupon_times: vec![0.5, 1.0],
        };
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_validate_swap_rules() {
        let mut desc = deposit_description();
        desc.maturity = 2.0;

        let swap = |fixed_rate: f64, initial_fixing: f64, index: &str| InstrumentKind::Swap {
            fixed_rate,
            fixed_frequency: Frequency::SemiAnnual,
            floating_frequency: Frequency::SemiAnnual,
            initial_fixing,
            floating_index: index.to_string(),
            day_count: DayCountConvention::Act360,
        };

        desc.kind = swap(1.2, 0.05, "EURIBOR6M");
        assert!(desc.validate().is_err());

        desc.kind = swap(0.055, -0.01, "EURIBOR6M");
        assert!(desc.validate().is_err());

        desc.kind = swap(0.055, 0.05, "");
        assert!(desc.validate().is_err());

        desc.kind = swap(0.055, 0.05, "EURIBOR6M");
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_with_curve_rebinds_without_mutation() {
        let desc = deposit_description();
        let original_df = desc.curve.discount_factor(0.5);

        let rebound = desc.with_curve(flat_curve(6.0));

        assert_eq!(desc.curve.discount_factor(0.5), original_df);
        assert!(rebound.curve.discount_factor(0.5) < original_df);
        assert_eq!(rebound.kind, desc.kind);
    }
}
