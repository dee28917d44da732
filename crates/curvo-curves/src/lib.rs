//! # Curvo Curves
//!
//! Discount curve construction and fixed income pricing for the Curvo
//! library.
//!
//! This crate provides:
//!
//! - **Curve**: the immutable [`ZeroCouponCurve`] with selectable
//!   interpolation
//! - **Instruments**: descriptions, validation, and pricers for deposits,
//!   bonds, and swaps, dispatched through an explicit
//!   [`InstrumentRegistry`]
//! - **Bootstrap**: sequential closed-form construction from deposit and
//!   par swap quotes
//! - **Calibration**: global least-squares fitting of node rates with a
//!   damped Gauss-Newton loop
//!
//! ## Quick Start
//!
//! ```rust
//! use curvo_core::Date;
//! use curvo_curves::prelude::*;
//!
//! let base = Date::from_ymd(2016, 4, 1).unwrap();
//! let curve = CurveBootstrapper::new(base)
//!     .add_deposit(5.0, 6)       // 6m deposit at 5%
//!     .add_swap(5.5, 12)         // 12m par swap at 5.5%
//!     .add_swap(6.0, 18)         // 18m par swap at 6%
//!     .calibrate()
//!     .unwrap();
//!
//! let df_9m = curve.discount_factor(0.75);
//! assert!(df_9m > 0.0 && df_9m < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod bootstrap;
pub mod calibration;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod interpolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::CurveBootstrapper;
    pub use crate::calibration::{
        CalibrationOutcome, CurveCalibrator, OptimizerConfig, StepSolver,
    };
    pub use crate::curve::ZeroCouponCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        Bond, Deposit, Instrument, InstrumentDescription, InstrumentKind, InstrumentKindTag,
        InstrumentRegistry, Swap, YieldResult,
    };
    pub use crate::interpolation::InterpolationMethod;
}

pub use curve::ZeroCouponCurve;
pub use error::{CurveError, CurveResult};
pub use instruments::InstrumentRegistry;
pub use interpolation::InterpolationMethod;
