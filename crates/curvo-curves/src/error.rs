//! Error types for curve operations.
//!
//! This module provides error handling for curve construction, instrument
//! validation, bootstrap, and calibration operations.

use curvo_core::CoreError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// An instrument description failed validation.
    #[error("Validation error: {reason}")]
    Validation {
        /// Description of the validation failure.
        reason: String,
    },

    /// The instrument kind has no registered pricer.
    #[error("Unsupported instrument: {kind}")]
    UnsupportedInstrument {
        /// The unrecognized instrument kind.
        kind: String,
    },

    /// An operation received no inputs.
    #[error("Empty input: {operation} requires at least one instrument")]
    EmptyInput {
        /// The operation that received no inputs.
        operation: String,
    },

    /// Tenors are not monotonically increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Not enough data points for curve construction.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Requested tenor is outside the curve's valid range.
    #[error("Tenor {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TenorOutOfRange {
        /// The requested tenor in years.
        requested: f64,
        /// Minimum valid tenor.
        min: f64,
        /// Maximum valid tenor.
        max: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Mathematical error.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the mathematical error.
        reason: String,
    },

    /// Error from the core crate (dates, day counts).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported instrument error.
    #[must_use]
    pub fn unsupported_instrument(kind: impl Into<String>) -> Self {
        Self::UnsupportedInstrument { kind: kind.into() }
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Creates a non-monotonic tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTenors {
            index,
            prev,
            current,
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a tenor out of range error.
    #[must_use]
    pub fn tenor_out_of_range(requested: f64, min: f64, max: f64) -> Self {
        Self::TenorOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = CurveError::validation("maturity must be positive");
        let msg = format!("{}", err);
        assert!(msg.contains("Validation error"));
        assert!(msg.contains("maturity"));
    }

    #[test]
    fn test_unsupported_instrument_display() {
        let err = CurveError::unsupported_instrument("Future");
        assert!(format!("{}", err).contains("Unsupported instrument: Future"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = CurveError::empty_input("bootstrap");
        assert!(format!("{}", err).contains("bootstrap"));
    }

    #[test]
    fn test_non_monotonic_tenors() {
        let err = CurveError::non_monotonic_tenors(3, 2.0, 1.5);
        let msg = format!("{}", err);
        assert!(msg.contains("Non-monotonic"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn test_core_error_passthrough() {
        let core = CoreError::invalid_date("2024-02-30");
        let err: CurveError = core.into();
        assert!(format!("{}", err).contains("Invalid date"));
    }
}
