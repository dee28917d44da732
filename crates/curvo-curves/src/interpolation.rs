//! Interpolation methods for discount curves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpolation policy applied between curve knots.
///
/// The policy determines what quantity is interpolated linearly between
/// the two knots bracketing a query tenor:
///
/// - [`LinearDiscount`](InterpolationMethod::LinearDiscount) interpolates
///   the discount factors themselves.
/// - [`LogLinearRate`](InterpolationMethod::LogLinearRate) interpolates the
///   continuous zero rates and reconstructs `DF = exp(-r(t) * t)`.
///
/// Outside the knot range both policies clamp flat to the nearest knot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationMethod {
    /// Linear interpolation in discount factor space.
    #[default]
    LinearDiscount,
    /// Linear interpolation in continuous zero rate space.
    LogLinearRate,
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterpolationMethod::LinearDiscount => "LinearDiscount",
            InterpolationMethod::LogLinearRate => "LogLinearRate",
        };
        write!(f, "{name}")
    }
}

/// Linear interpolation between two points.
///
/// Assumes `x0 != x1`; callers bracket with strictly increasing knots.
#[inline]
#[must_use]
pub(crate) fn lerp(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_midpoint() {
        assert_relative_eq!(lerp(0.5, 0.0, 1.0, 1.0, 3.0), 2.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(lerp(0.25, 0.25, 0.99, 1.0, 0.95), 0.99);
        assert_relative_eq!(lerp(1.0, 0.25, 0.99, 1.0, 0.95), 0.95);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(
            format!("{}", InterpolationMethod::LinearDiscount),
            "LinearDiscount"
        );
        assert_eq!(
            format!("{}", InterpolationMethod::LogLinearRate),
            "LogLinearRate"
        );
    }

    #[test]
    fn test_default_method() {
        assert_eq!(
            InterpolationMethod::default(),
            InterpolationMethod::LinearDiscount
        );
    }
}
