//! Global curve calibration.
//!
//! Fits the node rates of a [`ZeroCouponCurve`] to a set of instrument
//! market prices simultaneously, using a damped Gauss-Newton
//! (Levenberg-Marquardt) iteration.

use std::sync::Arc;

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use curvo_core::Date;

use crate::curve::ZeroCouponCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{InstrumentDescription, InstrumentRegistry};
use crate::interpolation::InterpolationMethod;

/// Floor for near-singular Hessian diagonal entries.
const DIAGONAL_FLOOR: f64 = 1e-12;

/// How the damped normal equations are solved each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepSolver {
    /// Full linear solve of `H * delta = -g` (Cholesky, LU fallback).
    #[default]
    FullCholesky,
    /// Per-diagonal division, ignoring off-diagonal coupling.
    ///
    /// Cheaper and cruder; kept selectable for parity with solvers that
    /// treat the nodes as independent.
    DiagonalOnly,
}

/// Configuration for the calibration loop.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerConfig {
    /// Convergence tolerance on the change in weighted RMSE.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Initial Levenberg damping parameter.
    pub initial_lambda: f64,
    /// Node rate clamp, in percent.
    pub rate_bounds: (f64, f64),
    /// Linear solver for the update step.
    pub step_solver: StepSolver,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_lambda: 0.01,
            rate_bounds: (0.01, 20.0),
            step_solver: StepSolver::default(),
        }
    }
}

impl OptimizerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the step solver.
    #[must_use]
    pub fn with_step_solver(mut self, step_solver: StepSolver) -> Self {
        self.step_solver = step_solver;
        self
    }
}

/// Result of a calibration run.
///
/// Non-convergence is never an error: the best rates found are returned
/// with `converged = false`.
#[derive(Debug, Clone)]
pub struct CalibrationOutcome {
    /// The calibrated curve.
    pub curve: ZeroCouponCurve,
    /// Calibrated node rates in percent.
    pub rates_percent: Vec<f64>,
    /// Final weighted relative RMSE.
    pub total_error: f64,
    /// Per-instrument relative errors, in percent.
    pub individual_errors: Vec<f64>,
    /// Iterations used.
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}

/// An instrument enrolled in a calibration problem.
#[derive(Clone)]
struct CalibrationEntry {
    description: InstrumentDescription,
    market_price: f64,
    weight: f64,
}

/// Global calibrator fitting curve node rates to instrument prices.
///
/// Each iteration builds a fresh immutable trial curve from the current
/// node rates, rebinds every description to it, and reprices through the
/// injected registry. The weighted relative RMSE
/// `sqrt(sum w_i * ((model_i - market_i) / market_i)^2 / sum w_i)` drives
/// acceptance and convergence; the update step minimizes the weighted
/// absolute residuals via a damped Gauss-Newton system.
///
/// # Example
///
/// ```rust,ignore
/// let registry = InstrumentRegistry::with_defaults();
/// let mut calibrator = CurveCalibrator::new(valuation_date, &registry);
/// calibrator.add_instrument(deposit_description, 97.5, 1.0);
///
/// let outcome = calibrator.calibrate(
///     &[5.0],
///     &[0.5],
///     &OptimizerConfig::default(),
/// )?;
/// ```
pub struct CurveCalibrator<'r> {
    valuation_date: Date,
    registry: &'r InstrumentRegistry,
    entries: Vec<CalibrationEntry>,
    interpolation: InterpolationMethod,
}

impl<'r> CurveCalibrator<'r> {
    /// Creates a calibrator pricing through the given registry.
    #[must_use]
    pub fn new(valuation_date: Date, registry: &'r InstrumentRegistry) -> Self {
        Self {
            valuation_date,
            registry,
            entries: Vec::new(),
            interpolation: InterpolationMethod::default(),
        }
    }

    /// Sets the interpolation method of trial and output curves.
    #[must_use]
    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Enrolls an instrument with its observed market price and weight.
    pub fn add_instrument(
        &mut self,
        description: InstrumentDescription,
        market_price: f64,
        weight: f64,
    ) {
        self.entries.push(CalibrationEntry {
            description,
            market_price,
            weight,
        });
    }

    /// Enrolls instruments with weight 1.
    pub fn add_instruments(
        &mut self,
        instruments: impl IntoIterator<Item = (InstrumentDescription, f64)>,
    ) {
        for (description, market_price) in instruments {
            self.add_instrument(description, market_price, 1.0);
        }
    }

    /// Removes all enrolled instruments.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Number of enrolled instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no instruments are enrolled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prices every enrolled instrument against its currently bound curve.
    ///
    /// # Errors
    ///
    /// Propagates registry and pricing errors.
    pub fn model_prices(&self) -> CurveResult<Vec<f64>> {
        self.entries
            .iter()
            .map(|entry| self.registry.build(&entry.description)?.price())
            .collect()
    }

    /// Per-instrument relative errors against market, in percent.
    ///
    /// # Errors
    ///
    /// Propagates registry and pricing errors.
    pub fn individual_errors(&self) -> CurveResult<Vec<f64>> {
        let prices = self.model_prices()?;
        Ok(self.relative_errors_percent(&prices))
    }

    /// Weighted relative RMSE against market prices.
    ///
    /// # Errors
    ///
    /// Propagates registry and pricing errors.
    pub fn total_error(&self) -> CurveResult<f64> {
        let prices = self.model_prices()?;
        Ok(self.weighted_rmse(&prices))
    }

    /// Fits node rates at the given knots to the enrolled market prices.
    ///
    /// `initial_rates_percent` seeds the node rates (percent, continuous
    /// compounding); `knots` are the node maturities in years.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` when no instruments are enrolled
    /// - `Validation` on mismatched rates/knots lengths or a zero market
    ///   price
    /// - `NonMonotonicTenors` when knots are not strictly increasing
    ///
    /// Non-convergence is not an error; see [`CalibrationOutcome`].
    pub fn calibrate(
        &self,
        initial_rates_percent: &[f64],
        knots: &[f64],
        config: &OptimizerConfig,
    ) -> CurveResult<CalibrationOutcome> {
        if self.entries.is_empty() {
            return Err(CurveError::empty_input("calibration"));
        }
        if initial_rates_percent.len() != knots.len() {
            return Err(CurveError::validation(format!(
                "rates and knots length mismatch: {} vs {}",
                initial_rates_percent.len(),
                knots.len()
            )));
        }
        for (i, window) in knots.windows(2).enumerate() {
            if window[0] >= window[1] {
                return Err(CurveError::non_monotonic_tenors(i + 1, window[0], window[1]));
            }
        }
        for entry in &self.entries {
            if entry.market_price == 0.0 {
                return Err(CurveError::validation(
                    "market price must be non-zero for relative error weighting",
                ));
            }
        }

        let n_nodes = knots.len();
        let n_inst = self.entries.len();
        let (lo, hi) = config.rate_bounds;

        let mut rates: Vec<f64> = initial_rates_percent
            .iter()
            .map(|r| r.clamp(lo, hi))
            .collect();

        let mut prices = self.reprice(&rates, knots)?;
        let mut residuals = self.absolute_residuals(&prices);
        let mut err = self.weighted_rmse(&prices);

        let mut lambda = config.initial_lambda;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < config.max_iterations {
            iterations += 1;

            // Forward-difference Jacobian of the residuals, one column per
            // node. The perturbed rate is restored after each column.
            let mut jacobian = DMatrix::<f64>::zeros(n_inst, n_nodes);
            for j in 0..n_nodes {
                let h = 1e-4 * rates[j].abs().max(1.0);
                let saved = rates[j];
                rates[j] += h;
                let perturbed = self.reprice(&rates, knots)?;
                rates[j] = saved;

                for i in 0..n_inst {
                    jacobian[(i, j)] =
                        (perturbed[i] - self.entries[i].market_price - residuals[i]) / h;
                }
            }

            // Gradient and Gauss-Newton Hessian with Levenberg damping
            let mut gradient = DVector::<f64>::zeros(n_nodes);
            let mut hessian = DMatrix::<f64>::zeros(n_nodes, n_nodes);
            for i in 0..n_inst {
                let w = self.entries[i].weight;
                for j in 0..n_nodes {
                    gradient[j] += w * residuals[i] * jacobian[(i, j)];
                    for k in 0..n_nodes {
                        hessian[(j, k)] += w * jacobian[(i, j)] * jacobian[(i, k)];
                    }
                }
            }
            for j in 0..n_nodes {
                hessian[(j, j)] *= 1.0 + lambda;
            }

            let delta = solve_step(&hessian, &gradient, config.step_solver);

            let trial_rates: Vec<f64> = rates
                .iter()
                .zip(delta.iter())
                .map(|(r, d)| (r + d).clamp(lo, hi))
                .collect();
            let trial_prices = self.reprice(&trial_rates, knots)?;
            let trial_err = self.weighted_rmse(&trial_prices);

            let improvement = (trial_err - err).abs();

            if trial_err < err {
                rates = trial_rates;
                prices = trial_prices;
                residuals = self.absolute_residuals(&prices);
                err = trial_err;
                lambda /= 2.0;
                debug!("iteration {iterations}: accepted, rmse={err:.6e}, lambda={lambda:.3e}");
            } else {
                lambda *= 2.0;
                debug!(
                    "iteration {iterations}: rejected (rmse {trial_err:.6e} >= {err:.6e}), lambda={lambda:.3e}"
                );
            }

            if improvement < config.tolerance {
                converged = true;
                break;
            }
        }

        let curve = self.build_curve(&rates, knots)?;
        let individual_errors = self.relative_errors_percent(&prices);

        Ok(CalibrationOutcome {
            curve,
            rates_percent: rates,
            total_error: err,
            individual_errors,
            iterations,
            converged,
        })
    }

    fn build_curve(&self, rates_percent: &[f64], knots: &[f64]) -> CurveResult<ZeroCouponCurve> {
        ZeroCouponCurve::from_zero_rates(rates_percent, knots, self.interpolation)
    }

    /// Rebinds every description to a trial curve and reprices.
    fn reprice(&self, rates_percent: &[f64], knots: &[f64]) -> CurveResult<Vec<f64>> {
        let curve = Arc::new(self.build_curve(rates_percent, knots)?);
        self.entries
            .iter()
            .map(|entry| {
                let rebound = entry.description.with_curve(Arc::clone(&curve));
                self.registry.build(&rebound)?.price()
            })
            .collect()
    }

    fn absolute_residuals(&self, prices: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .zip(prices)
            .map(|(entry, &p)| p - entry.market_price)
            .collect()
    }

    fn relative_errors_percent(&self, prices: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .zip(prices)
            .map(|(entry, &p)| (p - entry.market_price) / entry.market_price * 100.0)
            .collect()
    }

    fn weighted_rmse(&self, prices: &[f64]) -> f64 {
        let mut sum = 0.0;
        let mut weight_sum = 0.0;
        for (entry, &p) in self.entries.iter().zip(prices) {
            let rel = (p - entry.market_price) / entry.market_price;
            sum += entry.weight * rel * rel;
            weight_sum += entry.weight;
        }
        (sum / weight_sum).sqrt()
    }
}

/// Solves the damped system `H * delta = -g`.
fn solve_step(hessian: &DMatrix<f64>, gradient: &DVector<f64>, solver: StepSolver) -> DVector<f64> {
    let neg_g = -gradient;

    match solver {
        StepSolver::FullCholesky => {
            if let Some(chol) = hessian.clone().cholesky() {
                return chol.solve(&neg_g);
            }
            if let Some(solution) = hessian.clone().lu().solve(&neg_g) {
                return solution;
            }
            warn!("damped Hessian is singular, falling back to diagonal step");
            diagonal_step(hessian, &neg_g)
        }
        StepSolver::DiagonalOnly => diagonal_step(hessian, &neg_g),
    }
}

/// Per-diagonal division, flooring near-zero entries.
fn diagonal_step(hessian: &DMatrix<f64>, neg_g: &DVector<f64>) -> DVector<f64> {
    DVector::from_fn(neg_g.len(), |j, _| {
        let mut d = hessian[(j, j)];
        if d.abs() < DIAGONAL_FLOOR {
            warn!("near-singular Hessian diagonal at node {j}, flooring damping term");
            d = DIAGONAL_FLOOR;
        }
        neg_g[j] / d
    })
}
