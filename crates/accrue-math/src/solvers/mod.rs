//! Root-finding algorithms.
//!
//! The calibrator only needs one solver: [`bisection`], a bracketing method
//! that halves the interval until half its width drops below the tolerance.
//! The guards it applies before and during iteration are part of its
//! contract. Infinite function values are accepted, only their sign is used.
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | `tolerance <= 0`, non-finite tolerance, or `max_iterations == 0` | [`MathError::InvalidInput`] |
//! | `f(a)`, `f(b)` or a midpoint value is NaN | [`MathError::NotANumber`] |
//! | `f(a) == 0` or `f(b) == 0` | that endpoint, zero iterations |
//! | `f(a)` and `f(b)` share a sign | [`MathError::InvalidBracket`] |
//! | midpoint collapses onto an endpoint | [`MathError::ToleranceUnreachable`] |
//! | more than `max_iterations` halvings needed | [`MathError::ConvergenceFailed`] |
//!
//! # Example: Per-Second Rate
//!
//! ```rust
//! use accrue_math::solvers::{bisection, SolverConfig};
//!
//! // Rate that doubles a balance over 1000 compounding steps.
//! let f = |x: f64| (1.0 + x).powf(1000.0) - 2.0;
//!
//! let config = SolverConfig::default().with_tolerance(1e-15);
//! let result = bisection(f, 0.0, 0.01, &config).unwrap();
//! assert!((result.root - (2f64.ln() / 1000.0).exp_m1()).abs() < 1e-12);
//! ```
//!
//! [`MathError::InvalidInput`]: crate::MathError::InvalidInput
//! [`MathError::NotANumber`]: crate::MathError::NotANumber
//! [`MathError::InvalidBracket`]: crate::MathError::InvalidBracket
//! [`MathError::ToleranceUnreachable`]: crate::MathError::ToleranceUnreachable
//! [`MathError::ConvergenceFailed`]: crate::MathError::ConvergenceFailed

mod bisection;

pub use bisection::{bisection, bisection_observed, BisectionStep};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on half the bracket width.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the tolerance is a positive finite number and the
    /// iteration cap is non-zero.
    pub fn validate(&self) -> MathResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {:e}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Trait for bracketing root finders.
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::{BisectionSolver, RootFinder, SolverConfig};
///
/// let solver = BisectionSolver;
/// let result = solver
///     .find_root(|x: f64| x - 0.25, (0.0, 1.0), &SolverConfig::default())
///     .unwrap();
/// assert_eq!(result.root, 0.25);
/// ```
pub trait RootFinder {
    /// Finds a root of `f` inside `bracket`.
    fn find_root<F>(&self, f: F, bracket: (f64, f64), config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl RootFinder for BisectionSolver {
    fn find_root<F>(&self, f: F, bracket: (f64, f64), config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        bisection(f, bracket.0, bracket.1, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_tolerance() {
        for tolerance in [0.0, -1e-12, f64::NAN, f64::INFINITY] {
            let config = SolverConfig::new(tolerance, 10);
            assert!(matches!(
                config.validate(),
                Err(MathError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_config_rejects_zero_iterations() {
        let config = SolverConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_root_finder_trait() {
        let solver = BisectionSolver;
        let f = |x: f64| x * x - 2.0;

        let result = solver
            .find_root(f, (1.0, 2.0), &SolverConfig::default())
            .unwrap();

        assert!((result.root - std::f64::consts::SQRT_2).abs() <= 1e-10);
        assert_eq!(solver.name(), "Bisection");
    }
}
