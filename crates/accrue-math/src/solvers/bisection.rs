//! Bisection root-finding algorithm.

use log::{debug, trace};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// State of the bracket after one bisection iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionStep {
    /// Iteration counter, starting at 1.
    pub iteration: u32,
    /// Midpoint evaluated during this iteration.
    pub midpoint: f64,
    /// Function value at the midpoint.
    pub value: f64,
    /// Bracket after the update. Collapses to `[midpoint, midpoint]` when
    /// the midpoint is an exact root.
    pub bracket: [f64; 2],
}

impl BisectionStep {
    /// Width of the bracket after this iteration.
    pub fn width(&self) -> f64 {
        self.bracket[1] - self.bracket[0]
    }
}

/// Bisection root-finding algorithm.
///
/// Repeatedly halves `[a, b]` while half its width exceeds
/// `config.tolerance`, keeping the half on which `f` changes sign. The
/// returned root lies within the tolerance of a sign change of `f`.
///
/// Requires: `f(a)` and `f(b)` of opposite sign, or an exact zero at an
/// endpoint. See the [module docs](crate::solvers) for the guards applied.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    bisection_observed(f, a, b, config, |_| {})
}

/// Bisection with a callback invoked after every iteration.
///
/// Identical to [`bisection`], except that `observer` receives a
/// [`BisectionStep`] each time the bracket is updated.
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::{bisection_observed, SolverConfig};
///
/// let mut widths = Vec::new();
/// let config = SolverConfig::default().with_tolerance(0.1);
/// bisection_observed(|x: f64| x - 0.3, 0.0, 1.0, &config, |step| {
///     widths.push(step.width());
/// })
/// .unwrap();
///
/// assert_eq!(widths, vec![0.5, 0.25, 0.125]);
/// ```
pub fn bisection_observed<F, O>(
    f: F,
    a: f64,
    b: f64,
    config: &SolverConfig,
    mut observer: O,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    O: FnMut(&BisectionStep),
{
    config.validate()?;
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket bounds must be finite, got [{a}, {b}]"
        )));
    }

    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = signed(lo, f(lo))?;
    let f_hi = signed(hi, f(hi))?;

    // Handle case where endpoint is the root
    if f_lo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    if f_lo.signum() == f_hi.signum() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut iterations = 0;
    while (hi - lo) / 2.0 > config.tolerance {
        if iterations == config.max_iterations {
            return Err(MathError::convergence_failed(iterations, hi - lo));
        }

        let mid = (lo + hi) / 2.0;
        if mid <= lo || mid >= hi {
            return Err(MathError::ToleranceUnreachable {
                tolerance: config.tolerance,
                a: lo,
                b: hi,
            });
        }

        let f_mid = signed(mid, f(mid))?;
        iterations += 1;

        if f_mid == 0.0 {
            observer(&BisectionStep {
                iteration: iterations,
                midpoint: mid,
                value: f_mid,
                bracket: [mid, mid],
            });
            debug!("bisection hit exact root {mid:e} after {iterations} iterations");
            return Ok(SolverResult {
                root: mid,
                iterations,
                residual: f_mid,
            });
        }

        // Compare signs; the product of two tiny values underflows to zero.
        if f_lo.signum() != f_mid.signum() {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }

        trace!("bisection step {iterations}: f({mid:e}) = {f_mid:e}, bracket [{lo:e}, {hi:e}]");
        observer(&BisectionStep {
            iteration: iterations,
            midpoint: mid,
            value: f_mid,
            bracket: [lo, hi],
        });
    }

    let root = (lo + hi) / 2.0;
    let residual = f(root);
    debug!("bisection converged to {root:e} after {iterations} iterations (residual {residual:e})");

    Ok(SolverResult {
        root,
        iterations,
        residual,
    })
}

fn signed(x: f64, value: f64) -> MathResult<f64> {
    if value.is_nan() {
        Err(MathError::NotANumber { x })
    } else {
        Ok(value)
    }
}
