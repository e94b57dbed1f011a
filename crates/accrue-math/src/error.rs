//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during root finding and rounding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root-finding algorithm failed to converge within the iteration cap.
    #[error("Convergence failed after {iterations} iterations (bracket width: {width:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Bracket width when the cap was reached.
        width: f64,
    },

    /// Invalid bracket for root-finding.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// The bracket can no longer be halved in floating point before the
    /// tolerance is met.
    #[error(
        "Tolerance {tolerance:.2e} unreachable: bracket [{a:e}, {b:e}] cannot be split further"
    )]
    ToleranceUnreachable {
        /// Requested tolerance.
        tolerance: f64,
        /// Lower bound of the stalled bracket.
        a: f64,
        /// Upper bound of the stalled bracket.
        b: f64,
    },

    /// The function returned NaN, so its sign is undefined.
    #[error("Function value is NaN at x = {x:e}")]
    NotANumber {
        /// Evaluation point.
        x: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// A value could not be represented or rounded as a decimal.
    #[error("Cannot round {value:e}: {reason}")]
    Rounding {
        /// The value being rounded.
        value: f64,
        /// Why rounding failed.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, width: f64) -> Self {
        Self::ConvergenceFailed { iterations, width }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a rounding error.
    #[must_use]
    pub fn rounding(value: f64, reason: impl Into<String>) -> Self {
        Self::Rounding {
            value,
            reason: reason.into(),
        }
    }
}
