//! Error types for rate calibration.

use accrue_math::MathError;
use thiserror::Error;

/// A specialized Result type for rate calibration.
pub type RateResult<T> = Result<T, RateError>;

/// Errors raised while building objectives, loading scenarios, or solving.
#[derive(Error, Debug)]
pub enum RateError {
    /// The solver or rounding step failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Compound growth is only defined for rates above -100%.
    #[error("Rate {x} is outside the domain x > -1")]
    OutOfDomain {
        /// The offending rate.
        x: f64,
    },

    /// The objective overflowed or produced NaN.
    #[error("Objective is not finite at x = {x:e}: {value}")]
    NonFinite {
        /// Evaluation point.
        x: f64,
        /// The offending value.
        value: f64,
    },

    /// A scenario's constants are inconsistent.
    #[error("Invalid scenario '{name}': {reason}")]
    InvalidScenario {
        /// Scenario name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The scenario catalog could not be parsed.
    #[error("Invalid scenario catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    /// No scenario with the requested name exists.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

impl RateError {
    /// Creates an invalid scenario error.
    #[must_use]
    pub fn invalid_scenario(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_is_transparent() {
        let err: RateError = MathError::convergence_failed(100, 1e-6).into();
        assert!(err.to_string().starts_with("Convergence failed"));
    }

    #[test]
    fn test_invalid_scenario_display() {
        let err = RateError::invalid_scenario("per-block", "split_denominator must be non-zero");
        assert_eq!(
            err.to_string(),
            "Invalid scenario 'per-block': split_denominator must be non-zero"
        );
    }
}
