//! Objective functions whose roots are calibrated rates.
//!
//! Two equation families are supported:
//!
//! - [`AccrualEquation`]: matches the observed share of compound interest
//!   earned on a principal,
//!   `(P * (1 + x)^n - P) * s_num / s_den - target_delta`.
//! - [`RateEquivalence`]: finds the per-step rate whose compounding over `n1`
//!   steps equals a known rate compounded over `n2` coarser steps,
//!   `(1 + x)^n1 - (1 + r_ref)^n2`.
//!
//! [`Objective`] is the tagged union of both, as read from scenario files.

use std::fmt;

use serde::Deserialize;

use crate::error::{RateError, RateResult};
use crate::units::deserialize_steps;

/// Equation family of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Accrual-matching equation.
    Accrual,
    /// Rate-equivalence equation.
    RateEquivalence,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accrual => write!(f, "accrual"),
            Self::RateEquivalence => write!(f, "rate equivalence"),
        }
    }
}

/// A real function of the per-step rate `x`, defined for `x > -1`.
pub trait ObjectiveFunction {
    /// Evaluates the function. Outside the domain the result is whatever
    /// `powf` yields for a non-positive base.
    fn evaluate(&self, x: f64) -> f64;

    /// The equation family.
    fn family(&self) -> Family;

    /// Evaluates the function, rejecting `x <= -1` and non-finite results.
    fn try_evaluate(&self, x: f64) -> RateResult<f64> {
        if x.is_nan() || x <= -1.0 {
            return Err(RateError::OutOfDomain { x });
        }
        let value = self.evaluate(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RateError::NonFinite { x, value })
        }
    }
}

/// Share of compound interest on a principal, compared with an observed
/// payout.
///
/// The principal compounds once per step for `elapsed_units` steps. The gross
/// interest is split by `split_numerator / split_denominator` before it is
/// compared with `target_delta`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AccrualEquation {
    /// Principal amount.
    pub principal: f64,
    /// Compounding steps elapsed.
    #[serde(deserialize_with = "deserialize_steps")]
    pub elapsed_units: u64,
    /// Numerator of the allocation split.
    pub split_numerator: f64,
    /// Denominator of the allocation split.
    pub split_denominator: f64,
    /// Observed excess payout.
    pub target_delta: f64,
}

impl AccrualEquation {
    /// Creates an accrual equation.
    #[must_use]
    pub fn new(
        principal: f64,
        elapsed_units: u64,
        split_numerator: f64,
        split_denominator: f64,
        target_delta: f64,
    ) -> Self {
        Self {
            principal,
            elapsed_units,
            split_numerator,
            split_denominator,
            target_delta,
        }
    }

    /// Principal plus compound interest after `elapsed_units` steps at `x`.
    pub fn accrued_amount(&self, x: f64) -> f64 {
        self.principal * (1.0 + x).powf(self.elapsed_units as f64)
    }

    /// Checks the constants for consistency.
    pub fn validate(&self) -> Result<(), String> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(format!("principal must be positive, got {}", self.principal));
        }
        if self.elapsed_units == 0 {
            return Err("elapsed_units must be at least 1".to_string());
        }
        if !self.split_numerator.is_finite() || !self.split_denominator.is_finite() {
            return Err("split fraction must be finite".to_string());
        }
        if self.split_denominator == 0.0 {
            return Err("split_denominator must be non-zero".to_string());
        }
        if !self.target_delta.is_finite() {
            return Err("target_delta must be finite".to_string());
        }
        Ok(())
    }
}

impl ObjectiveFunction for AccrualEquation {
    fn evaluate(&self, x: f64) -> f64 {
        (self.accrued_amount(x) - self.principal) * self.split_numerator / self.split_denominator
            - self.target_delta
    }

    fn family(&self) -> Family {
        Family::Accrual
    }
}

/// Equivalence between a per-step rate and a known coarser rate.
///
/// Strictly increasing in `x` for `x >= 0`, so a bracket starting at zero
/// holds at most one root.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RateEquivalence {
    /// Known rate per coarse step.
    pub reference_rate: f64,
    /// Coarse steps the reference rate compounds over.
    pub reference_units: u64,
    /// Fine steps covering the same period.
    #[serde(deserialize_with = "deserialize_steps")]
    pub elapsed_units: u64,
}

impl RateEquivalence {
    /// Creates a rate-equivalence equation.
    #[must_use]
    pub fn new(reference_rate: f64, reference_units: u64, elapsed_units: u64) -> Self {
        Self {
            reference_rate,
            reference_units,
            elapsed_units,
        }
    }

    /// Growth factor of the reference rate over its period.
    pub fn reference_growth(&self) -> f64 {
        (1.0 + self.reference_rate).powf(self.reference_units as f64)
    }

    /// Checks the constants for consistency.
    pub fn validate(&self) -> Result<(), String> {
        if !self.reference_rate.is_finite() || self.reference_rate <= -1.0 {
            return Err(format!(
                "reference_rate must be greater than -1, got {}",
                self.reference_rate
            ));
        }
        if self.reference_units == 0 || self.elapsed_units == 0 {
            return Err("step counts must be at least 1".to_string());
        }
        if !self.reference_growth().is_finite() {
            return Err("reference growth overflows".to_string());
        }
        Ok(())
    }
}

impl ObjectiveFunction for RateEquivalence {
    fn evaluate(&self, x: f64) -> f64 {
        (1.0 + x).powf(self.elapsed_units as f64) - self.reference_growth()
    }

    fn family(&self) -> Family {
        Family::RateEquivalence
    }
}

/// An objective of either family.
///
/// Scenario files select the variant with a `family` key:
///
/// ```rust
/// use accrue_rates::objective::{Family, Objective, ObjectiveFunction};
///
/// let objective: Objective = toml::from_str(
///     r#"
///     family = "rate_equivalence"
///     reference_rate = 0.001
///     reference_units = 1500
///     elapsed_units = { days = 1500, unit = "second" }
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(objective.family(), Family::RateEquivalence);
/// assert!(objective.evaluate(0.0) < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Objective {
    /// Accrual-matching equation.
    Accrual(AccrualEquation),
    /// Rate-equivalence equation.
    RateEquivalence(RateEquivalence),
}

impl Objective {
    /// Checks the constants of the wrapped equation.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Accrual(eq) => eq.validate(),
            Self::RateEquivalence(eq) => eq.validate(),
        }
    }
}

impl ObjectiveFunction for Objective {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Accrual(eq) => eq.evaluate(x),
            Self::RateEquivalence(eq) => eq.evaluate(x),
        }
    }

    fn family(&self) -> Family {
        match self {
            Self::Accrual(eq) => eq.family(),
            Self::RateEquivalence(eq) => eq.family(),
        }
    }
}

impl From<AccrualEquation> for Objective {
    fn from(eq: AccrualEquation) -> Self {
        Self::Accrual(eq)
    }
}

impl From<RateEquivalence> for Objective {
    fn from(eq: RateEquivalence) -> Self {
        Self::RateEquivalence(eq)
    }
}
