//! Rounding of solver output for fixed-point consumers.
//!
//! A bisection root printed at 33 decimals carries far more digits than an
//! `f64` can hold. [`RoundingPolicy`] turns the raw root into a decimal with a
//! stated number of significant digits, and into the integer a contract
//! storing rates with `fixed_point_decimals` implied decimals would hold.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::{MathError, MathResult};

/// Largest number of significant digits a `Decimal` can carry.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 28;

/// Largest supported fixed-point scale (`10^18`, the usual token scale).
pub const MAX_FIXED_POINT_DECIMALS: u32 = 18;

/// Direction used when dropping digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round half away from zero.
    #[default]
    Nearest,
    /// Round away from zero.
    Up,
    /// Truncate toward zero.
    Down,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::Nearest => RoundingStrategy::MidpointAwayFromZero,
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
        }
    }
}

/// How a raw root is reduced before it is handed to a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoundingPolicy {
    /// Significant digits kept in the rounded value.
    #[serde(default = "default_significant_digits")]
    pub significant_digits: u32,

    /// Implied decimals of the fixed-point integer representation.
    #[serde(default = "default_fixed_point_decimals")]
    pub fixed_point_decimals: u32,

    /// Rounding direction.
    #[serde(default)]
    pub mode: RoundingMode,
}

fn default_significant_digits() -> u32 {
    10
}

fn default_fixed_point_decimals() -> u32 {
    18
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            significant_digits: default_significant_digits(),
            fixed_point_decimals: default_fixed_point_decimals(),
            mode: RoundingMode::default(),
        }
    }
}

/// A raw root together with its rounded forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedValue {
    /// The unmodified solver output.
    pub raw: f64,
    /// The value rounded to the policy's significant digits.
    pub rounded: Decimal,
    /// `rounded * 10^fixed_point_decimals`, truncated to an integer.
    pub fixed_point: i128,
}

impl RoundedValue {
    /// The rounded value converted back to `f64`.
    pub fn rounded_f64(&self) -> f64 {
        self.rounded.to_f64().unwrap_or(self.raw)
    }
}

impl RoundingPolicy {
    /// Creates a policy.
    #[must_use]
    pub fn new(significant_digits: u32, fixed_point_decimals: u32, mode: RoundingMode) -> Self {
        Self {
            significant_digits,
            fixed_point_decimals,
            mode,
        }
    }

    /// Sets the rounding mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RoundingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the digit counts against what `Decimal` can represent.
    pub fn validate(&self) -> MathResult<()> {
        if self.significant_digits == 0 || self.significant_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(MathError::invalid_input(format!(
                "significant_digits must be in 1..={MAX_SIGNIFICANT_DIGITS}, got {}",
                self.significant_digits
            )));
        }
        if self.fixed_point_decimals > MAX_FIXED_POINT_DECIMALS {
            return Err(MathError::invalid_input(format!(
                "fixed_point_decimals must be at most {MAX_FIXED_POINT_DECIMALS}, got {}",
                self.fixed_point_decimals
            )));
        }
        Ok(())
    }

    /// Rounds `value` according to this policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use accrue_math::rounding::{RoundingMode, RoundingPolicy};
    ///
    /// let policy = RoundingPolicy::new(3, 4, RoundingMode::Nearest);
    /// let value = policy.apply(0.012345).unwrap();
    ///
    /// assert_eq!(value.rounded.to_string(), "0.0123");
    /// assert_eq!(value.fixed_point, 123);
    /// ```
    pub fn apply(&self, value: f64) -> MathResult<RoundedValue> {
        self.validate()?;

        let exact = Decimal::from_f64_retain(value)
            .ok_or_else(|| MathError::rounding(value, "not representable as a decimal"))?;
        let rounded = exact
            .round_sf_with_strategy(self.significant_digits, self.mode.strategy())
            .ok_or_else(|| MathError::rounding(value, "significant-digit rounding overflowed"))?
            .normalize();

        let scale = Decimal::from(10_u64.pow(self.fixed_point_decimals));
        let fixed_point = rounded
            .checked_mul(scale)
            .and_then(|scaled| scaled.trunc().to_i128())
            .ok_or_else(|| MathError::rounding(value, "fixed-point value out of range"))?;

        Ok(RoundedValue {
            raw: value,
            rounded,
            fixed_point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PER_BLOCK_ROOT: f64 = 0.000000138802311089315088974755668;

    #[test]
    fn test_nearest() {
        let value = RoundingPolicy::default().apply(PER_BLOCK_ROOT).unwrap();

        assert_eq!(value.rounded, dec!(0.0000001388023111));
        assert_eq!(value.fixed_point, 138_802_311_100);
        assert_eq!(value.raw, PER_BLOCK_ROOT);
    }

    #[test]
    fn test_down_truncates() {
        let policy = RoundingPolicy::default().with_mode(RoundingMode::Down);
        let value = policy.apply(PER_BLOCK_ROOT).unwrap();

        assert_eq!(value.rounded, dec!(0.000000138802311));
        assert_eq!(value.fixed_point, 138_802_311_000);
    }

    #[test]
    fn test_modes_on_midpoint() {
        let nearest = RoundingPolicy::new(2, 2, RoundingMode::Nearest).apply(0.125).unwrap();
        let up = RoundingPolicy::new(2, 2, RoundingMode::Up).apply(0.121).unwrap();
        let down = RoundingPolicy::new(2, 2, RoundingMode::Down).apply(0.129).unwrap();

        assert_eq!(nearest.rounded, dec!(0.13));
        assert_eq!(up.rounded, dec!(0.13));
        assert_eq!(down.rounded, dec!(0.12));
        assert_eq!(nearest.fixed_point, 13);
        assert_eq!(down.fixed_point, 12);
    }

    #[test]
    fn test_zero() {
        let value = RoundingPolicy::default().apply(0.0).unwrap();

        assert!(value.rounded.is_zero());
        assert_eq!(value.fixed_point, 0);
    }

    #[test]
    fn test_nan_is_rejected() {
        let result = RoundingPolicy::default().apply(f64::NAN);

        assert!(matches!(result, Err(MathError::Rounding { .. })));
    }

    #[test]
    fn test_invalid_policy() {
        assert!(RoundingPolicy::new(0, 18, RoundingMode::Nearest).validate().is_err());
        assert!(RoundingPolicy::new(29, 18, RoundingMode::Nearest).validate().is_err());
        assert!(RoundingPolicy::new(10, 19, RoundingMode::Nearest).validate().is_err());
    }

    #[test]
    fn test_rounded_f64_round_trips() {
        let value = RoundingPolicy::default().apply(PER_BLOCK_ROOT).unwrap();

        assert!((value.rounded_f64() - 1.388023111e-7).abs() < 1e-20);
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        #[derive(Deserialize)]
        struct Wrapper {
            rounding: RoundingPolicy,
        }

        let wrapper: Wrapper = serde_json::from_str(r#"{"rounding": {"mode": "down"}}"#).unwrap();
        assert_eq!(wrapper.rounding.mode, RoundingMode::Down);
        assert_eq!(wrapper.rounding.significant_digits, 10);
        assert_eq!(wrapper.rounding.fixed_point_decimals, 18);
    }
}
