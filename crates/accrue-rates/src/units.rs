//! Compounding step counts.
//!
//! Rates are calibrated per atomic step: one block, or one second. Scenario
//! files may state the step count directly or as a number of days at a given
//! step length.

use serde::{Deserialize, Deserializer};

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// The atomic compounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Interest compounds every second.
    Second,
    /// Interest compounds once per block.
    Block {
        /// Block time in seconds.
        seconds: u64,
    },
}

impl TimeUnit {
    /// Ethereum mainnet block time.
    pub const ETHEREUM_BLOCK: Self = Self::Block { seconds: 12 };

    /// Length of one step in seconds.
    pub fn seconds(self) -> u64 {
        match self {
            Self::Second => 1,
            Self::Block { seconds } => seconds,
        }
    }

    /// Number of steps elapsed over `days`.
    ///
    /// Fails when the period is not a whole number of steps.
    ///
    /// ```rust
    /// use accrue_rates::units::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::ETHEREUM_BLOCK.steps_in_days(1500), Ok(1500 * 24 * 60 * 5));
    /// assert_eq!(TimeUnit::Second.steps_in_days(1500), Ok(1500 * 24 * 60 * 60));
    /// ```
    pub fn steps_in_days(self, days: u64) -> Result<u64, String> {
        let step = self.seconds();
        if step == 0 {
            return Err("step length must be at least one second".to_string());
        }
        let total = days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or_else(|| format!("{days} days overflows a second count"))?;
        if total % step != 0 {
            return Err(format!(
                "{days} days is not a whole number of {step}-second steps"
            ));
        }
        Ok(total / step)
    }
}

/// Step count as written in a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ElapsedSpec {
    Steps(u64),
    Period { days: u64, unit: TimeUnit },
}

/// Deserializes a step count given either as an integer or as
/// `{ days = .., unit = .. }`.
pub(crate) fn deserialize_steps<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match ElapsedSpec::deserialize(deserializer)? {
        ElapsedSpec::Steps(steps) => Ok(steps),
        ElapsedSpec::Period { days, unit } => {
            unit.steps_in_days(days).map_err(serde::de::Error::custom)
        }
    }
}
