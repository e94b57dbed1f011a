//! Scenario catalogs.
//!
//! A catalog is a TOML document with one `[[scenario]]` table per rate to
//! calibrate. The catalog shipped with the crate is embedded at compile time
//! and returned by [`Catalog::builtin`].

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{RateError, RateResult};
use crate::scenario::{RateSolution, Scenario};

/// The catalog embedded in the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../scenarios.toml");

/// An ordered set of uniquely named scenarios.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(rename = "scenario", default)]
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Loads the built-in catalog.
    pub fn builtin() -> RateResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog.
    ///
    /// ```rust
    /// use accrue_rates::Catalog;
    ///
    /// let catalog = Catalog::from_toml_str(
    ///     r#"
    ///     [[scenario]]
    ///     name = "doubling"
    ///     bracket = [0.0, 0.01]
    ///     tolerance = 1e-12
    ///
    ///     [scenario.objective]
    ///     family = "rate_equivalence"
    ///     reference_rate = 1.0
    ///     reference_units = 1
    ///     elapsed_units = 1000
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(catalog.len(), 1);
    /// assert!(catalog.get("doubling").is_ok());
    /// ```
    pub fn from_toml_str(source: &str) -> RateResult<Self> {
        let catalog: Self = toml::from_str(source)?;

        let mut seen = HashSet::new();
        for scenario in &catalog.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(RateError::invalid_scenario(
                    &scenario.name,
                    "duplicate scenario name",
                ));
            }
            scenario.validate()?;
        }

        Ok(catalog)
    }

    /// Looks up a scenario by name.
    pub fn get(&self, name: &str) -> RateResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RateError::UnknownScenario(name.to_string()))
    }

    /// Scenarios in catalog order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true if the catalog holds no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Solves every scenario in order, stopping at the first failure.
    pub fn solve_all(&self) -> RateResult<Vec<RateSolution>> {
        self.scenarios.iter().map(Scenario::solve).collect()
    }
}
