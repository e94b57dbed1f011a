//! Calibration scenarios and their solutions.

use std::fmt;

use accrue_math::rounding::{RoundedValue, RoundingPolicy};
use accrue_math::solvers::{BisectionSolver, RootFinder, SolverConfig, SolverResult};
use log::{debug, info};
use serde::Deserialize;

use crate::error::{RateError, RateResult};
use crate::objective::{Family, Objective, ObjectiveFunction};

/// Decimals printed for the raw root.
pub const RAW_DECIMALS: usize = 33;

fn default_max_iterations() -> u32 {
    accrue_math::solvers::DEFAULT_MAX_ITERATIONS
}

/// One rate to calibrate: an objective, the bracket holding its root, and
/// how precisely to solve and round it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Short identifier.
    pub name: String,

    /// Free-form description of where the constants come from.
    #[serde(default)]
    pub description: String,

    /// The equation to solve.
    pub objective: Objective,

    /// Interval on which the objective changes sign.
    pub bracket: [f64; 2],

    /// Convergence threshold on half the bracket width.
    pub tolerance: f64,

    /// Iteration cap for the solver.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Rounding applied to the raw root.
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

impl Scenario {
    /// Creates a scenario with the default iteration cap and rounding.
    pub fn new(
        name: impl Into<String>,
        objective: impl Into<Objective>,
        bracket: [f64; 2],
        tolerance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            objective: objective.into(),
            bracket,
            tolerance,
            max_iterations: default_max_iterations(),
            rounding: RoundingPolicy::default(),
        }
    }

    /// Sets the rounding policy.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Solver configuration for this scenario.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Checks constants, bracket, solver settings and rounding policy.
    pub fn validate(&self) -> RateResult<()> {
        self.objective
            .validate()
            .map_err(|reason| RateError::invalid_scenario(&self.name, reason))?;

        for &bound in &self.bracket {
            if bound.is_nan() || bound <= -1.0 {
                return Err(RateError::OutOfDomain { x: bound });
            }
            if bound.is_infinite() {
                return Err(RateError::invalid_scenario(
                    &self.name,
                    "bracket bounds must be finite",
                ));
            }
        }

        self.solver_config().validate()?;
        self.rounding.validate()?;
        Ok(())
    }

    /// Solves the scenario by bisection.
    pub fn solve(&self) -> RateResult<RateSolution> {
        self.solve_with(&BisectionSolver)
    }

    /// Solves the scenario with the given root finder.
    pub fn solve_with<S: RootFinder>(&self, solver: &S) -> RateResult<RateSolution> {
        self.validate()?;

        let [a, b] = self.bracket;
        debug!(
            "solving '{}' ({}) on [{a:e}, {b:e}] with {} to tolerance {:e}",
            self.name,
            self.objective.family(),
            solver.name(),
            self.tolerance
        );

        let objective = self.objective;
        let result = solver.find_root(|x| objective.evaluate(x), (a, b), &self.solver_config())?;
        let rounded = self.rounding.apply(result.root)?;
        let rounded_residual = objective.evaluate(rounded.rounded_f64());

        info!(
            "'{}' converged to {:e} in {} iterations",
            self.name, result.root, result.iterations
        );

        Ok(RateSolution {
            scenario: self.name.clone(),
            family: objective.family(),
            result,
            rounded,
            rounded_residual,
        })
    }
}

/// A solved scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSolution {
    /// Name of the solved scenario.
    pub scenario: String,
    /// Equation family of the objective.
    pub family: Family,
    /// Raw solver output.
    pub result: SolverResult,
    /// The root after applying the scenario's rounding policy.
    pub rounded: RoundedValue,
    /// Objective value at the rounded rate.
    pub rounded_residual: f64,
}

impl RateSolution {
    /// The unrounded root.
    pub fn rate(&self) -> f64 {
        self.result.root
    }

    /// The raw root at 33 decimals, e.g.
    /// `x ≈ 0.000000138802311089315088974755668`.
    pub fn raw_line(&self) -> String {
        format!("x ≈ {:.prec$}", self.result.root, prec = RAW_DECIMALS)
    }
}

impl fmt::Display for RateSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{AccrualEquation, RateEquivalence};
    use accrue_math::rounding::RoundingMode;
    use accrue_math::MathError;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn doubling() -> Scenario {
        // 1000 steps doubling a balance of 100: interest 100, all of it kept.
        Scenario::new(
            "doubling",
            AccrualEquation::new(100.0, 1000, 1.0, 1.0, 100.0),
            [0.0, 0.01],
            1e-15,
        )
    }

    #[test]
    fn test_solve_doubling_rate() {
        let solution = doubling().solve().unwrap();
        let expected = (2f64.ln() / 1000.0).exp_m1();

        assert_relative_eq!(solution.rate(), expected, epsilon = 1e-13);
        assert_eq!(solution.family, Family::Accrual);
        assert_eq!(solution.scenario, "doubling");
    }

    #[test]
    fn test_rounding_applied() {
        let scenario =
            doubling().with_rounding(RoundingPolicy::new(4, 8, RoundingMode::Nearest));
        let solution = scenario.solve().unwrap();

        // 2^(1/1000) - 1 = 0.000693387...
        assert_eq!(solution.rounded.rounded, dec!(0.0006934));
        assert_eq!(solution.rounded.fixed_point, 69_340);
        assert!(solution.rounded_residual.abs() < 0.01);
    }

    #[test]
    fn test_raw_line_format() {
        let solution = Scenario::new(
            "quarter",
            RateEquivalence::new(0.5625, 1, 2),
            [0.0, 1.0],
            1e-12,
        )
        .solve()
        .unwrap();

        // (1 + x)^2 = 1.5625  =>  x = 0.25, hit exactly on the second midpoint.
        assert_eq!(solution.rate(), 0.25);
        assert_eq!(
            solution.raw_line(),
            "x ≈ 0.250000000000000000000000000000000"
        );
        assert_eq!(solution.to_string(), solution.raw_line());
    }

    #[test]
    fn test_bracket_outside_domain() {
        let mut scenario = doubling();
        scenario.bracket = [-1.0, 0.01];

        assert!(matches!(
            scenario.solve(),
            Err(RateError::OutOfDomain { x }) if x == -1.0
        ));
    }

    #[test]
    fn test_bracket_without_sign_change() {
        let mut scenario = doubling();
        scenario.bracket = [0.001, 0.01];

        assert!(matches!(
            scenario.solve(),
            Err(RateError::Math(MathError::InvalidBracket { .. }))
        ));
    }

    #[test]
    fn test_iteration_cap_reported() {
        let scenario = doubling().with_max_iterations(10);

        assert!(matches!(
            scenario.solve(),
            Err(RateError::Math(MathError::ConvergenceFailed { iterations: 10, .. }))
        ));
    }

    #[test]
    fn test_invalid_constants() {
        let scenario = Scenario::new(
            "broken",
            AccrualEquation::new(100.0, 1000, 1.0, 0.0, 100.0),
            [0.0, 0.01],
            1e-12,
        );

        assert!(matches!(
            scenario.solve(),
            Err(RateError::InvalidScenario { ref name, .. }) if name == "broken"
        ));
    }

    #[test]
    fn test_solve_is_deterministic() {
        let scenario = doubling();
        assert_eq!(scenario.solve().unwrap(), scenario.solve().unwrap());
    }
}
