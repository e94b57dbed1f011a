//! End-to-end checks of the built-in scenarios against previously published
//! rates.
//!
//! The published values were printed at 33 decimals. Only the leading digits
//! are meaningful since `1 + x` is resolved to about 2.2e-16 in `f64`, but the
//! solver is deterministic, so the full lines are pinned.

use accrue_math::solvers::bisection_observed;
use accrue_rates::objective::{AccrualEquation, ObjectiveFunction, RateEquivalence};
use accrue_rates::prelude::*;

/// Per-block rate printed by the original calibration run.
const PER_BLOCK_RATE: f64 = 0.000000138802311089315088974755668;

/// Per-second rate printed by the original calibration run.
const PER_SECOND_RATE: f64 = 0.000000011566858471034890953887952;

/// Per-second rate equivalent to 0.1% per day.
const PER_SECOND_FROM_DAILY_RATE: f64 = 0.000000011568290181457995110458397;

fn solve(name: &str) -> RateSolution {
    Catalog::builtin()
        .unwrap()
        .get(name)
        .unwrap()
        .solve()
        .unwrap()
}

#[test]
fn per_block_rate() {
    let solution = solve("per-block");

    assert!((solution.rate() - PER_BLOCK_RATE).abs() < 1e-15);
    assert_eq!(solution.raw_line(), "x ≈ 0.000000138802311089315088974755668");
    assert_eq!(solution.result.iterations, 56);
}

#[test]
fn per_second_rate() {
    let solution = solve("per-second");

    assert!((solution.rate() - PER_SECOND_RATE).abs() < 1e-15);
    assert_eq!(solution.raw_line(), "x ≈ 0.000000011566858471034890953887952");
    assert_eq!(solution.result.iterations, 53);
}

#[test]
fn per_second_rate_from_daily_rate() {
    let solution = solve("per-second-from-daily");

    assert!((solution.rate() - PER_SECOND_FROM_DAILY_RATE).abs() < 1e-14);
    assert_eq!(solution.raw_line(), "x ≈ 0.000000011568290181457995110458397");
    assert_eq!(solution.result.iterations, 29);
    assert_eq!(solution.family, Family::RateEquivalence);
}

#[test]
fn builtin_catalog_solves_in_order() {
    let solutions = Catalog::builtin().unwrap().solve_all().unwrap();
    let names: Vec<_> = solutions.iter().map(|s| s.scenario.as_str()).collect();

    assert_eq!(names, ["per-block", "per-second", "per-second-from-daily"]);
}

#[test]
fn solved_rate_reproduces_observed_share() {
    let per_block = AccrualEquation::new(2000.0, 1500 * 24 * 60 * 5, 3.0, 13.0, 1605.0);
    let solution = solve("per-block");

    let share = (per_block.accrued_amount(solution.rate()) - 2000.0) * 3.0 / 13.0;
    assert!((share - 1605.0).abs() < 1e-3);
}

#[test]
fn per_second_and_per_block_rates_agree() {
    // Compounding the per-second rate over one 12-second block lands close to
    // the per-block rate.
    let per_second = solve("per-second").rate();
    let per_block = solve("per-block").rate();

    let compounded = (1.0 + per_second).powi(12) - 1.0;
    assert!((compounded - per_block).abs() / per_block < 1e-6);
}

#[test]
fn published_rates_are_roots() {
    let per_second = AccrualEquation::new(2000.0, 1500 * 24 * 60 * 60, 3.0, 13.0, 1605.0);
    let from_daily = RateEquivalence::new(0.001, 1500, 129_600_000);

    assert!(per_second.evaluate(PER_SECOND_RATE).abs() < 0.01);
    assert!(from_daily.evaluate(PER_SECOND_FROM_DAILY_RATE).abs() < 1e-5);
}

#[test]
fn bracket_shrinks_around_root() {
    let scenario = Catalog::builtin().unwrap().get("per-block").unwrap().clone();
    let objective = scenario.objective;
    let [a, b] = scenario.bracket;

    let mut width = b - a;
    let result = bisection_observed(
        |x| objective.evaluate(x),
        a,
        b,
        &scenario.solver_config(),
        |step| {
            let [lo, hi] = step.bracket;
            // Midpoint rounding near 1e-7 is visible once the bracket is ~1e-21 wide.
            assert!(step.width() <= width * 0.51);
            assert!(objective.evaluate(lo) <= 0.0 && objective.evaluate(hi) >= 0.0);
            width = step.width();
        },
    )
    .unwrap();

    assert!((result.root - PER_BLOCK_RATE).abs() < 1e-15);
}

#[test]
fn rounding_policy_from_catalog_defaults() {
    let solution = solve("per-second");

    // 10 significant digits, 18 implied decimals.
    assert_eq!(solution.rounded.rounded.to_string(), "0.00000001156685847");
    assert_eq!(solution.rounded.fixed_point, 11_566_858_470);
}
