//! # Accrue Rates
//!
//! Calibrates per-step interest rates from observed accrual outcomes.
//!
//! A lending test that lets a principal compound for a known number of blocks
//! or seconds, and then observes the payout, pins down the per-step rate
//! implicitly. This crate states that relationship as an objective function
//! and solves it by bisection:
//!
//! - **Objectives**: accrual matching and rate equivalence ([`objective`])
//! - **Units**: step counts from days and block times ([`units`])
//! - **Scenarios**: constants, bracket, tolerance and rounding ([`scenario`])
//! - **Catalog**: TOML scenario collections, including a built-in one ([`catalog`])
//!
//! ## Example
//!
//! ```rust
//! use accrue_rates::prelude::*;
//!
//! let scenario = Scenario::new(
//!     "per-block",
//!     AccrualEquation::new(2000.0, 1500 * 24 * 60 * 5, 3.0, 13.0, 1605.0),
//!     [0.0, 0.0001],
//!     1e-21,
//! );
//!
//! let solution = scenario.solve().unwrap();
//! assert!((solution.rate() - 1.388023110893e-7).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]

pub mod catalog;
pub mod error;
pub mod objective;
pub mod scenario;
pub mod units;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::error::{RateError, RateResult};
    pub use crate::objective::{AccrualEquation, Family, Objective, ObjectiveFunction, RateEquivalence};
    pub use crate::scenario::{RateSolution, Scenario};
    pub use crate::units::TimeUnit;
    pub use accrue_math::rounding::{RoundingMode, RoundingPolicy};
}

pub use catalog::Catalog;
pub use error::{RateError, RateResult};
pub use scenario::{RateSolution, Scenario};
