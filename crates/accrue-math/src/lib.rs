//! # Accrue Math
//!
//! Numerical building blocks for the Accrue rate calibrator.
//!
//! This crate provides:
//!
//! - **Solvers**: Guarded bisection root finding with an optional step observer
//! - **Rounding**: Significant-digit and fixed-point rounding of solver output
//!
//! ## Example
//!
//! ```rust
//! use accrue_math::prelude::*;
//!
//! let f = |x: f64| x * x - 2.0;
//! let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::excessive_precision)]

pub mod error;
pub mod rounding;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::rounding::{RoundedValue, RoundingMode, RoundingPolicy};
    pub use crate::solvers::{
        bisection, bisection_observed, BisectionSolver, BisectionStep, RootFinder, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
