//! Accrue CLI - solves the built-in rate calibration scenarios.
//!
//! # Usage
//!
//! ```bash
//! # Print every calibrated rate
//! accrue
//!
//! # Include solver diagnostics on stderr
//! RUST_LOG=debug accrue
//! ```

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accrue_rates::Catalog;

mod output;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Accrue v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::builtin().context("loading built-in scenarios")?;
    info!("Loaded {} scenarios", catalog.len());

    for scenario in catalog.scenarios() {
        let solution = scenario
            .solve()
            .with_context(|| format!("solving scenario '{}'", scenario.name))?;
        output::print_solution(scenario, &solution);
    }

    Ok(())
}
