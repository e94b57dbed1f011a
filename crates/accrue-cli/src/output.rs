//! Output formatting utilities.

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use accrue_rates::{RateSolution, Scenario};

/// Prints one solved scenario: a header, the raw root, and its rounded forms.
pub fn print_solution(scenario: &Scenario, solution: &RateSolution) {
    print_header(&format!("{} ({})", scenario.name, solution.family));
    if !scenario.description.is_empty() {
        println!("{}", scenario.description.dimmed());
    }
    println!("{solution}");
    print_table(&details(scenario, solution));
}

fn details(scenario: &Scenario, solution: &RateSolution) -> Vec<KeyValue> {
    let policy = &scenario.rounding;
    vec![
        KeyValue::new(
            format!("Rounded ({} significant digits, {:?})", policy.significant_digits, policy.mode),
            solution.rounded.rounded.to_string(),
        ),
        KeyValue::new(
            format!("Fixed point ({} decimals)", policy.fixed_point_decimals),
            solution.rounded.fixed_point.to_string(),
        ),
        KeyValue::new("Iterations", solution.result.iterations.to_string()),
        KeyValue::new("Residual", format!("{:.6e}", solution.result.residual)),
        KeyValue::new(
            "Residual at rounded rate",
            format!("{:.6e}", solution.rounded_residual),
        ),
    ]
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) {
    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints a header for a section.
fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Tabled)]
struct KeyValue {
    #[tabled(rename = "Metric")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl KeyValue {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
