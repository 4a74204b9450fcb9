//! Plain-text rendering of a projection for the terminal.

use std::fmt::Write;

use crate::core::{ComparisonDataset, SimulationParameters, SimulationResult, Strategy};
use crate::export::{HEADERS, format_currency};

pub fn render_projection(params: &SimulationParameters, result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Proyección de Pensión - {}", params.strategy.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>4}  {:>5}  {:>20}", "#", HEADERS[0], HEADERS[1]);
    for (index, record) in result.years.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>5}  {:>20}",
            index + 1,
            record.year,
            format_currency(record.accumulated_balance)
        );
    }
    out
}

pub fn render_summary(result: &SimulationResult) -> String {
    format!(
        "Retorno total: {}\nPensión mensual estimada (20 años de retiro): {}\n",
        format_currency(result.total_return),
        format_currency(result.estimated_monthly_pension)
    )
}

/// One row per year, one balance column per strategy.
pub fn render_comparison(dataset: &ComparisonDataset) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>5}", HEADERS[0]);
    for strategy in Strategy::ALL {
        let _ = write!(out, "  {:>20}", strategy.label());
    }
    let _ = writeln!(out);

    let series: Vec<Vec<f64>> = Strategy::ALL
        .iter()
        .map(|strategy| {
            dataset
                .records_for(*strategy)
                .map(|r| r.accumulated_balance)
                .collect()
        })
        .collect();
    let years: Vec<u32> = dataset
        .records_for(Strategy::ALL[0])
        .map(|r| r.year)
        .collect();

    for (row, year) in years.iter().enumerate() {
        let _ = write!(out, "{year:>5}");
        for balances in &series {
            let cell = balances
                .get(row)
                .map(|b| format_currency(*b))
                .unwrap_or_default();
            let _ = write!(out, "  {cell:>20}");
        }
        let _ = writeln!(out);
    }
    out
}
