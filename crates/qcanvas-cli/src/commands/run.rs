//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;
use tracing::info;

use qcanvas_ir::{Circuit, Statevector};

use super::common::{format_amplitude, load_circuit};
use crate::config::{Config, OutputFormat};

/// Simulation results for one document.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub wires: usize,
    pub gates: usize,
    /// Per-wire probability labels, highest wire first.
    pub labels: Vec<String>,
    pub columns: Vec<ColumnReport>,
}

/// Results after the gates of all earlier columns have acted.
#[derive(Debug, Serialize)]
pub struct ColumnReport {
    pub column: usize,
    /// P(|1⟩) per wire, highest wire first.
    pub probabilities: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<AmplitudeReport>>,
}

/// One basis amplitude.
#[derive(Debug, Serialize)]
pub struct AmplitudeReport {
    pub basis: String,
    pub re: f64,
    pub im: f64,
}

/// Execute the run command.
pub fn execute(
    input: &Path,
    columns: Option<usize>,
    format: Option<OutputFormat>,
    states: bool,
    config: &Config,
) -> Result<()> {
    let mut circuit = load_circuit(input, config)?;
    info!(
        wires = circuit.num_wires(),
        gates = circuit.num_gates(),
        "loaded {}",
        input.display()
    );

    let limit = columns.unwrap_or(config.simulation.display_columns);
    let report = simulate(&mut circuit, limit, states);

    match format.unwrap_or(config.output.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(input, &report, config.output.precision),
    }
    Ok(())
}

/// Simulate columns `0..=min(max_column + 1, limit)`.
pub fn simulate(circuit: &mut Circuit, limit: usize, states: bool) -> RunReport {
    let last = circuit.max_column().map_or(0, |c| c + 1).min(limit);
    let wires = circuit.num_wires();

    let columns = (0..=last)
        .map(|column| {
            let state = circuit.state(column);
            ColumnReport {
                column,
                probabilities: state.qubit_probabilities(),
                state: states.then(|| amplitudes(&state)),
            }
        })
        .collect();

    RunReport {
        wires,
        gates: circuit.num_gates(),
        labels: (0..wires).rev().map(|w| format!("q{w}")).collect(),
        columns,
    }
}

fn amplitudes(state: &Statevector) -> Vec<AmplitudeReport> {
    (0..state.len())
        .filter_map(|i| {
            let amp = state.amplitude(i)?;
            Some(AmplitudeReport {
                basis: state.basis_label(i),
                re: amp.re(),
                im: amp.im(),
            })
        })
        .collect()
}

fn print_table(input: &Path, report: &RunReport, precision: usize) {
    println!(
        "{} Simulated {} ({} wires, {} gates)",
        style("→").cyan().bold(),
        style(input.display()).green(),
        report.wires,
        report.gates
    );

    let width = (precision + 3).max(4);
    let header: String = report
        .labels
        .iter()
        .map(|l| format!(" {l:>width$}"))
        .collect();
    println!("\n  {}{}", style(format!("{:>6}", "column")).bold(), style(header).bold());

    for col in &report.columns {
        let row: String = col
            .probabilities
            .iter()
            .map(|p| format!(" {p:>width$.precision$}"))
            .collect();
        println!("  {:>6}{}", style(col.column).yellow(), row);

        if let Some(state) = &col.state {
            for amp in state.iter().filter(|a| a.re != 0.0 || a.im != 0.0) {
                println!(
                    "  {:>6} {} {}",
                    "",
                    style(&amp.basis).cyan(),
                    format_amplitude(qcanvas_ir::Complex::new(amp.re, amp.im), precision)
                );
            }
        }
    }
}
