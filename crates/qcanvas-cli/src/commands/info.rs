//! Info command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcanvas_ir::{Circuit, Gate};

use super::common::{check_width, read_document};
use crate::config::Config;

/// Execute the info command.
pub fn execute(input: &Path, config: &Config) -> Result<()> {
    let doc = read_document(input)?;
    let circuit = qcanvas_xml::into_circuit(&doc)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    println!("{} {}", style("Circuit:").bold(), style(input.display()).green());
    if let Some(saved) = doc.saved_at() {
        println!("  Saved:  {}", saved.format("%Y-%m-%d %H:%M:%S %:z"));
    }
    println!("  Wires:  {}", circuit.num_wires());
    println!("  Gates:  {}", circuit.num_gates());
    if let Err(e) = check_width(circuit.num_wires(), config) {
        println!("  {} {e}", style("!").yellow().bold());
    }

    println!("\n{}", style("Initial state:").bold());
    for (wire, qubit) in circuit.initial_values().iter().enumerate() {
        println!("  q{wire}: {qubit}");
    }

    let columns = describe_columns(&circuit);
    if !columns.is_empty() {
        println!("\n{}", style("Gates:").bold());
        for (column, gates) in columns {
            println!("  {:>3}: {}", style(column).yellow(), gates.join("  "));
        }
    }

    Ok(())
}

/// One line per occupied column, e.g. `(0, ["H[0]", "CNOT[1,2]"])`.
pub fn describe_columns(circuit: &Circuit) -> Vec<(usize, Vec<String>)> {
    let Some(max) = circuit.max_column() else {
        return Vec::new();
    };
    (0..=max)
        .filter_map(|column| {
            let gates = circuit.gates_in_column(column);
            (!gates.is_empty()).then(|| (column, gates.into_iter().map(describe_gate).collect()))
        })
        .collect()
}

fn describe_gate(gate: &Gate) -> String {
    let wires: Vec<String> = gate.wires().iter().map(ToString::to_string).collect();
    match gate.parameter() {
        Some(theta) => format!("{gate}({theta:.3})[{}]", wires.join(",")),
        None => format!("{gate}[{}]", wires.join(",")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_columns() {
        let mut circuit = Circuit::with_wires(3);
        circuit.set_gate(Gate::single("H", 0, 0).unwrap()).unwrap();
        circuit
            .set_gate(Gate::rotation("Rz", std::f64::consts::FRAC_PI_2, 0, 2).unwrap())
            .unwrap();
        circuit
            .set_gate(Gate::controlled("CNOT", 1, vec![0, 1]).unwrap())
            .unwrap();

        let lines = describe_columns(&circuit);
        assert_eq!(
            lines,
            vec![
                (0, vec!["H[0]".to_string(), "Rz(1.571)[2]".to_string()]),
                (1, vec!["CNOT[0,1]".to_string()]),
            ]
        );
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe_columns(&Circuit::with_wires(2)).is_empty());
    }
}
