//! New command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qcanvas_ir::{Circuit, Gate};

use super::common::{check_width, save_circuit};
use crate::cli::Demo;
use crate::config::Config;

/// Execute the new command.
pub fn execute(demo: Demo, output: &Path, wires: Option<usize>, config: &Config) -> Result<()> {
    let circuit = build(demo, wires)?;
    check_width(circuit.num_wires(), config)?;
    save_circuit(output, &circuit)?;

    println!(
        "{} Wrote {:?} circuit ({} wires, {} gates) to {}",
        style("✓").green().bold(),
        demo,
        circuit.num_wires(),
        circuit.num_gates(),
        style(output.display()).green()
    );
    Ok(())
}

/// Build a demo circuit.
pub fn build(demo: Demo, wires: Option<usize>) -> Result<Circuit> {
    if wires.is_some() && demo != Demo::Ghz {
        anyhow::bail!("--wires only applies to the ghz demo");
    }

    let circuit = match demo {
        Demo::Bell => {
            let mut circuit = Circuit::with_wires(2);
            circuit.set_gate(Gate::single("H", 0, 0)?)?;
            circuit.set_gate(Gate::controlled("CNOT", 1, vec![0, 1])?)?;
            circuit
        }
        Demo::Ghz => {
            let n = wires.unwrap_or(3);
            if n < 2 {
                anyhow::bail!("A GHZ circuit needs at least 2 wires, got {n}");
            }
            let mut circuit = Circuit::with_wires(n);
            circuit.set_gate(Gate::single("H", 0, 0)?)?;
            for w in 1..n {
                circuit.set_gate(Gate::controlled("CNOT", w, vec![w - 1, w])?)?;
            }
            circuit
        }
        Demo::Toffoli => {
            let mut circuit = Circuit::with_wires(3);
            circuit.set_gate(Gate::single("X", 0, 0)?)?;
            circuit.set_gate(Gate::single("X", 0, 1)?)?;
            circuit.set_gate(Gate::controlled("CCNOT", 1, vec![0, 1, 2])?)?;
            circuit
        }
    };
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell() {
        let mut circuit = build(Demo::Bell, None).unwrap();
        let probs = circuit.probabilities(2);
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ghz_width() {
        let mut circuit = build(Demo::Ghz, Some(4)).unwrap();
        assert_eq!(circuit.num_wires(), 4);
        assert_eq!(circuit.num_gates(), 4);
        let state = circuit.state(4);
        assert!((state.amplitude(0).unwrap().re() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((state.amplitude(15).unwrap().re() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);

        assert!(build(Demo::Ghz, Some(1)).is_err());
        assert!(build(Demo::Bell, Some(3)).is_err());
    }

    #[test]
    fn test_toffoli_flips_target() {
        let mut circuit = build(Demo::Toffoli, None).unwrap();
        assert_eq!(circuit.probabilities(2), vec![1.0, 1.0, 1.0]);
    }
}
