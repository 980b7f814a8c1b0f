//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use qcanvas_ir::{Circuit, Complex};
use qcanvas_xml::CircuitDocument;

use crate::config::Config;

/// Read a circuit document from disk without building the circuit.
pub fn read_document(path: &Path) -> Result<CircuitDocument> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    CircuitDocument::from_xml(&source)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load a circuit document and check it against the configured width.
pub fn load_circuit(path: &Path, config: &Config) -> Result<Circuit> {
    let doc = read_document(path)?;
    let circuit = qcanvas_xml::into_circuit(&doc)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    check_width(circuit.num_wires(), config)?;
    Ok(circuit)
}

/// Save a circuit document, creating parent directories as needed.
pub fn save_circuit(path: &Path, circuit: &Circuit) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let xml = qcanvas_xml::save(circuit)?;
    fs::write(path, xml).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Reject circuits wider than `simulation.max_wires`.
pub fn check_width(num_wires: usize, config: &Config) -> Result<()> {
    let max = config.simulation.max_wires;
    if num_wires > max {
        anyhow::bail!("Circuit has {num_wires} wires; the configured limit is {max} (simulation.max_wires)");
    }
    Ok(())
}

/// Render an amplitude with a fixed number of decimals, e.g. `0.707` or
/// `0.5-0.5i`.
pub fn format_amplitude(value: Complex, precision: usize) -> String {
    // +0.0 folds negative zero
    let re = value.re() + 0.0;
    let im = value.im() + 0.0;
    let threshold = 0.5 * 10f64.powi(-(precision as i32));
    if im.abs() < threshold {
        format!("{re:.precision$}")
    } else if re.abs() < threshold {
        format!("{im:.precision$}i")
    } else {
        format!("{re:.precision$}{im:+.precision$}i")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amplitude() {
        assert_eq!(format_amplitude(Complex::real(1.0), 3), "1.000");
        assert_eq!(format_amplitude(Complex::new(0.0, -0.5), 2), "-0.50i");
        assert_eq!(format_amplitude(Complex::new(0.5, -0.5), 1), "0.5-0.5i");
        assert_eq!(format_amplitude(Complex::real(-0.0), 3), "0.000");
    }

    #[test]
    fn test_check_width() {
        let config = Config::default();
        assert!(check_width(11, &config).is_ok());
        assert!(check_width(12, &config).is_err());
    }
}
