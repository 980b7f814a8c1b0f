//! Conversion between [`Circuit`] and [`CircuitDocument`].

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use qcanvas_ir::{Circuit, Complex, Gate, Qubit};
use tracing::{debug, warn};

use crate::document::{
    CircuitDocument, GateEntry, Gates, InitialState, Meta, NAMESPACE, QubitEntry,
};
use crate::error::{DocError, DocResult};

/// Parse a document into a fresh circuit.
///
/// Nothing is returned unless the whole document is valid. Gate entries are
/// placed in column order, so documents listing gates out of order still load.
pub fn load(xml: &str) -> DocResult<Circuit> {
    let doc = CircuitDocument::from_xml(xml)?;
    into_circuit(&doc)
}

/// Render a circuit, stamped with the current local time.
pub fn save(circuit: &Circuit) -> DocResult<String> {
    save_with_date(circuit, &Local::now())
}

/// Render a circuit with an explicit save timestamp.
pub fn save_with_date<Tz>(circuit: &Circuit, date: &DateTime<Tz>) -> DocResult<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    from_circuit(circuit, date.to_rfc3339()).to_xml()
}

/// Build the document model for a circuit.
///
/// Gates are listed by column, then by lowest wire.
pub fn from_circuit(circuit: &Circuit, date: String) -> CircuitDocument {
    let qubits = circuit
        .initial_values()
        .iter()
        .enumerate()
        .map(|(wire, qubit)| QubitEntry {
            wire: wire.to_string(),
            x_re: number(qubit.x().re()),
            x_im: number(qubit.x().im()),
            y_re: number(qubit.y().re()),
            y_im: number(qubit.y().im()),
        })
        .collect();

    let mut gates: Vec<&Gate> = circuit.gates().collect();
    gates.sort_by_key(|g| (g.column(), g.min_wire()));
    let gates = gates
        .into_iter()
        .map(|gate| GateEntry {
            position: gate.column().to_string(),
            gate_type: gate.gate_type().to_string(),
            parameter_value: Some(number(gate.parameter().unwrap_or(0.0))),
            wires: gate.wires().iter().map(ToString::to_string).collect(),
        })
        .collect();

    CircuitDocument {
        xmlns: Some(NAMESPACE.to_string()),
        meta: Some(Meta { date: Some(date) }),
        initial_state: Some(InitialState { qubits }),
        gates: Some(Gates { gates }),
    }
}

/// Validate a document and build the circuit it describes.
pub fn into_circuit(doc: &CircuitDocument) -> DocResult<Circuit> {
    if doc.xmlns.as_deref().is_some_and(|ns| ns != NAMESPACE) {
        warn!(xmlns = ?doc.xmlns, "unexpected document namespace");
    }

    let initial = doc
        .initial_state
        .as_ref()
        .ok_or(DocError::MissingElement("InitialState"))?;
    let mut qubits = Vec::with_capacity(initial.qubits.len());
    for (expected, entry) in initial.qubits.iter().enumerate() {
        let found: usize = parse("wire", &entry.wire)?;
        if found != expected {
            return Err(DocError::WireOrder { expected, found });
        }
        qubits.push(Qubit::new(
            Complex::new(parse("xR", &entry.x_re)?, parse("xI", &entry.x_im)?),
            Complex::new(parse("yR", &entry.y_re)?, parse("yI", &entry.y_im)?),
        ));
    }

    let entries = doc
        .gates
        .as_ref()
        .ok_or(DocError::MissingElement("Gates"))?;
    let mut gates = entries
        .gates
        .iter()
        .map(gate_from_entry)
        .collect::<DocResult<Vec<_>>>()?;
    gates.sort_by_key(Gate::column);

    let mut circuit = Circuit::from_initial_values(qubits);
    for gate in gates {
        circuit.restore_gate(gate)?;
    }
    debug!(
        wires = circuit.num_wires(),
        gates = circuit.num_gates(),
        "loaded circuit document"
    );
    Ok(circuit)
}

fn gate_from_entry(entry: &GateEntry) -> DocResult<Gate> {
    let column: usize = parse("position", &entry.position)?;
    let parameter: f64 = match entry.parameter_value.as_deref() {
        Some(value) => parse("parameterValue", value)?,
        None => 0.0,
    };
    let wires = entry
        .wires
        .iter()
        .map(|w| parse("Wire", w))
        .collect::<DocResult<Vec<usize>>>()?;
    Ok(Gate::new(&entry.gate_type, column, wires, parameter)?)
}

fn parse<T: FromStr>(attribute: &str, value: &str) -> DocResult<T> {
    value.trim().parse().map_err(|_| DocError::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

/// Shortest text that parses back to the same `f64`, always with a
/// fractional part (`0.0`, `1.0`, `0.7071067811865476`).
fn number(value: f64) -> String {
    format!("{value:?}")
}
