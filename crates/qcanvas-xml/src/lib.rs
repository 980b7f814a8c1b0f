//! Circuit document format for qcanvas
//!
//! Circuits are saved as XML documents listing each wire's initial qubit and
//! every placed gate. See [`document`] for the layout.
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qcanvas_ir::{Circuit, Gate};
//! use qcanvas_xml::{load, save};
//!
//! let mut circuit = Circuit::with_wires(2);
//! circuit.set_gate(Gate::single("H", 0, 0)?)?;
//! circuit.set_gate(Gate::controlled("CNOT", 1, vec![0, 1])?)?;
//!
//! let xml = save(&circuit)?;
//! assert!(xml.contains(r#"gateType="CNOT""#));
//!
//! let reloaded = load(&xml)?;
//! assert_eq!(reloaded.num_wires(), 2);
//! assert_eq!(reloaded.num_gates(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Validation
//!
//! Loading fails as a whole when a `Qubit` entry is out of order, a number
//! does not parse, a gate tag is unknown, or a gate has an unsupported wire
//! arrangement. Identity gates are accepted and dropped.

mod codec;
pub mod document;
mod error;

pub use codec::{from_circuit, into_circuit, load, save, save_with_date};
pub use document::CircuitDocument;
pub use error::{DocError, DocResult};
