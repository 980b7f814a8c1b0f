//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate type tag is not part of any catalog.
    #[error("Unsupported gate type '{gate_type}'")]
    InvalidConfiguration {
        /// The unrecognised tag.
        gate_type: String,
    },

    /// Gate type is known but cannot be placed on these wires.
    #[error("Gate '{gate_type}' does not support wires {wires:?}")]
    UnsupportedTopology {
        /// The gate type tag.
        gate_type: String,
        /// The wire arrangement that was rejected.
        wires: Vec<usize>,
    },

    /// Gate was constructed without any wires.
    #[error("Gate '{gate_type}' needs at least one wire")]
    EmptyWireList {
        /// The gate type tag.
        gate_type: String,
    },

    /// A wire index lies outside the circuit.
    #[error("Wire {wire} out of range for a circuit with {num_wires} wires")]
    WireOutOfRange {
        /// The offending wire index.
        wire: usize,
        /// Number of wires in the circuit.
        num_wires: usize,
    },

    /// A qubit can only be prepared from the classical bits 0 and 1.
    #[error("Classical bit must be 0 or 1, got {0}")]
    InvalidClassicalBit(u8),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
