//! Error types for the document codec.

use thiserror::Error;

/// Errors that can occur while reading or writing a circuit document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocError {
    /// The text is not well-formed XML or does not match the document shape.
    #[error("Malformed document: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The document could not be written.
    #[error("Failed to write document: {0}")]
    Write(#[from] quick_xml::SeError),

    /// A `Qubit` entry is out of place.
    #[error("The file format is corrupted: qubit {found} listed at position {expected}")]
    WireOrder { expected: usize, found: usize },

    /// An attribute or `Wire` text is not a valid number.
    #[error("The file format is corrupted: {attribute} = {value:?} is not a number")]
    InvalidNumber { attribute: String, value: String },

    /// A required element is absent.
    #[error("The file format is corrupted: missing <{0}>")]
    MissingElement(&'static str),

    /// A gate entry was rejected by the circuit.
    #[error("Circuit error: {0}")]
    Ir(#[from] qcanvas_ir::IrError),
}

/// Result type for document operations.
pub type DocResult<T> = Result<T, DocError>;
