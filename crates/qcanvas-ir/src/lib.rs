//! qcanvas circuit model
//!
//! This crate holds the computational core of qcanvas: a small state-vector
//! simulator for circuits drawn on a grid of wires and columns.
//!
//! # Core Components
//!
//! - **Values**: [`Complex`] amplitudes and single [`Qubit`] kets
//! - **Gates**: [`Gate`] values drawn from four fixed catalogs (see [`gate`]),
//!   each able to build its operator matrix
//! - **Circuit**: [`Circuit`] owns [`Wire`]s and placed gates, composes each
//!   column into one operator and propagates the [`Statevector`]
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qcanvas_ir::{Circuit, Gate};
//!
//! let mut circuit = Circuit::with_wires(2);
//! circuit.set_gate(Gate::single("H", 0, 0)?)?;
//! circuit.set_gate(Gate::controlled("CNOT", 1, vec![0, 1])?)?;
//!
//! let state = circuit.state(2);
//! assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
//!
//! let probs = circuit.probabilities(2);
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! # Ok::<(), qcanvas_ir::IrError>(())
//! ```
//!
//! # Basis ordering
//!
//! Wire 0 is the most significant bit of every basis index, so with two wires
//! amplitude 2 belongs to |10⟩ (wire 0 in |1⟩, wire 1 in |0⟩). Per-wire
//! probabilities are reported from the highest wire index down to wire 0.
//!
//! # Limits
//!
//! Each column operator is a dense `2^n × 2^n` matrix, so cost grows as
//! `4^n`. Circuits beyond a dozen wires are impractical.

mod cache;
pub mod circuit;
pub mod complex;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod qubit;
pub mod statevector;
pub mod wire;

pub use circuit::{Circuit, gates_collide};
pub use complex::Complex;
pub use error::{IrError, IrResult};
pub use gate::{Axis, Gate, GateKind, SingleOp, TargetOp};
pub use matrix::Matrix;
pub use qubit::Qubit;
pub use statevector::Statevector;
pub use wire::Wire;
