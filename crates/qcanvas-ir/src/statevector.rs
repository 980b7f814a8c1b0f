//! State vectors produced by circuit propagation.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::complex::Complex;
use crate::matrix::{self, Matrix};
use crate::qubit::Qubit;

/// A joint state over every wire of a circuit.
///
/// Amplitude `i` belongs to the basis state whose binary expansion lists the
/// wires from 0 (most significant) to `n - 1` (least significant).
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Array1<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Tensor product of the given kets, first qubit most significant.
    ///
    /// An empty slice yields the one-dimensional state `[1]`.
    pub fn from_qubits(qubits: &[Qubit]) -> Self {
        let joint = qubits
            .iter()
            .fold(Array2::from_elem((1, 1), Complex64::new(1.0, 0.0)), |acc, q| {
                matrix::tensor(&acc, &q.state())
            });
        Self {
            amplitudes: joint.column(0).to_owned(),
            num_qubits: qubits.len(),
        }
    }

    /// Apply a full-width operator, returning the new state.
    ///
    /// # Panics
    ///
    /// Panics if the operator is not `len() × len()`.
    #[must_use]
    pub fn evolve(&self, operator: &Matrix) -> Self {
        assert_eq!(
            operator.dim(),
            (self.len(), self.len()),
            "operator does not match a {}-qubit state",
            self.num_qubits
        );
        Self {
            amplitudes: operator.dot(&self.amplitudes),
            num_qubits: self.num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a state has at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Option<Complex> {
        self.amplitudes.get(index).copied().map(Complex::from)
    }

    /// Total probability; 1 for a normalised state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability that `wire` measures |1⟩.
    pub fn probability_of_one(&self, wire: usize) -> f64 {
        if wire >= self.num_qubits {
            return 0.0;
        }
        let mask = 1usize << (self.num_qubits - 1 - wire);
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(row, _)| row & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Per-wire probabilities of measuring |1⟩, highest wire index first.
    pub fn qubit_probabilities(&self) -> Vec<f64> {
        (0..self.num_qubits)
            .rev()
            .map(|wire| self.probability_of_one(wire))
            .collect()
    }

    /// Ket label for basis state `index`, wire 0 leftmost, e.g. `|10⟩`.
    pub fn basis_label(&self, index: usize) -> String {
        format!("|{:0width$b}⟩", index, width = self.num_qubits)
    }
}
