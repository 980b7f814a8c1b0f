//! Dense complex operators and the bit-pattern builders behind controlled gates.
//!
//! Basis ordering throughout the crate puts the lowest wire index in the most
//! significant bit: for a matrix spanning `span` wires starting at wire `m`,
//! wire `m + k` owns bit `span - 1 - k` of every row/column index.

use ndarray::{Array2, array};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

/// A dense complex matrix, used for both operators and column kets.
pub type Matrix = Array2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// The `dim × dim` identity.
pub fn identity(dim: usize) -> Matrix {
    Array2::eye(dim)
}

/// Kronecker product `a ⊗ b`; `a` occupies the more significant bits.
pub fn tensor(a: &Matrix, b: &Matrix) -> Matrix {
    ndarray::linalg::kron(a, b)
}

// =========================================================================
// Single-wire operators
// =========================================================================

/// Pauli-X.
pub fn pauli_x() -> Matrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y.
pub fn pauli_y() -> Matrix {
    array![
        [ZERO, Complex64::new(0.0, -1.0)],
        [Complex64::new(0.0, 1.0), ZERO]
    ]
}

/// Pauli-Z.
pub fn pauli_z() -> Matrix {
    array![[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]]
}

/// Hadamard.
pub fn hadamard() -> Matrix {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    array![[h, h], [h, -h]]
}

/// Phase gate S = diag(1, i).
pub fn phase_s() -> Matrix {
    array![[ONE, ZERO], [ZERO, Complex64::new(0.0, 1.0)]]
}

/// T = diag(1, e^{iπ/4}).
pub fn phase_t() -> Matrix {
    array![
        [ONE, ZERO],
        [ZERO, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)]
    ]
}

/// Rotation about X by `theta`.
pub fn rx(theta: f64) -> Matrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    array![[c, s], [s, c]]
}

/// Rotation about Y by `theta`.
pub fn ry(theta: f64) -> Matrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    array![[c, -s], [s, c]]
}

/// Rotation about Z by `theta`.
pub fn rz(theta: f64) -> Matrix {
    array![
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)]
    ]
}

// =========================================================================
// Controlled embedding
// =========================================================================

/// Embed a 2×2 operator on one wire of a `span`-wire block, conditioned on
/// control wires.
///
/// `controls` and `target` are offsets within the block (0 = the block's
/// lowest wire, i.e. the most significant bit). Rows whose control bits all
/// equal `active` (1 for ordinary controls, 0 for control-on-zero) receive
/// `op` on the target bit; every other row is left as identity.
///
/// The caller is responsible for offsets being distinct and `< span`.
pub fn controlled(op: &Matrix, span: usize, controls: &[usize], target: usize, active: bool) -> Matrix {
    debug_assert_eq!(op.shape(), &[2, 2]);
    let dim = 1usize << span;
    let bit = |offset: usize| 1usize << (span - 1 - offset);

    let control_mask = controls.iter().fold(0usize, |mask, &c| mask | bit(c));
    let wanted = if active { control_mask } else { 0 };
    let target_bit = bit(target);

    let mut out = identity(dim);
    for row in (0..dim).filter(|r| r & target_bit == 0 && r & control_mask == wanted) {
        let flipped = row | target_bit;
        out[[row, row]] = op[[0, 0]];
        out[[row, flipped]] = op[[0, 1]];
        out[[flipped, row]] = op[[1, 0]];
        out[[flipped, flipped]] = op[[1, 1]];
    }
    out
}

/// Maximum absolute entry-wise difference, for comparing operators in tests
/// and diagnostics.
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    if a.shape() != b.shape() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Whether `m` is unitary within `tolerance`.
pub fn is_unitary(m: &Matrix, tolerance: f64) -> bool {
    let (rows, cols) = m.dim();
    if rows != cols {
        return false;
    }
    let adjoint = m.t().mapv(|z| z.conj());
    max_abs_diff(&adjoint.dot(m), &identity(rows)) <= tolerance
}
