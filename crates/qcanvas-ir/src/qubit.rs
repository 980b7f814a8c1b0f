//! Single two-level quantum states.

use ndarray::array;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::complex::Complex;
use crate::error::{IrError, IrResult};
use crate::matrix::Matrix;

/// A qubit as a 2×1 column of amplitudes, `x|0⟩ + y|1⟩`.
///
/// Equality is structural on both amplitudes and inherits the exact
/// comparison of [`Complex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    x: Complex,
    y: Complex,
}

impl Qubit {
    /// The basis state |0⟩.
    pub const ZERO: Qubit = Qubit {
        x: Complex::ONE,
        y: Complex::ZERO,
    };

    /// The basis state |1⟩.
    pub const ONE: Qubit = Qubit {
        x: Complex::ZERO,
        y: Complex::ONE,
    };

    /// Create a qubit from explicit amplitudes.
    pub fn new(x: Complex, y: Complex) -> Self {
        Self { x, y }
    }

    /// Prepare a qubit from a classical bit.
    pub fn from_bit(bit: u8) -> IrResult<Self> {
        match bit {
            0 => Ok(Self::ZERO),
            1 => Ok(Self::ONE),
            other => Err(IrError::InvalidClassicalBit(other)),
        }
    }

    /// Amplitude of |0⟩.
    pub fn x(&self) -> Complex {
        self.x
    }

    /// Amplitude of |1⟩.
    pub fn y(&self) -> Complex {
        self.y
    }

    /// The ket as a 2×1 matrix `[[x], [y]]`.
    pub fn state(&self) -> Matrix {
        array![[self.x.to_complex64()], [self.y.to_complex64()]]
    }

    /// Total probability, `|x|² + |y|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.x.norm_sqr() + self.y.norm_sqr()
    }
}

impl Default for Qubit {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ZERO {
            write!(f, "|0>")
        } else if *self == Self::ONE {
            write!(f, "|1>")
        } else {
            write!(f, "{}|0> + {}|1>", self.x, self.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_from_bit() {
        assert_eq!(Qubit::from_bit(0).unwrap(), Qubit::ZERO);
        assert_eq!(Qubit::from_bit(1).unwrap(), Qubit::ONE);
        assert_eq!(Qubit::from_bit(2), Err(IrError::InvalidClassicalBit(2)));
    }

    #[test]
    fn test_state_column() {
        let ket = Qubit::ONE.state();
        assert_eq!(ket.shape(), &[2, 1]);
        assert_eq!(ket[[0, 0]], Complex64::new(0.0, 0.0));
        assert_eq!(ket[[1, 0]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Qubit::ZERO.to_string(), "|0>");
        assert_eq!(Qubit::ONE.to_string(), "|1>");

        let plus = Qubit::new(Complex::real(0.5f64.sqrt()), Complex::real(0.5f64.sqrt()));
        assert_eq!(plus.to_string(), "0.707|0> + 0.707|1>");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Qubit::new(Complex::real(1.0), Complex::ZERO);
        assert_eq!(a, Qubit::ZERO);
        assert_ne!(Qubit::ZERO, Qubit::ONE);
        assert!((Qubit::ZERO.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_json() {
        let json = serde_json::to_string(&Qubit::ONE).unwrap();
        assert_eq!(json, r#"{"x":[0.0,0.0],"y":[1.0,0.0]}"#);
        let back: Qubit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Qubit::ONE);
    }
}
