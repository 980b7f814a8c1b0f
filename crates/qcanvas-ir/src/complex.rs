//! Complex amplitude value type.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Number of decimal digits kept when rendering a [`Complex`].
pub const PRECISION: i32 = 3;

/// An immutable complex number.
///
/// Equality and hashing compare the bit patterns of both parts, so values that
/// are mathematically equal but were reached through different rounding paths
/// compare unequal, and `0.0 != -0.0`. Use [`Complex::approx_eq`] when a
/// tolerance is wanted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Complex(Complex64);

impl Complex {
    /// The additive identity.
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    /// The multiplicative identity.
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    /// The imaginary unit.
    pub const I: Complex = Complex::new(0.0, 1.0);

    /// Create a complex number from its parts.
    #[inline]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self(Complex64::new(real, imaginary))
    }

    /// Create a real-only complex number.
    #[inline]
    pub const fn real(real: f64) -> Self {
        Self::new(real, 0.0)
    }

    /// The real part.
    #[inline]
    pub fn re(&self) -> f64 {
        self.0.re
    }

    /// The imaginary part.
    #[inline]
    pub fn im(&self) -> f64 {
        self.0.im
    }

    /// Sum of two complex numbers.
    #[must_use]
    pub fn add(self, other: Complex) -> Complex {
        Complex(self.0 + other.0)
    }

    /// Product of two complex numbers.
    #[must_use]
    pub fn multiply(self, other: Complex) -> Complex {
        Complex(self.0 * other.0)
    }

    /// Distance from the origin, `sqrt(re² + im²)`.
    pub fn modulus(&self) -> f64 {
        (self.0.re * self.0.re + self.0.im * self.0.im).sqrt()
    }

    /// Squared modulus.
    pub fn norm_sqr(&self) -> f64 {
        self.0.norm_sqr()
    }

    /// Compare within an absolute tolerance on both parts.
    pub fn approx_eq(&self, other: &Complex, tolerance: f64) -> bool {
        (self.0.re - other.0.re).abs() <= tolerance && (self.0.im - other.0.im).abs() <= tolerance
    }

    /// The underlying `num-complex` value.
    #[inline]
    pub fn to_complex64(self) -> Complex64 {
        self.0
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.0.re.to_bits() == other.0.re.to_bits() && self.0.im.to_bits() == other.0.im.to_bits()
    }
}

impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.re.to_bits().hash(state);
        self.0.im.to_bits().hash(state);
    }
}

impl From<Complex64> for Complex {
    fn from(value: Complex64) -> Self {
        Complex(value)
    }
}

impl From<Complex> for Complex64 {
    fn from(value: Complex) -> Self {
        value.0
    }
}

impl From<f64> for Complex {
    fn from(value: f64) -> Self {
        Complex::real(value)
    }
}

/// Round to [`PRECISION`] decimal digits, folding `-0.0` into `0.0`.
fn rounded(value: f64) -> f64 {
    let scale = 10f64.powi(PRECISION);
    (value * scale).round() / scale + 0.0
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.im != 0.0 {
            write!(f, "({:?} + {:?}i)", rounded(self.0.re), rounded(self.0.im))
        } else {
            write!(f, "{:?}", rounded(self.0.re))
        }
    }
}
