use std::ops::{Add, Mul};

// hand-rolled rather than num-complex so the escape loop stays explicit
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

/// Integer exponents up to this bound use repeated multiplication instead of polar form.
const MAX_INTEGER_POWER: f64 = 64.0;

impl Complex {
    pub const ZERO: Self = Self { real: 0.0, imag: 0.0 };
    pub const ONE: Self = Self { real: 1.0, imag: 0.0 };

    #[must_use]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    #[must_use]
    pub fn conj(self) -> Self {
        Self {
            real: self.real,
            imag: -self.imag,
        }
    }

    /// Folds both components into the first quadrant.
    #[must_use]
    pub fn abs_components(self) -> Self {
        Self {
            real: self.real.abs(),
            imag: self.imag.abs(),
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    #[must_use]
    pub fn powi(self, exponent: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            remaining >>= 1;
        }

        result
    }

    /// Raises to a real exponent.
    ///
    /// Squaring and small positive integer exponents are multiplied out; every
    /// other exponent (fractional, negative, zero) goes through polar form,
    /// `|z|^p * (cos(p*arg z) + i sin(p*arg z))`.
    #[must_use]
    pub fn powf(self, exponent: f64) -> Self {
        if exponent == 2.0 {
            return self * self;
        }

        if exponent.fract() == 0.0 && (1.0..=MAX_INTEGER_POWER).contains(&exponent) {
            return self.powi(exponent as u32);
        }

        let magnitude = self.magnitude().powf(exponent);
        let angle = self.imag.atan2(self.real) * exponent;

        Self {
            real: magnitude * angle.cos(),
            imag: magnitude * angle.sin(),
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Complex, expected: Complex) {
        assert!(
            (actual.real - expected.real).abs() < 1e-9 && (actual.imag - expected.imag).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_magnitude_squared() {
        let c = Complex::new(3.0, 4.0);
        assert_eq!(c.magnitude_squared(), 25.0); // 3² + 4² = 25
    }

    #[test]
    fn test_magnitude_squared_negative_real_and_imag() {
        let c = Complex::new(-3.0, -4.0);
        assert_eq!(c.magnitude_squared(), 25.0);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Complex::new(-3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Complex::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn test_add_negative() {
        let result = Complex::new(1.0, 2.0) + Complex::new(-3.0, -7.0);
        assert_eq!(result, Complex::new(-2.0, -5.0));
    }

    #[test]
    fn test_mul() {
        // (1 + 2i) * (3 + 4i) = 3 + 4i + 6i + 8i² = -5 + 10i
        let result = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert_eq!(result, Complex::new(-5.0, 10.0));
    }

    #[test]
    fn test_conj_negates_imaginary_part() {
        assert_eq!(Complex::new(1.5, -2.0).conj(), Complex::new(1.5, 2.0));
    }

    #[test]
    fn test_abs_components() {
        assert_eq!(
            Complex::new(-1.5, -2.0).abs_components(),
            Complex::new(1.5, 2.0)
        );
    }

    #[test]
    fn test_square_via_powf() {
        // (2 + 3i)² = 4 + 12i + 9i² = -5 + 12i
        let result = Complex::new(2.0, 3.0).powf(2.0);
        assert_eq!(result, Complex::new(-5.0, 12.0));
    }

    #[test]
    fn test_integer_power_matches_repeated_multiplication() {
        let z = Complex::new(0.3, -0.7);
        let expected = z * z * z * z * z;

        assert_close(z.powi(5), expected);
        assert_close(z.powf(5.0), expected);
    }

    #[test]
    fn test_powi_zero_is_one() {
        assert_eq!(Complex::new(4.0, 2.0).powi(0), Complex::ONE);
    }

    #[test]
    fn test_fractional_power_uses_polar_form() {
        // sqrt(-4) = 2i on the principal branch
        assert_close(Complex::new(-4.0, 0.0).powf(0.5), Complex::new(0.0, 2.0));
    }

    #[test]
    fn test_negative_power_is_reciprocal() {
        // 1 / (1 + i) = 0.5 - 0.5i
        assert_close(Complex::new(1.0, 1.0).powf(-1.0), Complex::new(0.5, -0.5));
    }

    #[test]
    fn test_zero_to_negative_power_is_not_finite() {
        assert!(!Complex::ZERO.powf(-2.5).is_finite());
    }
}
