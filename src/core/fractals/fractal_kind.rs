use crate::core::data::complex::Complex;
use crate::core::errors::configuration::{ConfigurationError, normalise_name};
use std::fmt;
use std::str::FromStr;

/// The four escape-time families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia,
    BurningShip,
    Tricorn,
}

impl FractalKind {
    pub const ALL: &'static [Self] = &[
        Self::Mandelbrot,
        Self::Julia,
        Self::BurningShip,
        Self::Tricorn,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::BurningShip => "Burning Ship",
            Self::Tricorn => "Tricorn",
        }
    }

    /// Starting `(z0, c)` for a plane point.
    ///
    /// Julia iterates the point itself against a fixed constant; the others
    /// start from zero with the point as the additive term.
    #[must_use]
    pub fn initial_state(self, point: Complex, julia_constant: Complex) -> (Complex, Complex) {
        match self {
            Self::Julia => (point, julia_constant),
            Self::Mandelbrot | Self::BurningShip | Self::Tricorn => (Complex::ZERO, point),
        }
    }

    /// One application of the family's update rule.
    #[inline]
    #[must_use]
    pub fn step(self, z: Complex, c: Complex, power: f64) -> Complex {
        match self {
            Self::Mandelbrot | Self::Julia => z.powf(power) + c,
            Self::BurningShip => z.abs_components().powf(power) + c,
            Self::Tricorn => z.conj().powf(power) + c,
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for FractalKind {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_name(name);

        Self::ALL
            .iter()
            .copied()
            .find(|kind| normalise_name(kind.display_name()) == wanted)
            .ok_or_else(|| ConfigurationError::UnknownFractalKind(name.to_string()))
    }
}
