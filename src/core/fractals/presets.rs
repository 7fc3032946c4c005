use crate::core::data::complex::Complex;
use crate::core::data::fractal_config::FractalConfig;
use crate::core::errors::configuration::{ConfigurationError, normalise_name};
use crate::core::fractals::fractal_kind::FractalKind;
use std::fmt;
use std::str::FromStr;

/// Built-in starting views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Spiral,
    Seahorse,
}

impl Preset {
    pub const ALL: &'static [Self] = &[Self::Spiral, Self::Seahorse];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Spiral => "Spiral",
            Self::Seahorse => "Seahorse",
        }
    }

    /// The preset view; iteration limit stays at the default.
    #[must_use]
    pub fn config(self) -> FractalConfig {
        match self {
            Self::Spiral => FractalConfig {
                kind: FractalKind::Julia,
                julia_constant: Complex::new(-0.8, 0.156),
                ..FractalConfig::default()
            },
            Self::Seahorse => FractalConfig {
                kind: FractalKind::Mandelbrot,
                center: Complex::new(-0.75, 0.1),
                zoom: 100.0,
                ..FractalConfig::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for Preset {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_name(name);

        Self::ALL
            .iter()
            .copied()
            .find(|preset| normalise_name(preset.display_name()) == wanted)
            .ok_or_else(|| ConfigurationError::UnknownPreset(name.to_string()))
    }
}
