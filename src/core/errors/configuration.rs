use crate::core::data::complex::Complex;
use thiserror::Error;

/// A render or animation request that cannot be computed.
///
/// Always raised before any pixel is evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("zoom must be greater than 0 and at most {max}, got {zoom}")]
    ZoomOutOfRange { zoom: f64, max: f64 },
    #[error("image dimensions must be between 1 and {max} pixels, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("power must be a finite number, got {0}")]
    NonFinitePower(f64),
    #[error("{name} must be finite, got ({}, {})", .value.real, .value.imag)]
    NonFiniteCoordinate { name: &'static str, value: Complex },
    #[error("unknown fractal variant '{0}'")]
    UnknownFractalKind(String),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("an animation needs at least one frame")]
    ZeroFrameCount,
}

/// Lower-cases a display name and drops separators so "Burning Ship",
/// "burning_ship" and "burning-ship" compare equal.
pub(crate) fn normalise_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
