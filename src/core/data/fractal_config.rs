use crate::core::data::complex::Complex;
use crate::core::errors::configuration::ConfigurationError;
use crate::core::fractals::fractal_kind::FractalKind;

pub const MAX_ZOOM: f64 = 10_000.0;
pub const DEFAULT_MAX_ITERATIONS: u32 = 256;
pub const DEFAULT_POWER: f64 = 2.0;
pub const DEFAULT_JULIA_CONSTANT: Complex = Complex {
    real: -0.7,
    imag: 0.27,
};

/// Everything that decides which point of which fractal lands on a pixel.
///
/// A plain value: navigation and animation produce new configs rather than
/// mutating one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalConfig {
    pub kind: FractalKind,
    pub center: Complex,
    /// 1.0 is the base view; each doubling halves the visible plane width.
    pub zoom: f64,
    pub max_iterations: u32,
    pub power: f64,
    /// Only read when `kind` is Julia.
    pub julia_constant: Complex,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            kind: FractalKind::default(),
            center: Complex::ZERO,
            zoom: 1.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            power: DEFAULT_POWER,
            julia_constant: DEFAULT_JULIA_CONSTANT,
        }
    }
}

impl FractalConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.zoom > 0.0 && self.zoom <= MAX_ZOOM) {
            return Err(ConfigurationError::ZoomOutOfRange {
                zoom: self.zoom,
                max: MAX_ZOOM,
            });
        }

        if self.max_iterations == 0 {
            return Err(ConfigurationError::ZeroMaxIterations);
        }

        if !self.power.is_finite() {
            return Err(ConfigurationError::NonFinitePower(self.power));
        }

        if !self.center.is_finite() {
            return Err(ConfigurationError::NonFiniteCoordinate {
                name: "center",
                value: self.center,
            });
        }

        if !self.julia_constant.is_finite() {
            return Err(ConfigurationError::NonFiniteCoordinate {
                name: "julia constant",
                value: self.julia_constant,
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    #[must_use]
    pub fn with_center(self, center: Complex) -> Self {
        Self { center, ..self }
    }
}
