use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::iteration_buffer::Escape;
use crate::core::data::point::Point;
use crate::core::data::render_request::RenderRequest;
use crate::core::fractals::escape_time::evaluate::{NumericAnomaly, evaluate};
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::util::numeric_field::{NumericField, NumericFieldError};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum EscapeTimeError {
    #[error(transparent)]
    Field(#[from] NumericFieldError),
    #[error(transparent)]
    Anomaly(#[from] NumericAnomaly),
}

/// Per-pixel escape-time computation for one render request.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeTimeAlgorithm {
    field: NumericField,
    kind: FractalKind,
    julia_constant: Complex,
    power: f64,
    max_iterations: u32,
}

impl EscapeTimeAlgorithm {
    #[must_use]
    pub fn from_request(request: &RenderRequest) -> Self {
        let config = request.config();

        Self {
            field: NumericField::for_request(request),
            kind: config.kind,
            julia_constant: config.julia_constant,
            power: config.power,
            max_iterations: config.max_iterations,
        }
    }
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = Escape;
    type Failure = EscapeTimeError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let point = self.field.pixel_to_point(pixel)?;

        Ok(evaluate(
            point,
            self.kind,
            self.julia_constant,
            self.power,
            self.max_iterations,
        )?)
    }

    fn fallback(&self) -> Self::Success {
        Escape::interior(self.max_iterations)
    }
}
