use crate::core::data::complex::Complex;
use crate::core::data::fractal_config::{FractalConfig, MAX_ZOOM};
use crate::core::util::numeric_field::NumericField;

/// Zoom multiplier for one scroll-wheel notch.
pub const ZOOM_STEP_FACTOR: f64 = 1.2;

/// Wheel zoom-out stops here.
pub const MIN_NAVIGATION_ZOOM: f64 = 0.1;

impl FractalConfig {
    /// View after dragging the image by `(dx, dy)` pixels.
    ///
    /// The plane moves with the cursor, so the center moves the opposite way.
    #[must_use]
    pub fn panned_by_pixels(&self, dx: f64, dy: f64, width: u32, height: u32) -> Self {
        let pixel_size = NumericField::new(self.center, self.zoom, width, height).pixel_size();

        self.with_center(Complex {
            real: self.center.real - dx * pixel_size,
            imag: self.center.imag - dy * pixel_size,
        })
    }

    /// View after `steps` wheel notches; positive zooms in.
    #[must_use]
    pub fn zoomed_by_steps(&self, steps: i32) -> Self {
        let zoom = self.zoom * ZOOM_STEP_FACTOR.powi(steps);

        self.with_zoom(zoom.clamp(MIN_NAVIGATION_ZOOM, MAX_ZOOM))
    }
}
