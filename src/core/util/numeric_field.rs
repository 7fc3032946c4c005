use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::render_request::RenderRequest;
use thiserror::Error;

/// Width of the visible plane at zoom 1.0.
pub const BASE_PLANE_WIDTH: f64 = 5.0;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum NumericFieldError {
    #[error("point (x: {}, y: {}) is outside the {width}x{height} image", .point.x, .point.y)]
    PointOutsideImage { point: Point, width: u32, height: u32 },
}

/// Maps image pixels onto the complex plane.
///
/// The plane is centred on `center` and is `BASE_PLANE_WIDTH / zoom` wide. Its
/// height follows the image aspect ratio so pixels stay square. Each pixel maps
/// to its own centre; row 0 holds the smallest imaginary values.
///
/// Past roughly 1e13 zoom neighbouring pixels would collapse onto the same
/// `f64`; the 10,000x ceiling keeps well clear of that.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NumericField {
    center: Complex,
    zoom: f64,
    width: u32,
    height: u32,
}

impl NumericField {
    #[must_use]
    pub fn new(center: Complex, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    #[must_use]
    pub fn for_request(request: &RenderRequest) -> Self {
        let config = request.config();
        Self::new(config.center, config.zoom, request.width(), request.height())
    }

    #[must_use]
    pub fn plane_width(&self) -> f64 {
        BASE_PLANE_WIDTH / self.zoom
    }

    #[must_use]
    pub fn plane_height(&self) -> f64 {
        self.plane_width() * f64::from(self.height) / f64::from(self.width)
    }

    /// Plane distance between neighbouring pixels, identical on both axes.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        self.plane_width() / f64::from(self.width)
    }

    pub fn pixel_to_point(&self, pixel: Point) -> Result<Complex, NumericFieldError> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return Err(NumericFieldError::PointOutsideImage {
                point: pixel,
                width: self.width,
                height: self.height,
            });
        }

        let relative_x = (f64::from(pixel.x) + 0.5) / f64::from(self.width) - 0.5;
        let relative_y = (f64::from(pixel.y) + 0.5) / f64::from(self.height) - 0.5;

        Ok(Complex {
            real: self.center.real + relative_x * self.plane_width(),
            imag: self.center.imag + relative_y * self.plane_height(),
        })
    }
}

pub fn pixel_to_point(
    px: u32,
    py: u32,
    width: u32,
    height: u32,
    center: Complex,
    zoom: f64,
) -> Result<Complex, NumericFieldError> {
    NumericField::new(center, zoom, width, height).pixel_to_point(Point { x: px, y: py })
}
