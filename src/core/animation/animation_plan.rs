use std::time::Duration;

use crate::core::data::complex::Complex;
use crate::core::data::render_request::RenderRequest;
use crate::core::errors::configuration::ConfigurationError;

pub const DEFAULT_FRAME_COUNT: usize = 20;
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(100);

/// Zoom for frame `index` of `frame_count`, interpolated in log space.
///
/// The first frame is exactly `start_zoom` and the last exactly `end_zoom`.
#[must_use]
pub fn interpolate_zoom(start_zoom: f64, end_zoom: f64, index: usize, frame_count: usize) -> f64 {
    if frame_count <= 1 || index == 0 {
        return start_zoom;
    }
    if index >= frame_count - 1 {
        return end_zoom;
    }

    let t = index as f64 / (frame_count - 1) as f64;
    start_zoom * (end_zoom / start_zoom).powf(t)
}

fn interpolate_center(start: Complex, end: Complex, index: usize, frame_count: usize) -> Complex {
    if frame_count <= 1 || index == 0 {
        return start;
    }
    if index >= frame_count - 1 {
        return end;
    }

    let t = index as f64 / (frame_count - 1) as f64;
    Complex::new(
        start.real + (end.real - start.real) * t,
        start.imag + (end.imag - start.imag) * t,
    )
}

/// One validated request per frame, built before any frame renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    frames: Vec<RenderRequest>,
    frame_duration: Duration,
}

impl AnimationPlan {
    /// Zooms from `start` to `end_zoom` around a fixed center.
    pub fn new(
        start: &RenderRequest,
        end_zoom: f64,
        frame_count: usize,
        frame_duration: Duration,
    ) -> Result<Self, ConfigurationError> {
        Self::towards(start, start.config().center, end_zoom, frame_count, frame_duration)
    }

    /// Like [`AnimationPlan::new`], also moving the center linearly to `end_center`.
    pub fn towards(
        start: &RenderRequest,
        end_center: Complex,
        end_zoom: f64,
        frame_count: usize,
        frame_duration: Duration,
    ) -> Result<Self, ConfigurationError> {
        if frame_count == 0 {
            return Err(ConfigurationError::ZeroFrameCount);
        }

        let start_config = *start.config();
        start.with_config(start_config.with_zoom(end_zoom).with_center(end_center))?;

        let frames = (0..frame_count)
            .map(|index| {
                let config = start_config
                    .with_zoom(interpolate_zoom(start_config.zoom, end_zoom, index, frame_count))
                    .with_center(interpolate_center(
                        start_config.center,
                        end_center,
                        index,
                        frame_count,
                    ));
                start.with_config(config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            frames,
            frame_duration,
        })
    }

    #[must_use]
    pub fn frames(&self) -> &[RenderRequest] {
        &self.frames
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Saturates at `Duration::MAX`.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        u32::try_from(self.frames.len())
            .ok()
            .and_then(|frames| self.frame_duration.checked_mul(frames))
            .unwrap_or(Duration::MAX)
    }
}
