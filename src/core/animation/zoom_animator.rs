use std::time::Duration;

use tracing::debug;

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_fractal::render_tiles::RenderOutcome;
use crate::core::actions::generate_fractal::tile_scheduler::{RenderReport, TileScheduler};
use crate::core::animation::animation_plan::AnimationPlan;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_config::FractalConfig;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use crate::core::errors::configuration::ConfigurationError;

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub index: usize,
    pub config: FractalConfig,
    pub duration: Duration,
    pub pixels: PixelBuffer,
    pub report: RenderReport,
}

/// Drives a [`TileScheduler`] once per planned frame.
#[derive(Debug, Clone, Copy)]
pub struct ZoomAnimator<'s> {
    scheduler: &'s TileScheduler,
}

impl<'s> ZoomAnimator<'s> {
    #[must_use]
    pub fn new(scheduler: &'s TileScheduler) -> Self {
        Self { scheduler }
    }

    pub fn plan(
        &self,
        start: &RenderRequest,
        end_zoom: f64,
        frame_count: usize,
        frame_duration: Duration,
    ) -> Result<AnimationPlan, ConfigurationError> {
        AnimationPlan::new(start, end_zoom, frame_count, frame_duration)
    }

    pub fn plan_towards(
        &self,
        start: &RenderRequest,
        end_center: Complex,
        end_zoom: f64,
        frame_count: usize,
        frame_duration: Duration,
    ) -> Result<AnimationPlan, ConfigurationError> {
        AnimationPlan::towards(start, end_center, end_zoom, frame_count, frame_duration)
    }

    /// Lazily renders the plan's frames in order.
    ///
    /// Nothing is rendered until the sequence is pulled. Calling `run` again
    /// with the same plan starts over from the first frame.
    pub fn run<'p, C: CancelToken>(
        &self,
        plan: &'p AnimationPlan,
        cancel: &'p C,
    ) -> FrameSequence<'s, 'p, C> {
        FrameSequence {
            scheduler: self.scheduler,
            plan,
            cancel,
            next: 0,
            cancelled: false,
        }
    }
}

/// Iterator over rendered frames. Ends early, for good, once cancelled;
/// frames already yielded stay valid.
#[derive(Debug)]
pub struct FrameSequence<'s, 'p, C> {
    scheduler: &'s TileScheduler,
    plan: &'p AnimationPlan,
    cancel: &'p C,
    next: usize,
    cancelled: bool,
}

impl<C> FrameSequence<'_, '_, C> {
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl<C: CancelToken> Iterator for FrameSequence<'_, '_, C> {
    type Item = AnimationFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cancelled {
            return None;
        }

        let index = self.next;
        let request = self.plan.frames().get(index)?;

        if self.cancel.is_cancelled() {
            debug!(frame = index, "animation cancelled");
            self.cancelled = true;
            return None;
        }

        match self.scheduler.render_pixels(request, self.cancel) {
            RenderOutcome::Completed(render) => {
                self.next += 1;
                debug!(
                    frame = index,
                    frames = self.plan.frame_count(),
                    zoom = request.config().zoom,
                    "frame rendered"
                );

                Some(AnimationFrame {
                    index,
                    config: *request.config(),
                    duration: self.plan.frame_duration(),
                    pixels: render.pixels,
                    report: render.report,
                })
            }
            RenderOutcome::Cancelled => {
                debug!(frame = index, "animation cancelled mid-frame");
                self.cancelled = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cancelled {
            return (0, Some(0));
        }

        (0, Some(self.plan.frame_count() - self.next))
    }
}
