use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_fractal::render_tiles::{
    RenderOutcome, TileRender, WorkerFault, render_tiles,
};
use crate::core::actions::generate_pixel_buffer::map_palette::map_palette;
use crate::core::actions::worker_pool::{WorkerPool, WorkerPoolError};
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;

/// What happened during one render besides the buffer itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub tiles: usize,
    /// Pixels classified interior after a NaN or infinity showed up.
    pub anomalies: usize,
    pub faults: Vec<WorkerFault>,
    pub elapsed: Duration,
}

impl RenderReport {
    /// True when some pixels hold fallback values instead of computed ones.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.anomalies > 0 || !self.faults.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterationRender {
    pub buffer: IterationBuffer,
    pub report: RenderReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelRender {
    pub pixels: PixelBuffer,
    pub report: RenderReport,
}

/// Splits renders into row tiles and runs them on a pool that lives as long
/// as the scheduler.
///
/// The pool is the only state; it holds nothing between renders, so one
/// scheduler can serve any number of requests.
#[derive(Debug)]
pub struct TileScheduler {
    pool: WorkerPool,
}

impl TileScheduler {
    pub fn new(workers: NonZeroUsize) -> Result<Self, WorkerPoolError> {
        Ok(Self {
            pool: WorkerPool::new(workers)?,
        })
    }

    /// One worker per hardware thread, or a single worker if that cannot be
    /// determined.
    pub fn with_available_parallelism() -> Result<Self, WorkerPoolError> {
        let workers = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);

        Self::new(workers)
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroUsize {
        self.pool.worker_count()
    }

    /// Joins every worker thread.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }

    pub fn render<C: CancelToken>(
        &self,
        request: &RenderRequest,
        cancel: &C,
    ) -> RenderOutcome<IterationRender> {
        let config = request.config();
        let algorithm = EscapeTimeAlgorithm::from_request(request);

        debug!(
            kind = %config.kind,
            width = request.width(),
            height = request.height(),
            zoom = config.zoom,
            max_iterations = config.max_iterations,
            "render started"
        );

        let start = Instant::now();
        let outcome = render_tiles(
            &self.pool,
            &algorithm,
            request.width(),
            request.height(),
            cancel,
        );
        let elapsed = start.elapsed();

        let TileRender {
            cells,
            tiles,
            anomalies,
            faults,
        } = match outcome {
            RenderOutcome::Completed(render) => render,
            RenderOutcome::Cancelled => {
                debug!(?elapsed, "render cancelled, result discarded");
                return RenderOutcome::Cancelled;
            }
        };

        if anomalies > 0 {
            warn!(anomalies, "pixels produced non-finite values and were marked interior");
        }
        debug!(?elapsed, tiles, "render finished");

        RenderOutcome::Completed(IterationRender {
            buffer: IterationBuffer::from_tiles(
                request.width(),
                request.height(),
                config.max_iterations,
                cells,
            ),
            report: RenderReport {
                tiles,
                anomalies,
                faults,
                elapsed,
            },
        })
    }

    /// Renders and colours with the request's palette.
    pub fn render_pixels<C: CancelToken>(
        &self,
        request: &RenderRequest,
        cancel: &C,
    ) -> RenderOutcome<PixelRender> {
        self.render(request, cancel).map(|render| PixelRender {
            pixels: self
                .pool
                .install(|| map_palette(&render.buffer, request.palette())),
            report: render.report,
        })
    }
}
