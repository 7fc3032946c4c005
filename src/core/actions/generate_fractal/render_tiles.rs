use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{error, trace};

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::worker_pool::WorkerPool;
use crate::core::data::point::Point;
use crate::core::util::calculate_tile_bands::calculate_tile_bands;

/// A tile whose computation panicked. Its rows hold the algorithm's fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tile {tile} (rows {}..{}) failed: {message}", .rows.start, .rows.end)]
pub struct WorkerFault {
    pub tile: usize,
    pub rows: Range<u32>,
    pub message: String,
}

/// Either the finished value or notice that the caller cancelled.
///
/// Cancellation is not an error: no partial value is ever carried.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> RenderOutcome<T> {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RenderOutcome<U> {
        match self {
            Self::Completed(value) => RenderOutcome::Completed(f(value)),
            Self::Cancelled => RenderOutcome::Cancelled,
        }
    }
}

/// Row-major cells for the whole image plus what went wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRender<T> {
    pub cells: Vec<T>,
    pub tiles: usize,
    /// Pixels whose computation failed and were stored as the fallback value.
    pub anomalies: usize,
    pub faults: Vec<WorkerFault>,
}

enum TileOutcome<T> {
    Computed { cells: Vec<T>, anomalies: usize },
    Faulted { cells: Vec<T>, fault: WorkerFault },
    Cancelled,
}

/// Computes every pixel of a `width`x`height` image on the pool, one tile of
/// whole rows per worker.
///
/// Tiles write to their own vectors and are concatenated in row order after
/// the join, so the result does not depend on completion order. The token is
/// polled at the start of every row and every [`CANCEL_CHECK_INTERVAL_PIXELS`]
/// pixels; if any tile sees it, the whole render is cancelled. It is not
/// checked again after the join.
pub fn render_tiles<Alg, C>(
    pool: &WorkerPool,
    algorithm: &Alg,
    width: u32,
    height: u32,
    cancel: &C,
) -> RenderOutcome<TileRender<Alg::Success>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    C: CancelToken,
{
    let bands = calculate_tile_bands(height, pool.worker_count());
    let tiles = bands.len();

    let outcomes: Vec<TileOutcome<Alg::Success>> = pool.install(|| {
        bands
            .into_par_iter()
            .enumerate()
            .map(|(tile, rows)| run_tile(tile, rows, width, algorithm, cancel))
            .collect()
    });

    let mut render = TileRender {
        cells: Vec::with_capacity(width as usize * height as usize),
        tiles,
        anomalies: 0,
        faults: Vec::new(),
    };

    for outcome in outcomes {
        match outcome {
            TileOutcome::Computed { cells, anomalies } => {
                render.cells.extend(cells);
                render.anomalies += anomalies;
            }
            TileOutcome::Faulted { cells, fault } => {
                render.cells.extend(cells);
                render.faults.push(fault);
            }
            TileOutcome::Cancelled => return RenderOutcome::Cancelled,
        }
    }

    RenderOutcome::Completed(render)
}

fn run_tile<Alg, C>(
    tile: usize,
    rows: Range<u32>,
    width: u32,
    algorithm: &Alg,
    cancel: &C,
) -> TileOutcome<Alg::Success>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    let computed = panic::catch_unwind(AssertUnwindSafe(|| {
        compute_tile(rows.clone(), width, algorithm, cancel)
    }));

    match computed {
        Ok(Some((cells, anomalies))) => TileOutcome::Computed { cells, anomalies },
        Ok(None) => TileOutcome::Cancelled,
        Err(payload) => {
            let fault = WorkerFault {
                tile,
                rows: rows.clone(),
                message: panic_message(payload.as_ref()),
            };
            error!(%fault, "worker fault, tile filled with fallback values");

            let size = rows.len() * width as usize;
            let cells = std::iter::repeat_with(|| algorithm.fallback())
                .take(size)
                .collect();

            TileOutcome::Faulted { cells, fault }
        }
    }
}

/// Returns `None` once cancellation is observed.
fn compute_tile<Alg, C>(
    rows: Range<u32>,
    width: u32,
    algorithm: &Alg,
    cancel: &C,
) -> Option<(Vec<Alg::Success>, usize)>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    let mut cells = Vec::with_capacity(rows.len() * width as usize);
    let mut anomalies = 0;

    for y in rows {
        for (i, x) in (0..width).enumerate() {
            if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                return None;
            }

            let pixel = Point { x, y };
            match algorithm.compute(pixel) {
                Ok(value) => cells.push(value),
                Err(err) => {
                    trace!(x, y, %err, "pixel fell back");
                    anomalies += 1;
                    cells.push(algorithm.fallback());
                }
            }
        }
    }

    Some((cells, anomalies))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::{CancellationToken, NeverCancel};
    use std::error::Error;
    use std::fmt;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    #[derive(Debug)]
    struct StubSuccessAlgorithm {}

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok(u64::from(pixel.x) * 1000 + u64::from(pixel.y))
        }

        fn fallback(&self) -> Self::Success {
            u64::MAX
        }
    }

    /// Fails on every pixel in column 0.
    #[derive(Debug)]
    struct StubFirstColumnFails {}

    impl FractalAlgorithm for StubFirstColumnFails {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel.x == 0 {
                Err(StubError {})
            } else {
                Ok(1)
            }
        }

        fn fallback(&self) -> Self::Success {
            0
        }
    }

    #[derive(Debug)]
    struct StubPanicsOnRow {
        row: u32,
    }

    impl FractalAlgorithm for StubPanicsOnRow {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel.y == self.row {
                panic!("numeric blow-up on row {}", pixel.y);
            }
            Ok(1)
        }

        fn fallback(&self) -> Self::Success {
            0
        }
    }

    fn pool(workers: usize) -> WorkerPool {
        WorkerPool::new(NonZeroUsize::new(workers).unwrap()).unwrap()
    }

    fn serial(width: u32, height: u32) -> Vec<u64> {
        let algorithm = StubSuccessAlgorithm {};
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Point { x, y }))
            .map(|pixel| algorithm.compute(pixel).unwrap())
            .collect()
    }

    #[test]
    fn test_tiles_assemble_in_row_major_order() {
        let render = render_tiles(&pool(3), &StubSuccessAlgorithm {}, 11, 9, &NeverCancel)
            .completed()
            .unwrap();

        assert_eq!(render.cells, serial(11, 9));
        assert_eq!(render.tiles, 3);
        assert_eq!(render.anomalies, 0);
        assert!(render.faults.is_empty());
    }

    #[test]
    fn test_result_is_independent_of_worker_count() {
        let algorithm = StubSuccessAlgorithm {};
        let single = render_tiles(&pool(1), &algorithm, 37, 23, &NeverCancel);
        let many = render_tiles(&pool(8), &algorithm, 37, 23, &NeverCancel);

        assert_eq!(
            single.completed().unwrap().cells,
            many.completed().unwrap().cells
        );
    }

    #[test]
    fn test_more_workers_than_rows_uses_one_tile_per_row() {
        let render = render_tiles(&pool(8), &StubSuccessAlgorithm {}, 4, 2, &NeverCancel)
            .completed()
            .unwrap();

        assert_eq!(render.tiles, 2);
        assert_eq!(render.cells, serial(4, 2));
    }

    #[test]
    fn test_failed_pixels_use_fallback_and_are_counted() {
        let render = render_tiles(&pool(2), &StubFirstColumnFails {}, 5, 6, &NeverCancel)
            .completed()
            .unwrap();

        assert_eq!(render.anomalies, 6);
        assert!(render.faults.is_empty());
        for row in render.cells.chunks(5) {
            assert_eq!(row, &[0, 1, 1, 1, 1]);
        }
    }

    #[test]
    fn test_panicking_tile_is_filled_and_reported() {
        let algorithm = StubPanicsOnRow { row: 3 };
        let render = render_tiles(&pool(4), &algorithm, 3, 8, &NeverCancel)
            .completed()
            .unwrap();

        assert_eq!(render.faults.len(), 1);
        let fault = &render.faults[0];
        assert_eq!(fault.tile, 1);
        assert_eq!(fault.rows, 2..4);
        assert_eq!(fault.message, "numeric blow-up on row 3");

        // rows 2 and 3 belong to the faulted tile, everything else computed
        let (before, rest) = render.cells.split_at(2 * 3);
        let (faulted, after) = rest.split_at(2 * 3);
        assert!(before.iter().all(|&cell| cell == 1));
        assert!(faulted.iter().all(|&cell| cell == 0));
        assert!(after.iter().all(|&cell| cell == 1));
    }

    #[test]
    fn test_worker_fault_display() {
        let fault = WorkerFault {
            tile: 2,
            rows: 10..20,
            message: "boom".to_string(),
        };

        assert_eq!(fault.to_string(), "tile 2 (rows 10..20) failed: boom");
    }

    #[test]
    fn test_cancelled_before_start_returns_cancelled() {
        let token = CancellationToken::new();
        token.cancel();

        let result = render_tiles(&pool(4), &StubSuccessAlgorithm {}, 16, 16, &token);

        assert!(result.is_cancelled());
        assert_eq!(result, RenderOutcome::Cancelled);
    }

    #[test]
    fn test_cancels_after_k_polls() {
        let poll_count = AtomicUsize::new(0);
        let cancel_after = 3;
        let cancel_token = || poll_count.fetch_add(1, Ordering::Relaxed) >= cancel_after;

        let result = render_tiles(&pool(2), &StubSuccessAlgorithm {}, 6, 6, &cancel_token);

        assert!(result.is_cancelled());
        assert!(poll_count.load(Ordering::Relaxed) >= cancel_after);
    }

    #[test]
    fn test_cancellation_polled_at_row_start() {
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        let result = render_tiles(&pool(2), &StubSuccessAlgorithm {}, 2, 5, &cancel_token);

        assert!(!result.is_cancelled());
        assert_eq!(poll_count.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_cancellation_polled_within_wide_rows() {
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        // polls at 0, 1024 and 2048 in each of the two rows
        let result = render_tiles(&pool(1), &StubSuccessAlgorithm {}, 3000, 2, &cancel_token);

        assert!(!result.is_cancelled());
        assert_eq!(poll_count.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_cancel_after_completion_keeps_result() {
        let token = CancellationToken::new();

        let result = render_tiles(&pool(2), &StubSuccessAlgorithm {}, 4, 4, &token);
        token.cancel();

        assert_eq!(result.completed().unwrap().cells, serial(4, 4));
    }

    #[test]
    fn test_outcome_map_preserves_cancellation() {
        let completed: RenderOutcome<u32> = RenderOutcome::Completed(2);
        let cancelled: RenderOutcome<u32> = RenderOutcome::Cancelled;

        assert_eq!(completed.map(|v| v * 10), RenderOutcome::Completed(20));
        assert_eq!(cancelled.map(|v| v * 10), RenderOutcome::Cancelled);
    }
}
