use crate::core::data::point::Point;
use thiserror::Error;

/// Result of iterating one point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Escape {
    /// Iterations taken before escaping, or the iteration limit for interior points.
    pub iterations: u32,
    pub escaped: bool,
    /// Continuous escape value; equals `iterations` for interior points.
    pub smoothed: f64,
}

impl Escape {
    #[must_use]
    pub fn escaped(iterations: u32, smoothed: f64) -> Self {
        Self {
            iterations,
            escaped: true,
            smoothed,
        }
    }

    #[must_use]
    pub fn interior(max_iterations: u32) -> Self {
        Self {
            iterations: max_iterations,
            escaped: false,
            smoothed: f64::from(max_iterations),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IterationBufferError {
    #[error("{width}x{height} grid needs {expected_cells} cells, got {cells}")]
    BoundsMismatch {
        width: u32,
        height: u32,
        expected_cells: usize,
        cells: usize,
    },
}

/// Row-major grid of escape results for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    width: u32,
    height: u32,
    max_iterations: u32,
    cells: Vec<Escape>,
}

impl IterationBuffer {
    pub fn from_cells(
        width: u32,
        height: u32,
        max_iterations: u32,
        cells: Vec<Escape>,
    ) -> Result<Self, IterationBufferError> {
        let expected_cells = width as usize * height as usize;

        if cells.len() != expected_cells {
            return Err(IterationBufferError::BoundsMismatch {
                width,
                height,
                expected_cells,
                cells: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            max_iterations,
            cells,
        })
    }

    /// Assembles a buffer from tile output that already covers every row.
    pub(crate) fn from_tiles(width: u32, height: u32, max_iterations: u32, cells: Vec<Escape>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);

        Self {
            width,
            height,
            max_iterations,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn cells(&self) -> &[Escape] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, pixel: Point) -> Option<&Escape> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return None;
        }

        self.cells
            .get(pixel.y as usize * self.width as usize + pixel.x as usize)
    }

    #[must_use]
    pub fn interior_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.escaped).count()
    }
}
