//! Dense score surfaces and best-placement selection.

use crate::method::Direction;

/// Best placement found on a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the pattern's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the pattern's top-left corner.
    pub y: usize,
    /// Score at the placement.
    pub score: f64,
}

/// One score per valid placement, row-major, `(W - w + 1) x (H - h + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ScoreSurface {
    pub(crate) fn new(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Scores in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the score for the placement at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Lowest-scoring placement, first in raster order on ties.
    pub fn min_loc(&self) -> Peak {
        self.best(Direction::Minimize)
    }

    /// Highest-scoring placement, first in raster order on ties.
    pub fn max_loc(&self) -> Peak {
        self.best(Direction::Maximize)
    }

    /// Best placement under `direction`.
    ///
    /// Scans in raster order and only replaces the incumbent on a strict
    /// improvement. Non-finite scores are never selected unless nothing else
    /// exists.
    pub fn best(&self, direction: Direction) -> Peak {
        let mut best = Peak {
            x: 0,
            y: 0,
            score: self.data.first().copied().unwrap_or(f64::NAN),
        };
        let mut have_finite = best.score.is_finite();

        for (idx, &score) in self.data.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            if !have_finite || direction.improves(score, best.score) {
                best = Peak {
                    x: idx % self.width,
                    y: idx / self.width,
                    score,
                };
                have_finite = true;
            }
        }
        best
    }
}
