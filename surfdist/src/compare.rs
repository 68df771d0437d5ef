//! Pre/post event comparison.

use crate::error::LookupError;
use crate::estimator::{DistanceResult, SurfaceDistanceEstimator};
use crate::grid::{ElevationGrid, GridPoint};

/// Surface distances for the same pair of points on a pre-event and a
/// post-event grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceComparison {
    pub start: GridPoint,
    pub finish: GridPoint,
    pub pre: DistanceResult,
    pub post: DistanceResult,
}

impl SurfaceComparison {
    /// Estimate `start` to `finish` on both grids.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfBounds`] if either point lies outside
    /// either grid.
    pub fn between(
        estimator: &SurfaceDistanceEstimator,
        pre: &ElevationGrid,
        post: &ElevationGrid,
        start: GridPoint,
        finish: GridPoint,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            start,
            finish,
            pre: estimator.estimate(pre, start, finish)?,
            post: estimator.estimate(post, start, finish)?,
        })
    }

    /// Post-event total minus pre-event total, in meters.
    pub fn difference(&self) -> f64 {
        self.post.total() - self.pre.total()
    }
}
