//! Surface distance estimation.
//!
//! The surface distance between two points is the scaled straight-line
//! distance plus an elevation penalty: the sum of absolute height changes seen
//! while walking the line (see [`crate::path`]) multiplied by the height
//! resolution. Heights are sampled at the nearest grid index; there is no
//! sub-cell interpolation.

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::LookupError;
use crate::grid::{ElevationGrid, GridPoint};
use crate::path::{index_distance, sample_path, step_count};

/// Result of a single surface distance estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult {
    /// Straight-line distance in meters.
    pub horizontal_m: f64,
    /// Elevation penalty in meters.
    pub elevation_m: f64,
    /// Number of samples taken along the walk.
    pub steps: usize,
}

impl DistanceResult {
    /// Total surface distance in meters.
    pub fn total(&self) -> f64 {
        self.horizontal_m + self.elevation_m
    }
}

/// One sample of a walk, as returned by [`SurfaceDistanceEstimator::profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileStep {
    pub point: GridPoint,
    pub height: u8,
    /// Absolute height change from the previous sample.
    pub climb: u8,
}

/// A walk's samples and the distance they add up to.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub steps: Vec<ProfileStep>,
    pub distance: DistanceResult,
}

/// Estimates surface distances over an [`ElevationGrid`].
///
/// # Example
///
/// ```ignore
/// use surfdist::{Config, ElevationGrid, GridPoint, SurfaceDistanceEstimator};
///
/// let config = Config::default();
/// let grid = ElevationGrid::from_file("pre.data", config.grid_resolution())?;
/// let estimator = SurfaceDistanceEstimator::new(&config);
/// let result = estimator.estimate(&grid, GridPoint::new(0, 0), GridPoint::new(100, 1))?;
/// println!("Surface distance: {}m", result.total());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDistanceEstimator {
    spatial_resolution: f64,
    height_resolution: f64,
}

impl Default for SurfaceDistanceEstimator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl SurfaceDistanceEstimator {
    pub fn new(config: &Config) -> Self {
        Self {
            spatial_resolution: config.spatial_resolution(),
            height_resolution: config.height_resolution(),
        }
    }

    /// Meters per grid index step.
    pub fn spatial_resolution(&self) -> f64 {
        self.spatial_resolution
    }

    /// Meters per elevation unit.
    pub fn height_resolution(&self) -> f64 {
        self.height_resolution
    }

    /// Estimate the surface distance from `a` to `b` on `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfBounds`] if either endpoint lies outside
    /// the grid.
    pub fn estimate(
        &self,
        grid: &ElevationGrid,
        a: GridPoint,
        b: GridPoint,
    ) -> Result<DistanceResult, LookupError> {
        self.measure(grid, a, b, |_| {})
    }

    /// Return every sample of the walk from `a` to `b` together with the
    /// resulting [`DistanceResult`], walking the path once.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfBounds`] if either endpoint lies outside
    /// the grid.
    pub fn profile(
        &self,
        grid: &ElevationGrid,
        a: GridPoint,
        b: GridPoint,
    ) -> Result<Profile, LookupError> {
        // Endpoints bound the walk length; check them before sizing the buffer.
        grid.check(a)?;
        grid.check(b)?;

        let mut steps = Vec::with_capacity(step_count(a, b));
        let distance = self.measure(grid, a, b, |step| steps.push(step))?;
        Ok(Profile { steps, distance })
    }

    fn measure<F>(
        &self,
        grid: &ElevationGrid,
        a: GridPoint,
        b: GridPoint,
        mut visit: F,
    ) -> Result<DistanceResult, LookupError>
    where
        F: FnMut(ProfileStep),
    {
        let mut steps = 0;
        let climbed = walk(grid, a, b, |step| {
            steps += 1;
            visit(step);
        })?;

        let result = DistanceResult {
            horizontal_m: index_distance(a, b) * self.spatial_resolution,
            elevation_m: climbed as f64 * self.height_resolution,
            steps,
        };

        debug!(
            start = %a,
            finish = %b,
            steps,
            horizontal_m = result.horizontal_m,
            elevation_m = result.elevation_m,
            "estimated surface distance"
        );

        Ok(result)
    }
}

/// Walk from `a` to `b`, calling `visit` for each sample, and return the total
/// absolute height change.
fn walk<F>(
    grid: &ElevationGrid,
    a: GridPoint,
    b: GridPoint,
    mut visit: F,
) -> Result<u64, LookupError>
where
    F: FnMut(ProfileStep),
{
    let mut previous = grid.height(a)?;
    grid.check(b)?;
    let mut climbed = 0u64;

    for point in sample_path(a, b) {
        let height = grid.height(point)?;
        let climb = height.abs_diff(previous);
        trace!(point = %point, height, climb, "step");

        climbed += u64::from(climb);
        visit(ProfileStep {
            point,
            height,
            climb,
        });
        previous = height;
    }

    Ok(climbed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOLUTION: usize = 512;

    fn flat_grid(height: u8) -> ElevationGrid {
        ElevationGrid::from_bytes(vec![height; RESOLUTION * RESOLUTION], RESOLUTION).unwrap()
    }

    fn grid_with(points: &[(usize, usize, u8)]) -> ElevationGrid {
        let mut data = vec![0u8; RESOLUTION * RESOLUTION];
        for &(x, y, h) in points {
            data[x * RESOLUTION + y] = h;
        }
        ElevationGrid::from_bytes(data, RESOLUTION).unwrap()
    }

    fn p(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn test_flat_grid() {
        let grid = flat_grid(100);
        let result = SurfaceDistanceEstimator::default()
            .estimate(&grid, p(0, 0), p(100, 0))
            .unwrap();

        assert_eq!(result.horizontal_m, 3000.0);
        assert_eq!(result.elevation_m, 0.0);
        assert_eq!(result.total(), 3000.0);
        assert_eq!(result.steps, 100);
    }

    #[test]
    fn test_same_point() {
        let grid = grid_with(&[(7, 7, 200)]);
        let result = SurfaceDistanceEstimator::default()
            .estimate(&grid, p(7, 7), p(7, 7))
            .unwrap();

        assert_eq!(result.horizontal_m, 0.0);
        assert_eq!(result.elevation_m, 0.0);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_single_step_jump() {
        let grid = grid_with(&[(1, 0, 10)]);
        let result = SurfaceDistanceEstimator::default()
            .estimate(&grid, p(0, 0), p(1, 0))
            .unwrap();

        assert_eq!(result.horizontal_m, 30.0);
        assert_eq!(result.elevation_m, 110.0);
        assert_eq!(result.total(), 140.0);
    }

    #[test]
    fn test_first_step_compares_against_start_height() {
        // Start is high, everything else zero: the first step drops 50.
        let grid = grid_with(&[(0, 0, 50)]);
        let result = SurfaceDistanceEstimator::default()
            .estimate(&grid, p(0, 0), p(3, 0))
            .unwrap();

        assert_eq!(result.elevation_m, 50.0 * 11.0);
    }

    #[test]
    fn test_bump_counts_up_and_down() {
        let grid = grid_with(&[(2, 0, 5)]);
        let result = SurfaceDistanceEstimator::default()
            .estimate(&grid, p(0, 0), p(4, 0))
            .unwrap();

        assert_eq!(result.elevation_m, 10.0 * 11.0);
    }

    #[test]
    fn test_horizontal_symmetry() {
        let grid = grid_with(&[(3, 3, 40), (10, 20, 90)]);
        let estimator = SurfaceDistanceEstimator::default();

        for (a, b) in [
            (p(0, 0), p(10, 20)),
            (p(511, 0), p(0, 511)),
            (p(5, 9), p(6, 9)),
        ] {
            let forward = estimator.estimate(&grid, a, b).unwrap();
            let backward = estimator.estimate(&grid, b, a).unwrap();
            assert_eq!(forward.horizontal_m, backward.horizontal_m);
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = flat_grid(0);
        let estimator = SurfaceDistanceEstimator::default();

        let err = estimator.estimate(&grid, p(-1, 0), p(5, 5)).unwrap_err();
        assert_eq!(
            err,
            LookupError::OutOfBounds {
                x: -1,
                y: 0,
                resolution: RESOLUTION
            }
        );

        let err = estimator.estimate(&grid, p(0, 0), p(0, 512)).unwrap_err();
        assert_eq!(
            err,
            LookupError::OutOfBounds {
                x: 0,
                y: 512,
                resolution: RESOLUTION
            }
        );

        assert!(estimator.estimate(&grid, p(600, 600), p(600, 600)).is_err());
    }

    #[test]
    fn test_custom_resolutions() {
        let config = Config::builder()
            .grid_resolution(4)
            .spatial_resolution(10.0)
            .height_resolution(2.0)
            .build()
            .unwrap();
        #[rustfmt::skip]
        let data = vec![
            0, 0, 0, 0,
            3, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ];
        let grid = ElevationGrid::from_bytes(data, config.grid_resolution()).unwrap();
        let result = SurfaceDistanceEstimator::new(&config)
            .estimate(&grid, p(0, 0), p(3, 0))
            .unwrap();

        assert_eq!(result.horizontal_m, 30.0);
        assert_eq!(result.elevation_m, 6.0 * 2.0);
    }

    #[test]
    fn test_profile_matches_estimate() {
        let grid = grid_with(&[(1, 1, 9), (2, 2, 4), (3, 4, 12)]);
        let estimator = SurfaceDistanceEstimator::default();
        let (a, b) = (p(0, 0), p(3, 4));

        let profile = estimator.profile(&grid, a, b).unwrap();
        let result = estimator.estimate(&grid, a, b).unwrap();

        assert_eq!(profile.distance, result);
        let profile = profile.steps;
        assert_eq!(profile.len(), result.steps);
        assert_eq!(profile.last().map(|s| s.point), Some(b));
        let climbed: u64 = profile.iter().map(|s| u64::from(s.climb)).sum();
        assert_eq!(climbed as f64 * 11.0, result.elevation_m);
        assert_eq!(
            profile[0],
            ProfileStep {
                point: p(1, 1),
                height: 9,
                climb: 9
            }
        );
    }

    #[test]
    fn test_profile_far_off_grid_endpoints() {
        let grid = ElevationGrid::from_bytes(vec![0u8; 16], 4).unwrap();
        let estimator = SurfaceDistanceEstimator::default();

        let err = estimator
            .profile(&grid, p(i32::MIN, i32::MIN), p(i32::MAX, i32::MAX))
            .unwrap_err();
        assert_eq!(
            err,
            LookupError::OutOfBounds {
                x: i32::MIN,
                y: i32::MIN,
                resolution: 4
            }
        );

        let err = estimator
            .profile(&grid, p(0, 0), p(i32::MAX, i32::MAX))
            .unwrap_err();
        assert!(matches!(err, LookupError::OutOfBounds { x: i32::MAX, .. }));
    }
}
