//! Straight-line walks between grid points.
//!
//! A walk from `a` to `b` takes `floor(|b - a|)` steps. Step `i` (1-based)
//! lies at progress `t = i / steps` along the segment, with each coordinate
//! rounded to the nearest grid index. The start point itself is not yielded;
//! the last sample is always `b`.

use crate::grid::GridPoint;

/// Euclidean distance between two points in index space.
pub fn index_distance(a: GridPoint, b: GridPoint) -> f64 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    dx.hypot(dy)
}

/// Number of samples taken walking from `a` to `b`.
///
/// Zero only when `a == b`; any two distinct integer points are at least one
/// index apart.
pub fn step_count(a: GridPoint, b: GridPoint) -> usize {
    index_distance(a, b).floor() as usize
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Iterate over the nearest-index samples of the walk from `a` to `b`.
///
/// ```ignore
/// use surfdist::{path::sample_path, GridPoint};
///
/// let walk: Vec<_> = sample_path(GridPoint::new(0, 0), GridPoint::new(2, 1)).collect();
/// assert_eq!(walk, vec![GridPoint::new(1, 1), GridPoint::new(2, 1)]);
/// ```
pub fn sample_path(a: GridPoint, b: GridPoint) -> impl ExactSizeIterator<Item = GridPoint> {
    let steps = step_count(a, b);
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));

    (0..steps).map(move |i| {
        let t = (i + 1) as f64 / steps as f64;
        GridPoint {
            x: lerp(ax, bx, t).round() as i32,
            y: lerp(ay, by, t).round() as i32,
        }
    })
}
