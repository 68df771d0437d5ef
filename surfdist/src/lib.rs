//! # surfdist - Terrain Surface Distance
//!
//! Estimates how far a traveler actually walks between two points of a square
//! elevation grid, and how that distance changes between a pre-event and a
//! post-event survey of the same terrain.
//!
//! ## Quick Start
//!
//! ```ignore
//! use surfdist::{Config, ElevationGrid, GridPoint, SurfaceComparison, SurfaceDistanceEstimator};
//!
//! let config = Config::default();
//! let pre = ElevationGrid::from_file("pre.data", config.grid_resolution())?;
//! let post = ElevationGrid::from_file("post.data", config.grid_resolution())?;
//!
//! let estimator = SurfaceDistanceEstimator::new(&config);
//! let cmp = SurfaceComparison::between(
//!     &estimator,
//!     &pre,
//!     &post,
//!     GridPoint::new(0, 0),
//!     GridPoint::new(100, 1),
//! )?;
//! println!("Difference: {}m", cmp.difference());
//! ```
//!
//! ## Grid Format
//!
//! A grid file is a headerless block of `resolution × resolution` unsigned
//! bytes (512 × 512 = 262,144 by default), stored row-major. Each byte is one
//! elevation unit; with the default configuration one unit is 11 meters and
//! one grid step is 30 meters.
//!
//! ## Distance Model
//!
//! - **Horizontal distance**: Euclidean distance in index space times the
//!   spatial resolution.
//! - **Elevation penalty**: total absolute height change along the straight
//!   line between the points, sampled once per grid step at the nearest
//!   index, times the height resolution.
//!
//! The surface distance is their sum. No shortest-path search is performed.

pub mod compare;
pub mod config;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod path;

// Re-export main types at crate root for convenience
pub use compare::SurfaceComparison;
pub use config::{Config, ConfigBuilder};
pub use error::{ConfigError, Error, LoadError, LookupError, ParsePointError, Result};
pub use estimator::{DistanceResult, Profile, ProfileStep, SurfaceDistanceEstimator};
pub use grid::{ElevationGrid, GridPoint};
