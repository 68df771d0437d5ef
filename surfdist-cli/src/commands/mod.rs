pub mod batch;
pub mod distance;
pub mod info;
pub mod profile;

use anyhow::{Context, Result};
use std::path::Path;
use surfdist::{Config, ElevationGrid};

/// Load a grid, naming the file in any error.
pub fn load_grid(config: &Config, path: &Path) -> Result<ElevationGrid> {
    ElevationGrid::from_file(path, config.grid_resolution())
        .with_context(|| format!("Failed to load elevation grid {}", path.display()))
}
