//! Grid and estimator configuration.
//!
//! [`Config`] carries the three values that used to be hardwired: the side
//! length of the square grid and the meters represented by one grid step and
//! one elevation unit.
//!
//! ```ignore
//! use surfdist::Config;
//!
//! let config = Config::builder()
//!     .grid_resolution(1024)
//!     .spatial_resolution(10.0)
//!     .build()?;
//! ```

use std::str::FromStr;

use crate::error::ConfigError;

/// Default side length of an elevation grid, in samples.
pub const DEFAULT_GRID_RESOLUTION: usize = 512;

/// Default meters per grid index step.
pub const DEFAULT_SPATIAL_RESOLUTION: f64 = 30.0;

/// Default meters per elevation unit.
pub const DEFAULT_HEIGHT_RESOLUTION: f64 = 11.0;

/// Environment variable for [`Config::grid_resolution`].
pub const ENV_GRID_RESOLUTION: &str = "SURFDIST_GRID_RESOLUTION";

/// Environment variable for [`Config::spatial_resolution`].
pub const ENV_SPATIAL_RESOLUTION: &str = "SURFDIST_SPATIAL_RESOLUTION";

/// Environment variable for [`Config::height_resolution`].
pub const ENV_HEIGHT_RESOLUTION: &str = "SURFDIST_HEIGHT_RESOLUTION";

/// Validated configuration shared by the grid loader and the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    grid_resolution: usize,
    spatial_resolution: f64,
    height_resolution: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            spatial_resolution: DEFAULT_SPATIAL_RESOLUTION,
            height_resolution: DEFAULT_HEIGHT_RESOLUTION,
        }
    }
}

impl Config {
    /// Create a builder starting from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Number of samples per row/column.
    pub fn grid_resolution(&self) -> usize {
        self.grid_resolution
    }

    /// Meters per grid index step.
    pub fn spatial_resolution(&self) -> f64 {
        self.spatial_resolution
    }

    /// Meters per elevation unit.
    pub fn height_resolution(&self) -> f64 {
        self.height_resolution
    }

    /// Total number of samples (and bytes) in a grid file.
    pub fn sample_count(&self) -> usize {
        self.grid_resolution * self.grid_resolution
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    grid_resolution: usize,
    spatial_resolution: f64,
    height_resolution: f64,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Create a builder with default values.
    pub fn new() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            spatial_resolution: DEFAULT_SPATIAL_RESOLUTION,
            height_resolution: DEFAULT_HEIGHT_RESOLUTION,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SURFDIST_GRID_RESOLUTION` | Samples per row/column | 512 |
    /// | `SURFDIST_SPATIAL_RESOLUTION` | Meters per grid step | 30 |
    /// | `SURFDIST_HEIGHT_RESOLUTION` | Meters per elevation unit | 11 |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::new();
        if let Some(v) = env_value(ENV_GRID_RESOLUTION)? {
            builder.grid_resolution = v;
        }
        if let Some(v) = env_value(ENV_SPATIAL_RESOLUTION)? {
            builder.spatial_resolution = v;
        }
        if let Some(v) = env_value(ENV_HEIGHT_RESOLUTION)? {
            builder.height_resolution = v;
        }
        Ok(builder)
    }

    /// Set the number of samples per row/column.
    pub fn grid_resolution(mut self, samples: usize) -> Self {
        self.grid_resolution = samples;
        self
    }

    /// Set the meters per grid index step.
    pub fn spatial_resolution(mut self, meters: f64) -> Self {
        self.spatial_resolution = meters;
        self
    }

    /// Set the meters per elevation unit.
    pub fn height_resolution(mut self, meters: f64) -> Self {
        self.height_resolution = meters;
        self
    }

    /// Build the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the grid resolution is zero or does not fit the
    /// `i32` coordinate space, or if either metric resolution is not a finite
    /// positive number.
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.grid_resolution == 0 || self.grid_resolution > i32::MAX as usize {
            return Err(ConfigError::InvalidValue {
                name: "grid_resolution",
                value: self.grid_resolution.to_string(),
            });
        }
        check_positive("spatial_resolution", self.spatial_resolution)?;
        check_positive("height_resolution", self.height_resolution)?;

        Ok(Config {
            grid_resolution: self.grid_resolution,
            spatial_resolution: self.spatial_resolution,
            height_resolution: self.height_resolution,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}

fn env_value<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}
