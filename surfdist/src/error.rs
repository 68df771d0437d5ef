//! Error types for the surfdist library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an elevation grid.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The grid file does not exist or cannot be opened.
    #[error("elevation grid not found: {path}")]
    NotFound { path: PathBuf },

    /// The source holds a different number of samples than the grid requires.
    #[error("invalid grid size: {actual} bytes (expected {expected})")]
    SizeMismatch { expected: usize, actual: usize },

    /// Any other IO failure while reading the source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while looking up heights.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The point lies outside `[0, resolution)` on at least one axis.
    #[error("point ({x}, {y}) out of bounds (valid: 0..{resolution})")]
    OutOfBounds { x: i32, y: i32, resolution: usize },
}

/// Error parsing a `x,y` grid point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid grid point '{input}': expected 'x,y' with integer coordinates")]
pub struct ParsePointError {
    pub input: String,
}

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Any error produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    ParsePoint(#[from] ParsePointError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::SizeMismatch {
            expected: 262144,
            actual: 1000,
        };
        assert!(err.to_string().contains("1000"));
        assert!(err.to_string().contains("262144"));

        let err = LoadError::NotFound {
            path: PathBuf::from("pre.data"),
        };
        assert!(err.to_string().contains("pre.data"));

        let err = LookupError::OutOfBounds {
            x: -1,
            y: 512,
            resolution: 512,
        };
        assert!(err.to_string().contains("(-1, 512)"));

        let err = ConfigError::InvalidValue {
            name: "SURFDIST_GRID_RESOLUTION",
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("SURFDIST_GRID_RESOLUTION"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = LookupError::OutOfBounds {
            x: 0,
            y: 600,
            resolution: 512,
        }
        .into();
        assert!(matches!(err, Error::Lookup(_)));
        assert!(err.to_string().contains("600"));
    }
}
