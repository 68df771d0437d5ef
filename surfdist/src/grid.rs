//! Elevation grid loading and height lookup.
//!
//! This module provides the [`ElevationGrid`] struct for reading raw elevation
//! files and looking up heights at integer grid coordinates, plus the
//! [`GridPoint`] coordinate type.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;

use memmap2::Mmap;
use tracing::debug;

use crate::error::{LoadError, LookupError, ParsePointError};

/// An integer coordinate on an elevation grid.
///
/// `x` selects the row and `y` the column. Points carry no validity of their
/// own; they are checked against a grid's resolution on every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for GridPoint {
    type Err = ParsePointError;

    /// Parse `"x,y"`, tolerating whitespace around either coordinate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError {
            input: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self { x, y })
    }
}

/// Backing storage for grid samples.
enum Samples {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Samples {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Samples::Mapped(mmap) => mmap,
            Samples::Owned(bytes) => bytes,
        }
    }
}

/// A square grid of single-byte elevation samples.
///
/// Samples are stored row-major: the byte at offset `x * resolution + y`
/// holds the height at row `x`, column `y`. The grid is immutable once loaded.
///
/// # Example
///
/// ```ignore
/// use surfdist::{ElevationGrid, GridPoint};
///
/// let grid = ElevationGrid::from_file("pre.data", 512)?;
/// let height = grid.height_at(10, 20)?;
/// println!("Height: {}", height);
/// ```
pub struct ElevationGrid {
    samples: Samples,
    /// Number of samples per row/column
    resolution: usize,
}

impl fmt::Debug for ElevationGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevationGrid")
            .field("resolution", &self.resolution)
            .field("mapped", &matches!(self.samples, Samples::Mapped(_)))
            .finish()
    }
}

impl ElevationGrid {
    /// Load a grid from a raw elevation file.
    ///
    /// The file is memory-mapped after its size has been checked.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened ([`LoadError::NotFound`])
    /// - The file size is not exactly `resolution * resolution` bytes
    ///   ([`LoadError::SizeMismatch`])
    pub fn from_file<P: AsRef<Path>>(path: P, resolution: usize) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|_| LoadError::NotFound {
            path: path.to_path_buf(),
        })?;

        let expected = expected_len(resolution);
        let actual = file.metadata()?.len() as usize;
        if actual != expected {
            return Err(LoadError::SizeMismatch { expected, actual });
        }

        // SAFETY: Memory mapping is safe as long as the file is not modified
        // while mapped. We open the file read-only and don't expose the mapping.
        let mmap = unsafe { Mmap::map(&file)? };

        // The file may have changed between the metadata call and the mapping.
        if mmap.len() != expected {
            return Err(LoadError::SizeMismatch {
                expected,
                actual: mmap.len(),
            });
        }

        debug!(path = %path.display(), resolution, "loaded elevation grid");

        Ok(Self {
            samples: Samples::Mapped(mmap),
            resolution,
        })
    }

    /// Load a grid by reading `reader` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if reading fails and
    /// [`LoadError::SizeMismatch`] if the byte count is wrong.
    pub fn from_reader<R: Read>(mut reader: R, resolution: usize) -> Result<Self, LoadError> {
        // Never pre-size from `resolution` alone; a bogus value must not abort.
        let mut bytes = Vec::with_capacity(expected_len(resolution).min(MAX_PREALLOCATION));
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes, resolution)
    }

    /// Build a grid from an owned sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SizeMismatch`] unless `bytes.len()` is exactly
    /// `resolution * resolution`.
    pub fn from_bytes(bytes: Vec<u8>, resolution: usize) -> Result<Self, LoadError> {
        let expected = expected_len(resolution);
        if bytes.len() != expected {
            return Err(LoadError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            samples: Samples::Owned(bytes),
            resolution,
        })
    }

    /// Get the height sample at row `x`, column `y`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::OutOfBounds`] if either coordinate is negative
    /// or not less than the grid resolution.
    pub fn height_at(&self, x: i32, y: i32) -> Result<u8, LookupError> {
        let out_of_bounds = || LookupError::OutOfBounds {
            x,
            y,
            resolution: self.resolution,
        };
        let row = usize::try_from(x).map_err(|_| out_of_bounds())?;
        let col = usize::try_from(y).map_err(|_| out_of_bounds())?;
        if row >= self.resolution || col >= self.resolution {
            return Err(out_of_bounds());
        }

        Ok(self.samples[row * self.resolution + col])
    }

    /// Get the height sample at `point`.
    pub fn height(&self, point: GridPoint) -> Result<u8, LookupError> {
        self.height_at(point.x, point.y)
    }

    /// Returns `true` if `point` lies inside the grid.
    pub fn contains(&self, point: GridPoint) -> bool {
        self.height(point).is_ok()
    }

    /// Fail with [`LookupError::OutOfBounds`] unless `point` lies inside the grid.
    pub fn check(&self, point: GridPoint) -> Result<(), LookupError> {
        self.height(point).map(|_| ())
    }

    /// Returns the number of samples per row/column.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the raw row-major samples exactly as loaded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.samples
    }

    /// Write the raw samples to `writer`, reproducing the source file.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }

    /// Returns the lowest and highest samples, or `None` for an empty grid.
    pub fn height_range(&self) -> Option<(u8, u8)> {
        self.as_bytes().iter().fold(None, |range, &h| match range {
            None => Some((h, h)),
            Some((min, max)) => Some((min.min(h), max.max(h))),
        })
    }

    /// Returns the mean sample value, or `None` for an empty grid.
    pub fn mean_height(&self) -> Option<f64> {
        let bytes = self.as_bytes();
        if bytes.is_empty() {
            return None;
        }
        let sum: u64 = bytes.iter().map(|&h| u64::from(h)).sum();
        Some(sum as f64 / bytes.len() as f64)
    }
}

/// Upper bound on the buffer reserved up front by [`ElevationGrid::from_reader`].
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// Bytes required for a `resolution × resolution` grid. Saturates on overflow,
/// which no real source can match, so such sizes surface as `SizeMismatch`.
fn expected_len(resolution: usize) -> usize {
    resolution.checked_mul(resolution).unwrap_or(usize::MAX)
}
