//! Error types for simulation construction
//!
//! Construction is the only fallible part of the simulator. Once a field and its
//! frame buffer exist, stepping, injecting and refreshing are total operations.

use std::fmt;

/// Errors raised while building simulation buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Buffer memory for `cells` elements could not be reserved
    Allocation {
        /// Number of elements requested
        cells: usize,
    },
    /// Grid dimensions are zero or their product overflows `usize`
    InvalidDimensions {
        /// Requested grid width
        width: usize,
        /// Requested grid height
        height: usize,
    },
}

/// Result alias used by all constructors in this crate
pub type SimResult<T> = Result<T, SimError>;

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { cells } => {
                write!(f, "failed to allocate buffer of {cells} cells")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Validate grid dimensions and return the cell count
pub(crate) fn cell_count(width: usize, height: usize) -> SimResult<usize> {
    if width == 0 || height == 0 {
        return Err(SimError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(SimError::InvalidDimensions { width, height })
}

/// Allocate a buffer of `len` copies of `value`, reporting allocation failure
/// instead of aborting the process.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> SimResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SimError::Allocation { cells: len })?;
    buffer.resize(len, value);
    Ok(buffer)
}
