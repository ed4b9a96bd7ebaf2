//! Double-buffered height field
//!
//! Stores the wave displacement as two flat `Vec<f32>` arrays in row-major order
//! (`y * width + x`). The integrator reads `previous` and writes `current`; after
//! each pass the two buffers trade roles with [`HeightField::swap`].
//!
//! The outermost row and column of each buffer form a fixed boundary ring. Neither
//! the integrator nor [`HeightField::add`] ever writes to it.

use crate::error::{cell_count, try_filled, SimResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Damping used when a caller passes a non-finite coefficient
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Smallest damping coefficient accepted; lower values are clamped up to it
pub const MIN_DAMPING: f32 = 1e-6;

/// Scalar height grid with ping-pong buffers
#[derive(Debug, Clone)]
pub struct HeightField {
    /// Latest write target of the integrator
    current: Vec<f32>,
    /// Wave source read by the integrator and perturbed by injectors
    previous: Vec<f32>,
    width: usize,
    height: usize,
    damping: f32,
}

/// Summary statistics of the current buffer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldStats {
    /// Sum of squared heights
    pub energy: f64,
    /// Largest absolute height
    pub peak: f32,
    /// Cells whose absolute height exceeds the activity threshold
    pub active_cells: usize,
}

/// Clamp a damping coefficient into `[MIN_DAMPING, 1.0]`
///
/// Non-finite input falls back to [`DEFAULT_DAMPING`].
pub fn sanitize_damping(damping: f32) -> f32 {
    if !damping.is_finite() {
        warn!(
            "Non-finite damping {}, using default {}",
            damping, DEFAULT_DAMPING
        );
        return DEFAULT_DAMPING;
    }
    let clamped = damping.clamp(MIN_DAMPING, 1.0);
    if clamped != damping {
        warn!("Damping {} outside (0, 1], clamped to {}", damping, clamped);
    }
    clamped
}

impl HeightField {
    /// Allocate a zero-filled field
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimensions`](crate::SimError::InvalidDimensions)
    /// for a zero-sized or overflowing grid and
    /// [`SimError::Allocation`](crate::SimError::Allocation) if either buffer
    /// cannot be reserved.
    pub fn new(width: usize, height: usize, damping: f32) -> SimResult<Self> {
        let cells = cell_count(width, height)?;
        let current = try_filled(cells, 0.0)?;
        let previous = try_filled(cells, 0.0)?;
        let damping = sanitize_damping(damping);

        info!(
            "Height field allocated: {}x{} cells, damping={:.4}",
            width, height, damping
        );

        Ok(Self {
            current,
            previous,
            width,
            height,
            damping,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells per buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Always false; fields are at least 1x1
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Per-step multiplicative damping
    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Replace the damping coefficient (clamped like in [`HeightField::new`])
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = sanitize_damping(damping);
    }

    /// Row-major index of `(x, y)`
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Whether `(x, y)` lies strictly inside the boundary ring
    #[inline]
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= 1 && x < self.width as i64 - 1 && y >= 1 && y < self.height as i64 - 1
    }

    /// Whether `(x, y)` keeps at least `margin` cells to every edge
    ///
    /// A margin of 1 is the same as [`HeightField::is_interior`].
    #[inline]
    pub fn has_margin(&self, x: i32, y: i32, margin: i32) -> bool {
        let (x, y, m) = (i64::from(x), i64::from(y), i64::from(margin));
        x >= m && x < self.width as i64 - m && y >= m && y < self.height as i64 - m
    }

    /// Buffer the integrator writes into
    #[inline]
    pub fn current(&self) -> &[f32] {
        &self.current
    }

    /// Buffer the integrator reads from and injectors add to
    #[inline]
    pub fn previous(&self) -> &[f32] {
        &self.previous
    }

    /// Mutable access to the current buffer
    #[inline]
    pub fn current_mut(&mut self) -> &mut [f32] {
        &mut self.current
    }

    /// Mutable access to the previous buffer
    #[inline]
    pub fn previous_mut(&mut self) -> &mut [f32] {
        &mut self.previous
    }

    /// Borrow `(current, previous)` at once for a stencil pass
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [f32], &[f32]) {
        (&mut self.current, &self.previous)
    }

    /// Height in the current buffer at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.current[self.index(x, y)]
    }

    /// Zero both buffers in place
    pub fn reset(&mut self) {
        self.current.fill(0.0);
        self.previous.fill(0.0);
        info!("Height field reset ({}x{})", self.width, self.height);
    }

    /// Exchange the roles of `current` and `previous`
    ///
    /// Only the two vector handles move; no heights are copied.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Add `amount` to `previous` at `(x, y)`
    ///
    /// Targets on the boundary ring or outside the grid are ignored.
    #[inline]
    pub fn add(&mut self, x: i32, y: i32, amount: f32) {
        if self.is_interior(x, y) {
            let idx = self.index(x as usize, y as usize);
            self.previous[idx] += amount;
        }
    }

    /// Statistics of the current buffer; cells with `|h| > threshold` count as active
    pub fn stats(&self, threshold: f32) -> FieldStats {
        self.current
            .iter()
            .fold(FieldStats::default(), |mut stats, &h| {
                stats.energy += f64::from(h) * f64::from(h);
                stats.peak = stats.peak.max(h.abs());
                if h.abs() > threshold {
                    stats.active_cells += 1;
                }
                stats
            })
    }

    /// Sum of squared heights in the current buffer
    pub fn energy(&self) -> f64 {
        self.stats(0.0).energy
    }
}
