//! Wave equation integrator
//!
//! Advances a [`HeightField`] with an explicit leapfrog scheme for
//! `∂²h/∂t² = c²∇²h`, using a 5-point Laplacian and a per-step multiplicative
//! damping:
//!
//! ```text
//! current = (2·previous - current + C·∇²previous) · damping,   C = c²Δt²/Δx² = 0.25
//! ```
//!
//! # Backend Selection
//!
//! The pass runs either on the calling thread or split into row bands over the
//! Rayon pool. Both produce bit-identical results; the buffer swap always happens
//! after every band has finished.

mod stencil;

pub use stencil::{step_wave_cpu, step_wave_parallel};

use crate::field::HeightField;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Courant factor `c²Δt²/Δx²` of the scheme
pub const WAVE_COEFFICIENT: f32 = 0.25;

/// How the stencil pass and frame refresh are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Single-threaded loop on the caller's thread
    #[default]
    Serial,
    /// Row bands distributed over the Rayon thread pool
    Parallel,
}

/// Leapfrog stencil integrator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveIntegrator {
    mode: ExecutionMode,
}

impl WaveIntegrator {
    /// Create an integrator using the given execution mode
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    /// Execution mode of the stencil pass
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Write the next state into `current` without swapping buffers
    ///
    /// Callers that use this directly must call [`HeightField::swap`] before the
    /// next pass, otherwise the recurrence is no longer a two-step leapfrog.
    pub fn pass(&self, field: &mut HeightField) {
        let (width, height, damping) = (field.width(), field.height(), field.damping());
        let (current, previous) = field.split_mut();
        match self.mode {
            ExecutionMode::Serial => step_wave_cpu(
                current,
                previous,
                width,
                height,
                WAVE_COEFFICIENT,
                damping,
            ),
            ExecutionMode::Parallel => step_wave_parallel(
                current,
                previous,
                width,
                height,
                WAVE_COEFFICIENT,
                damping,
            ),
        }
    }

    /// Advance the field by one time step (stencil pass followed by swap)
    ///
    /// Afterwards `previous` holds the freshly computed state and `current` holds
    /// the state from one step earlier, ready to be overwritten next time.
    pub fn step(&self, field: &mut HeightField) {
        self.pass(field);
        field.swap();
        trace!(
            "Wave step: {}x{} mode={:?}",
            field.width(),
            field.height(),
            self.mode
        );
    }
}
