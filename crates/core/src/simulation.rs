//! Simulation driver
//!
//! [`WaveSimulation`] owns one height field, one frame buffer and the integrator,
//! and maps pointer input onto disturbances according to its
//! [`InteractionProfile`](crate::InteractionProfile). A presentation layer calls
//! the input methods as events arrive and [`WaveSimulation::update`] once per
//! frame, then uploads [`WaveSimulation::frame`].

use crate::config::SimulationConfig;
use crate::disturbance::{inject_line, Kernel, LineStroke};
use crate::error::SimResult;
use crate::field::{FieldStats, HeightField};
use crate::render::{ColorMap, FrameBuffer};
use crate::solver::{ExecutionMode, WaveIntegrator};
use rand::Rng;
use tracing::{debug, info};

/// Cells with `|h|` above this count as active in [`WaveSimulation::stats`]
pub const ACTIVITY_THRESHOLD: f32 = 1e-3;

/// A height field together with its frame buffer and input mapping
#[derive(Debug, Clone)]
pub struct WaveSimulation {
    field: HeightField,
    frame: FrameBuffer,
    integrator: WaveIntegrator,
    config: SimulationConfig,
    /// Completed integrator steps since creation or the last reset
    steps: u64,
}

impl WaveSimulation {
    /// Allocate the field and frame described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid or either buffer
    /// cannot be allocated.
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let field = HeightField::new(config.width, config.height, config.damping)?;
        let mut frame = FrameBuffer::new(config.width, config.height)?;
        frame.refresh_with(&field, &config.color_map, config.execution);

        let config = SimulationConfig {
            damping: field.damping(),
            ..config
        };

        info!(
            "Wave simulation initialized: {}x{} grid, damping={:.4}, colors={:?}, mode={:?}",
            config.width, config.height, config.damping, config.color_map, config.execution
        );

        Ok(Self {
            field,
            frame,
            integrator: WaveIntegrator::new(config.execution),
            config,
            steps: 0,
        })
    }

    /// Effective configuration (damping already clamped)
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The height field
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Mutable access to the height field for custom injectors
    pub fn field_mut(&mut self) -> &mut HeightField {
        &mut self.field
    }

    /// The frame produced by the last refresh
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Integrator steps taken since creation or the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Active color policy
    pub fn color_map(&self) -> ColorMap {
        self.config.color_map
    }

    /// Switch the color policy; takes effect on the next refresh
    pub fn set_color_map(&mut self, color_map: ColorMap) {
        debug!("Color map changed: {:?}", color_map);
        self.config.color_map = color_map;
    }

    /// Change the per-step damping (clamped into `(0, 1]`)
    pub fn set_damping(&mut self, damping: f32) {
        self.field.set_damping(damping);
        self.config.damping = self.field.damping();
    }

    /// Switch between serial and row-band parallel passes
    pub fn set_execution(&mut self, execution: ExecutionMode) {
        self.config.execution = execution;
        self.integrator = WaveIntegrator::new(execution);
    }

    /// Pointer pressed at `(x, y)`
    pub fn press(&mut self, x: i32, y: i32) {
        self.config.interaction.press.apply(&mut self.field, x, y);
    }

    /// Pointer dragged from `(prev_x, prev_y)` to `(x, y)`
    pub fn drag(&mut self, prev_x: i32, prev_y: i32, x: i32, y: i32) {
        let drag = self.config.interaction.drag;
        if let Some(stroke) = drag.line {
            inject_line(
                &mut self.field,
                prev_x,
                prev_y,
                x,
                y,
                drag.line_intensity,
                &stroke,
            );
        }
        if let Some(follow) = drag.follow {
            follow.apply(&mut self.field, x, y);
        }
    }

    /// Inject an arbitrary kernel centred on `(x, y)`
    pub fn inject(&mut self, kernel: Kernel, x: i32, y: i32, intensity: f32) {
        kernel.apply(&mut self.field, x, y, intensity);
    }

    /// Inject an arbitrary stroke from `(x1, y1)` to `(x2, y2)`
    pub fn inject_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        intensity: f32,
        stroke: &LineStroke,
    ) {
        inject_line(&mut self.field, x1, y1, x2, y2, intensity, stroke);
    }

    /// Inject the random-drop impulse at a uniformly chosen center
    ///
    /// The center is drawn from `[m, W-m) × [m, H-m)` where `m` is the kernel's
    /// edge margin (at least 1). Returns the chosen center, or `None` when the
    /// grid is too small to hold one.
    pub fn random_drop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(i32, i32)> {
        let impulse = self.config.interaction.random;
        let margin = impulse.kernel.margin().max(1);
        let (width, height) = (self.field.width() as i64, self.field.height() as i64);
        let m = i64::from(margin);

        if width - m <= m || height - m <= m {
            debug!(
                "Random drop skipped: {}x{} grid has no center with margin {}",
                width, height, margin
            );
            return None;
        }

        let x = rng.random_range(m..width - m) as i32;
        let y = rng.random_range(m..height - m) as i32;
        impulse.apply(&mut self.field, x, y);
        debug!("Random drop at ({}, {})", x, y);
        Some((x, y))
    }

    /// Advance one time step (stencil pass, then buffer swap)
    pub fn step(&mut self) {
        self.integrator.step(&mut self.field);
        self.steps += 1;
    }

    /// Rebuild the frame from the field's current buffer
    pub fn refresh(&mut self) {
        self.frame
            .refresh_with(&self.field, &self.config.color_map, self.config.execution);
    }

    /// One frame: [`step`](Self::step) followed by [`refresh`](Self::refresh)
    pub fn update(&mut self) {
        self.step();
        self.refresh();
    }

    /// Zero the field in place and show a calm frame
    pub fn reset(&mut self) {
        self.field.reset();
        self.steps = 0;
        self.refresh();
        info!("Wave simulation reset");
    }

    /// Energy, peak and active-cell count of the current buffer
    pub fn stats(&self) -> FieldStats {
        self.field.stats(ACTIVITY_THRESHOLD)
    }
}
