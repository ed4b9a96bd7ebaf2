//! Ripple Simulation Core Library
//!
//! Real-time 2D water surface simulation on a uniform grid. A scalar height
//! field is advanced with an explicit leapfrog scheme for the damped wave
//! equation, perturbed by pointer-driven disturbance kernels, and rendered into
//! an ARGB8888 frame buffer ready for texture upload.
//!
//! ## Frame Loop
//!
//! ```text
//! input events -> disturbance kernels -> previous buffer
//! step():    current = leapfrog(current, previous); swap(current, previous)
//! refresh(): frame[i] = color_map(current[i])
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple_sim_core::{Preset, WaveSimulation};
//!
//! let config = Preset::Water.config().with_size(128, 96);
//! let mut sim = WaveSimulation::new(config).expect("grid fits in memory");
//!
//! sim.press(64, 48);
//! for _ in 0..10 {
//!     sim.update();
//! }
//! assert_eq!(sim.frame().pixels().len(), 128 * 96);
//! ```
//!
//! Windowing, input polling and texture upload live outside this crate; see the
//! `ripple-sim-ffi` crate for the C ABI.

// Construction errors
pub mod error;

// Double-buffered grid storage
pub mod field;

// Leapfrog integrator (serial and row-band parallel)
pub mod solver;

// Pointer-driven disturbance kernels
pub mod disturbance;

// Height to pixel mapping
pub mod render;

// Presets and runtime configuration
pub mod config;

// Driver tying field, integrator and frame together
pub mod simulation;

pub use config::{DragProfile, InteractionProfile, Preset, SimulationConfig};
pub use disturbance::{inject_line, inject_point, inject_splash, Impulse, Kernel, LineStroke};
pub use error::{SimError, SimResult};
pub use field::{FieldStats, HeightField, DEFAULT_DAMPING, MIN_DAMPING};
pub use render::{pack_argb, unpack_argb, ColorMap, FrameBuffer};
pub use simulation::{WaveSimulation, ACTIVITY_THRESHOLD};
pub use solver::{ExecutionMode, WaveIntegrator, WAVE_COEFFICIENT};
