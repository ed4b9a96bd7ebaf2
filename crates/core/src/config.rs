//! Runtime configuration and presets
//!
//! A [`SimulationConfig`] carries everything a [`WaveSimulation`](crate::WaveSimulation)
//! needs: grid size, damping, color policy, how pointer input is turned into
//! disturbances, and whether passes run serially or over the Rayon pool.
//!
//! The three presets correspond to three interaction styles:
//!
//! | Preset    | Grid     | Colors       | Press       | Drag                            | Random      |
//! |-----------|----------|--------------|-------------|---------------------------------|-------------|
//! | `Classic` | 400×300  | azure glow   | splash @ 15 | disk r2 of splashes @ 8         | splash @ 20 |
//! | `Grid`    | 800×600  | grayscale    | ripple @ 25 | smooth line @ 20 + ripple @ 15  | ripple @ 30 |
//! | `Water`   | 1200×800 | tinted water | drop @ 20   | sharp line @ 15                 | drop @ 25   |

use crate::disturbance::{Impulse, Kernel, LineStroke};
use crate::field::DEFAULT_DAMPING;
use crate::render::ColorMap;
use crate::solver::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Small grid, 3x3 splashes and a blue glow
    Classic,
    /// Grayscale grid with cosine ripples and smooth drag strokes
    Grid,
    /// Large tinted water surface with Gaussian drops
    #[default]
    Water,
}

impl Preset {
    /// Every preset, in declaration order
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Grid, Preset::Water];

    /// Lowercase name used on the command line and in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Grid => "grid",
            Self::Water => "water",
        }
    }

    /// Look a preset up by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    /// Full configuration of this preset
    pub fn config(self) -> SimulationConfig {
        match self {
            Self::Classic => SimulationConfig::classic(),
            Self::Grid => SimulationConfig::grid(),
            Self::Water => SimulationConfig::water(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a pointer drag injects
///
/// `line` is sampled between the previous and current pointer position first,
/// then `follow` is applied once at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragProfile {
    /// Stroke between consecutive pointer positions
    pub line: Option<LineStroke>,
    /// Peak intensity of the stroke
    pub line_intensity: f32,
    /// Extra impulse at the current pointer position
    pub follow: Option<Impulse>,
}

/// How pointer and keyboard input is turned into disturbances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionProfile {
    /// Injected where the pointer is pressed
    pub press: Impulse,
    /// Injected while the pointer is dragged
    pub drag: DragProfile,
    /// Injected at a random position on request
    pub random: Impulse,
}

/// Complete simulation setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Per-step multiplicative damping in (0, 1]
    pub damping: f32,
    /// Height to pixel policy
    pub color_map: ColorMap,
    /// Input to disturbance mapping
    pub interaction: InteractionProfile,
    /// Serial or row-band parallel passes
    #[serde(default)]
    pub execution: ExecutionMode,
}

impl SimulationConfig {
    /// 400×300 grid, azure colors, splash interaction
    pub fn classic() -> Self {
        Self {
            width: 400,
            height: 300,
            damping: DEFAULT_DAMPING,
            color_map: ColorMap::Azure { scale: 255.0 },
            interaction: InteractionProfile {
                press: Impulse::new(Kernel::splash(), 15.0),
                drag: DragProfile {
                    line: None,
                    line_intensity: 0.0,
                    follow: Some(Impulse::new(Kernel::splash_disk(2.0), 8.0)),
                },
                random: Impulse::new(Kernel::splash(), 20.0),
            },
            execution: ExecutionMode::Serial,
        }
    }

    /// 800×600 grid, grayscale, cosine ripple interaction
    pub fn grid() -> Self {
        Self {
            width: 800,
            height: 600,
            damping: DEFAULT_DAMPING,
            color_map: ColorMap::grayscale(),
            interaction: InteractionProfile {
                press: Impulse::new(Kernel::ripple(), 25.0),
                drag: DragProfile {
                    line: Some(LineStroke::smooth()),
                    line_intensity: 20.0,
                    follow: Some(Impulse::new(Kernel::ripple(), 15.0)),
                },
                random: Impulse::new(Kernel::ripple(), 30.0),
            },
            execution: ExecutionMode::Serial,
        }
    }

    /// 1200×800 grid, tinted water, Gaussian drop interaction
    pub fn water() -> Self {
        Self {
            width: 1200,
            height: 800,
            damping: DEFAULT_DAMPING,
            color_map: ColorMap::Water,
            interaction: InteractionProfile {
                press: Impulse::new(Kernel::water_drop(), 20.0),
                drag: DragProfile {
                    line: Some(LineStroke::sharp()),
                    line_intensity: 15.0,
                    follow: None,
                },
                random: Impulse::new(Kernel::water_drop(), 25.0),
            },
            execution: ExecutionMode::Serial,
        }
    }

    /// Same configuration on a different grid size
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Same configuration with a different damping coefficient
    #[must_use]
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Same configuration with a different execution mode
    #[must_use]
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::water()
    }
}
