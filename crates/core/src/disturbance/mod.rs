//! Disturbance injection
//!
//! Injectors translate pointer input into height perturbations. Every injector
//! adds into the field's `previous` buffer through [`HeightField::add`], so a
//! disturbance injected before a step shows up in the state that step computes.
//!
//! Kernels are a closed set of spatial falloff shapes with their constants
//! attached; [`inject_line`] samples any of them along a drag segment.
//!
//! # Edge policy
//!
//! - Cells on the boundary ring or outside the grid are dropped one by one.
//! - Kernels with a margin skip the whole call when the center is closer than
//!   the margin to an edge (see [`Kernel::margin`]).
//! - Offsets that would overflow `i32` land outside every grid and are dropped
//!   like any other out-of-grid cell.
//! - A radius of zero or less collapses a radial kernel onto its center cell.

mod line;

pub use line::{inject_line, LineStroke};

use crate::field::HeightField;
use serde::{Deserialize, Serialize};

/// Neighbour weight of the 3x3 splash
pub const SPLASH_NEIGHBOR_WEIGHT: f32 = 0.5;

/// Radius of the radial ripple and drop kernels
pub const RADIAL_RADIUS: f32 = 3.0;

/// Angular frequency of the ripple kernel
pub const RIPPLE_FREQUENCY: f32 = 0.8;

/// Edge margin the ripple center needs
pub const RIPPLE_MARGIN: i32 = 2;

/// Gaussian envelope sharpness of the drop kernel
pub const DROP_SHARPNESS: f32 = 0.3;

/// Angular frequency of the drop kernel
pub const DROP_FREQUENCY: f32 = 1.5;

/// Edge margin the drop center needs
pub const DROP_MARGIN: i32 = 3;

/// Spatial falloff kernel of an injector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Kernel {
    /// Single cell
    Point,
    /// Center plus its 8 neighbours scaled by `neighbor_weight`; the center must be
    /// an interior cell
    Splash {
        /// Fraction of the intensity added to each neighbour
        neighbor_weight: f32,
    },
    /// Linear falloff `weight · (1 - dist/radius)` over `dist <= radius`
    Disk {
        /// Kernel radius in cells
        radius: f32,
        /// Extra scale applied to every cell
        weight: f32,
    },
    /// Directional ripple `cos(dist · frequency) · (1 - dist/radius)`
    Ripple {
        /// Kernel radius in cells
        radius: f32,
        /// Angular frequency of the cosine
        frequency: f32,
        /// Minimum center distance to every edge
        margin: i32,
    },
    /// A 3x3 splash at every cell of a linear disk, each splash scaled by
    /// `1 - dist/radius`
    SplashDisk {
        /// Disk radius in cells
        radius: f32,
        /// Neighbour weight of every splash
        neighbor_weight: f32,
    },
    /// Gaussian-enveloped ripple `exp(-dist² · sharpness) · cos(dist · frequency)`
    WaterDrop {
        /// Kernel radius in cells
        radius: f32,
        /// Gaussian envelope coefficient
        sharpness: f32,
        /// Angular frequency of the cosine
        frequency: f32,
        /// Minimum center distance to every edge
        margin: i32,
    },
}

impl Kernel {
    /// 3x3 splash with half-strength neighbours
    pub const fn splash() -> Self {
        Self::Splash {
            neighbor_weight: SPLASH_NEIGHBOR_WEIGHT,
        }
    }

    /// Linear disk with the given radius and weight
    pub const fn disk(radius: f32, weight: f32) -> Self {
        Self::Disk { radius, weight }
    }

    /// Disk of half-strength splashes with the given radius
    pub const fn splash_disk(radius: f32) -> Self {
        Self::SplashDisk {
            radius,
            neighbor_weight: SPLASH_NEIGHBOR_WEIGHT,
        }
    }

    /// Cosine ripple of radius 3 ("velocity field")
    pub const fn ripple() -> Self {
        Self::Ripple {
            radius: RADIAL_RADIUS,
            frequency: RIPPLE_FREQUENCY,
            margin: RIPPLE_MARGIN,
        }
    }

    /// Gaussian water drop of radius 3
    pub const fn water_drop() -> Self {
        Self::WaterDrop {
            radius: RADIAL_RADIUS,
            sharpness: DROP_SHARPNESS,
            frequency: DROP_FREQUENCY,
            margin: DROP_MARGIN,
        }
    }

    /// Edge margin the kernel center needs before anything is injected
    ///
    /// Zero means no whole-call check; individual cells are still bounds-checked.
    pub fn margin(&self) -> i32 {
        match *self {
            Self::Point | Self::Disk { .. } | Self::SplashDisk { .. } => 0,
            Self::Splash { .. } => 1,
            Self::Ripple { margin, .. } | Self::WaterDrop { margin, .. } => margin,
        }
    }

    /// Radial weight at distance `dist` for the disk-shaped kernels
    ///
    /// Returns `None` outside the kernel support. For [`Kernel::SplashDisk`] this
    /// is the scale of the splash placed at that distance.
    pub fn radial_weight(&self, dist: f32) -> Option<f32> {
        match *self {
            Self::Disk { radius, weight } if radius <= 0.0 => (dist == 0.0).then_some(weight),
            Self::Ripple { radius, .. } | Self::SplashDisk { radius, .. } if radius <= 0.0 => {
                (dist == 0.0).then_some(1.0)
            }
            Self::Point => (dist == 0.0).then_some(1.0),
            Self::Splash { neighbor_weight } => {
                if dist == 0.0 {
                    Some(1.0)
                } else if dist <= std::f32::consts::SQRT_2 {
                    Some(neighbor_weight)
                } else {
                    None
                }
            }
            Self::Disk { radius, weight } => {
                (dist <= radius).then(|| (1.0 - dist / radius) * weight)
            }
            Self::SplashDisk { radius, .. } => (dist <= radius).then(|| 1.0 - dist / radius),
            Self::Ripple {
                radius, frequency, ..
            } => (dist <= radius).then(|| (dist * frequency).cos() * (1.0 - dist / radius)),
            Self::WaterDrop {
                radius,
                sharpness,
                frequency,
                ..
            } => (dist <= radius)
                .then(|| (-dist * dist * sharpness).exp() * (dist * frequency).cos()),
        }
    }

    /// Inject this kernel centred on `(x, y)` with peak `intensity`
    pub fn apply(&self, field: &mut HeightField, x: i32, y: i32, intensity: f32) {
        match *self {
            Self::Point => inject_point(field, x, y, intensity),
            Self::Splash { neighbor_weight } => {
                inject_splash(field, x, y, intensity, neighbor_weight);
            }
            Self::SplashDisk {
                radius,
                neighbor_weight,
            } => {
                for_each_radial_cell(field, x, y, radius, |field, cx, cy, dist| {
                    if let Some(w) = self.radial_weight(dist) {
                        inject_splash(field, cx, cy, intensity * w, neighbor_weight);
                    }
                });
            }
            Self::Disk { radius, .. }
            | Self::Ripple { radius, .. }
            | Self::WaterDrop { radius, .. } => {
                let margin = self.margin();
                if margin > 0 && !field.has_margin(x, y, margin) {
                    return;
                }
                for_each_radial_cell(field, x, y, radius, |field, cx, cy, dist| {
                    if let Some(w) = self.radial_weight(dist) {
                        field.add(cx, cy, intensity * w);
                    }
                });
            }
        }
    }
}

/// A kernel paired with the intensity it is injected at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impulse {
    /// Falloff kernel
    pub kernel: Kernel,
    /// Peak intensity
    pub intensity: f32,
}

impl Impulse {
    /// Pair a kernel with an intensity
    pub const fn new(kernel: Kernel, intensity: f32) -> Self {
        Self { kernel, intensity }
    }

    /// Inject centred on `(x, y)`
    pub fn apply(&self, field: &mut HeightField, x: i32, y: i32) {
        self.kernel.apply(field, x, y, self.intensity);
    }
}

/// Single-cell injection
#[inline]
pub fn inject_point(field: &mut HeightField, x: i32, y: i32, intensity: f32) {
    field.add(x, y, intensity);
}

/// Center plus 8 neighbours; skipped unless the center is interior
pub fn inject_splash(
    field: &mut HeightField,
    x: i32,
    y: i32,
    intensity: f32,
    neighbor_weight: f32,
) {
    if !field.is_interior(x, y) {
        return;
    }
    field.add(x, y, intensity);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            field.add(x + dx, y + dy, intensity * neighbor_weight);
        }
    }
}

/// Walk the bounding square of radius `radius` around `(x, y)` and hand every
/// cell with its distance to `visit`
///
/// The reach is capped at the grid size; anything further is off the grid from
/// any center. Cells whose coordinates overflow are skipped.
fn for_each_radial_cell<F>(field: &mut HeightField, x: i32, y: i32, radius: f32, mut visit: F)
where
    F: FnMut(&mut HeightField, i32, i32, f32),
{
    let grid_reach = field.width().max(field.height()).min(i32::MAX as usize) as i32;
    let reach = (radius.max(0.0).floor() as i32).min(grid_reach);
    for dy in -reach..=reach {
        let Some(cy) = y.checked_add(dy) else {
            continue;
        };
        for dx in -reach..=reach {
            let Some(cx) = x.checked_add(dx) else {
                continue;
            };
            let dist = (f64::from(dx).powi(2) + f64::from(dy).powi(2)).sqrt() as f32;
            visit(field, cx, cy, dist);
        }
    }
}
