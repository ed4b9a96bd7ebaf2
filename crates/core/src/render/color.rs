//! Height to ARGB8888 color policies

use serde::{Deserialize, Serialize};

/// Opaque alpha in the top byte
pub const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Base water tint (r, g, b) in [0, 1]
pub const WATER_BASE: (f32, f32, f32) = (0.1, 0.2, 0.4);

/// Selects how a height value is shaded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorMap {
    /// Calm water white, high amplitude of either sign dark
    Grayscale {
        /// Byte intensity per unit of `|height|`
        scale: f32,
        /// Heights with `|height| <= deadband` render pure white
        deadband: f32,
    },
    /// Tinted water with foam on high crests and a soft highlight on positive heights
    #[default]
    Water,
    /// Blue glow on black: `(i/3, i/2, i)` with `i = min(|height| · scale, 255)`
    Azure {
        /// Byte intensity per unit of `|height|`
        scale: f32,
    },
    /// Monochrome ink with lightened foam on peaks
    Foam,
}

impl ColorMap {
    /// Grayscale at 512 per unit height, no deadband
    pub const fn grayscale() -> Self {
        Self::Grayscale {
            scale: 512.0,
            deadband: 0.0,
        }
    }

    /// Grayscale at 400 per unit height, ignoring residual waves up to 0.1
    pub const fn grayscale_thresholded() -> Self {
        Self::Grayscale {
            scale: 400.0,
            deadband: 0.1,
        }
    }

    /// Map one height to a packed ARGB8888 pixel
    #[inline]
    pub fn map(&self, height: f32) -> u32 {
        match *self {
            Self::Grayscale { scale, deadband } => grayscale(height, scale, deadband),
            Self::Water => water(height),
            Self::Azure { scale } => azure(height, scale),
            Self::Foam => foam(height),
        }
    }
}

/// Pack opaque `(r, g, b)` into ARGB8888
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    ALPHA_OPAQUE | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Split an ARGB8888 pixel into `[a, r, g, b]`
#[inline]
pub fn unpack_argb(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// `|height| · scale` clamped to a byte, truncating
#[inline]
fn amplitude_byte(height: f32, scale: f32) -> u8 {
    (height.abs() * scale).min(255.0) as u8
}

/// Unit float to byte, truncating
#[inline]
fn unit_byte(v: f32) -> u8 {
    (v * 255.0) as u8
}

fn grayscale(height: f32, scale: f32, deadband: f32) -> u32 {
    if height.abs() <= deadband {
        return pack_argb(255, 255, 255);
    }
    let value = 255 - amplitude_byte(height, scale);
    pack_argb(value, value, value)
}

fn water(height: f32) -> u32 {
    let (base_r, base_g, base_b) = WATER_BASE;

    let foam = ((height - 0.3) * 3.0).clamp(0.0, 1.0);
    let light = (height.max(0.0) * 1.5).min(0.8);

    let r = (base_r + foam + light * 0.3).clamp(0.0, 1.0);
    let g = (base_g + foam * 0.8 + light * 0.4).clamp(0.0, 1.0);
    let b = (base_b + foam + light * 0.2).clamp(0.0, 1.0);

    pack_argb(unit_byte(r), unit_byte(g), unit_byte(b))
}

fn azure(height: f32, scale: f32) -> u32 {
    let i = amplitude_byte(height, scale);
    pack_argb(i / 3, i / 2, i)
}

fn foam(height: f32) -> u32 {
    let mut intensity = height.abs() * 3.0;
    if height > 0.2 {
        // Peaks read lighter
        intensity -= (height - 0.2) * 4.0 * 0.5;
    }
    let value = unit_byte(1.0 - intensity.clamp(0.0, 1.0));
    pack_argb(value, value, value)
}
