//! Frame buffer refresh
//!
//! The frame buffer is a flat ARGB8888 pixel array with the same row-major
//! layout as the height field. It is rebuilt in full from the field's current
//! buffer every refresh and handed to the presentation layer as raw pixels.

mod color;

pub use color::{pack_argb, unpack_argb, ColorMap, ALPHA_OPAQUE, WATER_BASE};

use crate::error::{cell_count, try_filled, SimResult};
use crate::field::HeightField;
use crate::solver::ExecutionMode;
use rayon::prelude::*;

/// Bytes per ARGB8888 pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Packed ARGB8888 pixels sized to the simulation grid
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    /// Allocate an opaque black frame
    ///
    /// # Errors
    ///
    /// Returns an error for zero or overflowing dimensions, or if the pixel
    /// buffer cannot be reserved.
    pub fn new(width: usize, height: usize) -> SimResult<Self> {
        let cells = cell_count(width, height)?;
        let pixels = try_filled(cells, ALPHA_OPAQUE)?;
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Native-endian byte view of the pixels for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.pixels[y * self.width + x]
    }

    /// Recolor every pixel from `field.current()`
    pub fn refresh(&mut self, field: &HeightField, color_map: &ColorMap) {
        self.refresh_with(field, color_map, ExecutionMode::Serial);
    }

    /// Recolor every pixel from `field.current()` using the given execution mode
    pub fn refresh_with(
        &mut self,
        field: &HeightField,
        color_map: &ColorMap,
        mode: ExecutionMode,
    ) {
        debug_assert_eq!(self.width, field.width());
        debug_assert_eq!(self.height, field.height());

        let heights = field.current();
        match mode {
            ExecutionMode::Serial => {
                for (pixel, &h) in self.pixels.iter_mut().zip(heights) {
                    *pixel = color_map.map(h);
                }
            }
            ExecutionMode::Parallel => {
                self.pixels
                    .par_iter_mut()
                    .zip(heights.par_iter())
                    .for_each(|(pixel, &h)| *pixel = color_map.map(h));
            }
        }
    }
}
