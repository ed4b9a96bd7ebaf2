use crate::error::{DefaultRippleSimError, RippleSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr};
use crate::instance::RippleSimInstance;

/// Field statistics of the displayed height buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RippleSimStats {
    /// Sum of squared heights
    pub energy: f64,
    /// Largest absolute height
    pub peak: f32,
    /// Cells with a visible displacement
    pub active_cells: u64,
    /// Steps since creation or the last reset
    pub steps: u64,
}

/// Hand back the frame buffer for texture upload.
///
/// Pixels are packed ARGB8888 (`0xAARRGGBB` as native `uint32_t`), row-major,
/// `out_pitch` bytes per row.
///
/// # Lifetime
/// `*out_pixels` points into the instance and stays valid until the next
/// `ripple_sim_refresh`, `ripple_sim_update`, `ripple_sim_reset` or
/// `ripple_sim_destroy` on the same instance. Do not free it.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `ripple_sim_new`.
/// - All out pointers must be non-null and valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_get_pixels(
    ptr: *const RippleSimInstance,
    out_pixels: *mut *const u32,
    out_width: *mut u32,
    out_height: *mut u32,
    out_pitch: *mut u32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_pixels.is_null() {
            return Err(DefaultRippleSimError::null_pointer("out_pixels"));
        }
        if out_width.is_null() {
            return Err(DefaultRippleSimError::null_pointer("out_width"));
        }
        if out_height.is_null() {
            return Err(DefaultRippleSimError::null_pointer("out_height"));
        }
        if out_pitch.is_null() {
            return Err(DefaultRippleSimError::null_pointer("out_pitch"));
        }

        let frame = instance.sim.frame();
        // SAFETY: all out pointers checked non-null above
        unsafe {
            *out_pixels = frame.pixels().as_ptr();
            *out_width = frame.width() as u32;
            *out_height = frame.height() as u32;
            *out_pitch = frame.pitch() as u32;
        }
        Ok(())
    })
}

/// Read field statistics into `out_stats`.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `ripple_sim_new`.
/// - `out_stats` must be non-null and valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_get_stats(
    ptr: *const RippleSimInstance,
    out_stats: *mut RippleSimStats,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let Some(out) = (unsafe { out_stats.as_mut() }) else {
            return Err(DefaultRippleSimError::null_pointer("out_stats"));
        };

        let stats = instance.sim.stats();
        *out = RippleSimStats {
            energy: stats.energy,
            peak: stats.peak,
            active_cells: stats.active_cells as u64,
            steps: instance.sim.steps(),
        };
        Ok(())
    })
}
