use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_sim_core::{Preset, WaveSimulation};
use std::ptr;
use tracing::debug;

use crate::error::{DefaultRippleSimError, RippleSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr_mut, track_error, track_result};

/// The ripple simulation context handed across the FFI boundary.
///
/// Owns the height field, the frame buffer and the random source used by
/// `ripple_sim_random_drop`.
///
/// # Thread Safety
/// An instance has no internal locking. All calls for one instance must come
/// from one thread at a time (typically the render loop). Separate instances
/// may be driven from separate threads.
///
/// # Usage
/// ```c
/// RippleSimInstance* sim = NULL;
/// if (ripple_sim_new(2, 0, 0, 0.0f, &sim) != Ok) {
///     return;
/// }
///
/// // per input event
/// ripple_sim_press(sim, mouse_x, mouse_y);
/// ripple_sim_drag(sim, last_x, last_y, mouse_x, mouse_y);
///
/// // per frame
/// ripple_sim_update(sim);
/// const uint32_t* pixels;
/// uint32_t width, height, pitch;
/// ripple_sim_get_pixels(sim, &pixels, &width, &height, &pitch);
/// upload_texture(pixels, width, height, pitch);
///
/// ripple_sim_destroy(sim);
/// ```
pub struct RippleSimInstance {
    pub(crate) sim: WaveSimulation,
    pub(crate) rng: StdRng,
}

/// Decode a preset discriminant: 0=Classic, 1=Grid, 2=Water
pub(crate) fn preset_from_u8(preset: u8) -> Result<Preset, DefaultRippleSimError> {
    match preset {
        0 => Ok(Preset::Classic),
        1 => Ok(Preset::Grid),
        2 => Ok(Preset::Water),
        _ => Err(DefaultRippleSimError::out_of_range("preset", preset, 2)),
    }
}

impl RippleSimInstance {
    /// Build an instance from a preset, overriding its size and damping where given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unknown preset or unusable grid size and
    /// `AllocationFailed` if the buffers cannot be allocated.
    pub(crate) fn new(
        preset: u8,
        width: u32,
        height: u32,
        damping: f32,
    ) -> Result<Box<Self>, DefaultRippleSimError> {
        let preset = preset_from_u8(preset)?;
        let mut config = preset.config();

        // Zero keeps the preset's grid size
        if width != 0 {
            config.width = width as usize;
        }
        if height != 0 {
            config.height = height as usize;
        }
        // Non-positive or NaN keeps the preset's damping
        if damping > 0.0 {
            config.damping = damping;
        }

        debug!(
            "FFI instance requested: preset={}, {}x{}, damping={}",
            preset, config.width, config.height, config.damping
        );

        let sim = WaveSimulation::new(config)?;
        Ok(Box::new(Self {
            sim,
            rng: StdRng::from_os_rng(),
        }))
    }
}

/// Create a new ripple simulation and return it via out-parameter.
///
/// Parameters
/// - `preset`: 0=Classic (400x300), 1=Grid (800x600), 2=Water (1200x800)
/// - `width`, `height`: grid size in cells, 0 keeps the preset's size
/// - `damping`: per-step damping in (0, 1], values <= 0 keep the preset's 0.99;
///   values above 1 are clamped to 1
/// - `out_instance`: receives the instance on success, null on failure
///
/// Returns
/// - `Ok` on success
/// - `NullPointer` if `out_instance` is null
/// - `InvalidParameter` for an unknown preset or a grid size whose cell count overflows
/// - `AllocationFailed` if the height field or frame buffer cannot be allocated
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `ripple_sim_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_new(
    preset: u8,
    width: u32,
    height: u32,
    damping: f32,
    out_instance: *mut *mut RippleSimInstance,
) -> RippleSimErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultRippleSimError::null_pointer("out_instance"));
    }

    match track_result(RippleSimInstance::new(preset, width, height, damping)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            RippleSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `ripple_sim_new`.
///
/// Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `ripple_sim_new` and not freed already.
/// - After this call the pointer and any pixel pointer obtained from it are invalid.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_destroy(ptr: *mut RippleSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `ripple_sim_new`, freed exactly once
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Reseed the random source used by `ripple_sim_random_drop`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_set_seed(
    ptr: *mut RippleSimInstance,
    seed: u64,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.rng = StdRng::seed_from_u64(seed);
        Ok(())
    })
}
