use ripple_sim_core::Kernel;

use crate::error::{DefaultRippleSimError, RippleSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr_mut};
use crate::instance::RippleSimInstance;

/// Decode a kernel discriminant:
/// 0=Point, 1=Splash (3x3), 2=Disk (radius 2), 3=Ripple, 4=Water drop,
/// 5=Disk of splashes (radius 2)
pub(crate) fn kernel_from_u8(kind: u8) -> Result<Kernel, DefaultRippleSimError> {
    match kind {
        0 => Ok(Kernel::Point),
        1 => Ok(Kernel::splash()),
        2 => Ok(Kernel::disk(2.0, 1.0)),
        3 => Ok(Kernel::ripple()),
        4 => Ok(Kernel::water_drop()),
        5 => Ok(Kernel::splash_disk(2.0)),
        _ => Err(DefaultRippleSimError::out_of_range("kind", kind, 5)),
    }
}

/// Add `intensity` to a single cell. Boundary and out-of-range cells are ignored.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_add_disturbance(
    ptr: *mut RippleSimInstance,
    x: i32,
    y: i32,
    intensity: f32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.inject(Kernel::Point, x, y, intensity);
        Ok(())
    })
}

/// Inject a kernel centred on `(x, y)`. See `kernel_from_u8` for `kind` (0-5).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_inject(
    ptr: *mut RippleSimInstance,
    kind: u8,
    x: i32,
    y: i32,
    intensity: f32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        let kernel = kernel_from_u8(kind)?;
        instance.sim.inject(kernel, x, y, intensity);
        Ok(())
    })
}

/// Pointer pressed at `(x, y)`; injects the preset's press impulse.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_press(
    ptr: *mut RippleSimInstance,
    x: i32,
    y: i32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.press(x, y);
        Ok(())
    })
}

/// Pointer dragged from `(prev_x, prev_y)` to `(x, y)`.
///
/// The caller tracks the previous pointer position; nothing is remembered
/// between calls.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_drag(
    ptr: *mut RippleSimInstance,
    prev_x: i32,
    prev_y: i32,
    x: i32,
    y: i32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.drag(prev_x, prev_y, x, y);
        Ok(())
    })
}

/// Inject the preset's random-drop impulse at a random position.
///
/// The chosen center is written to `out_x`/`out_y` when they are non-null.
/// On grids too small for the kernel nothing is injected and both are set to -1.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `ripple_sim_new`.
/// - `out_x` and `out_y` must each be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_random_drop(
    ptr: *mut RippleSimInstance,
    out_x: *mut i32,
    out_y: *mut i32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        let (x, y) = instance
            .sim
            .random_drop(&mut instance.rng)
            .unwrap_or((-1, -1));

        // SAFETY: the caller guarantees non-null out pointers are writable
        unsafe {
            if let Some(out) = out_x.as_mut() {
                *out = x;
            }
            if let Some(out) = out_y.as_mut() {
                *out = y;
            }
        }
        Ok(())
    })
}
