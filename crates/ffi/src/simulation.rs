use ripple_sim_core::{ColorMap, ExecutionMode};

use crate::error::{DefaultRippleSimError, RippleSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr_mut};
use crate::instance::RippleSimInstance;

/// Decode a color map discriminant:
/// 0=Grayscale, 1=Grayscale with deadband, 2=Water, 3=Azure, 4=Foam
pub(crate) fn color_map_from_u8(color_map: u8) -> Result<ColorMap, DefaultRippleSimError> {
    match color_map {
        0 => Ok(ColorMap::grayscale()),
        1 => Ok(ColorMap::grayscale_thresholded()),
        2 => Ok(ColorMap::Water),
        3 => Ok(ColorMap::Azure { scale: 255.0 }),
        4 => Ok(ColorMap::Foam),
        _ => Err(DefaultRippleSimError::out_of_range("color_map", color_map, 4)),
    }
}

/// Advance the wave one time step. The frame is not touched.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_step(ptr: *mut RippleSimInstance) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.step();
        Ok(())
    })
}

/// Rebuild the frame from the current height buffer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_refresh(ptr: *mut RippleSimInstance) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.refresh();
        Ok(())
    })
}

/// One frame: step, then refresh.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_update(ptr: *mut RippleSimInstance) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.update();
        Ok(())
    })
}

/// Zero the height field without reallocating and show a calm frame.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_reset(ptr: *mut RippleSimInstance) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.reset();
        Ok(())
    })
}

/// Switch the color policy. Takes effect on the next refresh.
///
/// See `color_map_from_u8` for the accepted values (0-4).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_set_color_map(
    ptr: *mut RippleSimInstance,
    color_map: u8,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.set_color_map(color_map_from_u8(color_map)?);
        Ok(())
    })
}

/// Change the per-step damping. Values outside (0, 1] are clamped.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_set_damping(
    ptr: *mut RippleSimInstance,
    damping: f32,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.set_damping(damping);
        Ok(())
    })
}

/// Enable or disable the row-band parallel stencil and refresh passes.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
#[no_mangle]
pub unsafe extern "C" fn ripple_sim_set_parallel(
    ptr: *mut RippleSimInstance,
    parallel: bool,
) -> RippleSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr_mut(ptr) }?;
        instance.sim.set_execution(if parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Serial
        });
        Ok(())
    })
}
