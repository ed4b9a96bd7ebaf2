use crate::error::{with_last_error_mut, DefaultRippleSimError, RippleSimError, RippleSimErrorCode};
use crate::instance::RippleSimInstance;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl RippleSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` and return its code.
#[inline]
pub(crate) fn track_error(error: &impl RippleSimError) -> RippleSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = RippleSimErrorCode::Ok;
    });
}

/// Record the error of a failed result, clear it on success.
pub(crate) fn track_result<T, E: RippleSimError>(result: Result<T, E>) -> Result<T, RippleSimErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its outcome into an error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> RippleSimErrorCode
where
    F: FnOnce() -> Result<(), DefaultRippleSimError>,
{
    match track_result(f()) {
        Ok(()) => RippleSimErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const RippleSimInstance,
) -> Result<&'a RippleSimInstance, DefaultRippleSimError> {
    // SAFETY: non-null pointers come from `Box::into_raw` in `ripple_sim_new`
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultRippleSimError::null_pointer("ptr"))
}

/// Mutably borrow the instance behind `ptr`.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `ripple_sim_new`, with no
/// other reference to the instance alive for the duration of the borrow.
pub(crate) unsafe fn instance_from_ptr_mut<'a>(
    ptr: *mut RippleSimInstance,
) -> Result<&'a mut RippleSimInstance, DefaultRippleSimError> {
    // SAFETY: see above; the caller guarantees exclusive access
    unsafe { ptr.as_mut() }.ok_or_else(|| DefaultRippleSimError::null_pointer("ptr"))
}
