use ripple_sim_core::SimError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - Returns the error code handed back to the caller
/// - `msg()` - Returns the message stored for `ripple_sim_get_last_error`
pub(crate) trait RippleSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> RippleSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default `RippleSimError` implementation: a code plus a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultRippleSimError {
    code: RippleSimErrorCode,
    msg: String,
}

impl DefaultRippleSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: RippleSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an enum discriminant outside its range.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter (e.g., `"preset"`, `"kind"`)
    /// * `value` - The value received
    /// * `max` - Largest accepted value
    pub fn out_of_range(param_name: &str, value: u8, max: u8) -> Self {
        Self::invalid_parameter(format!(
            "Invalid {param_name}: {value}. Must be 0-{max}"
        ))
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: RippleSimErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<SimError> for DefaultRippleSimError {
    fn from(error: SimError) -> Self {
        let code = match error {
            SimError::Allocation { .. } => RippleSimErrorCode::AllocationFailed,
            SimError::InvalidDimensions { .. } => RippleSimErrorCode::InvalidParameter,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl RippleSimError for DefaultRippleSimError {
    fn code(&self) -> RippleSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by ripple simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter: unknown preset, kernel or color map, or an unusable grid size.
    InvalidParameter = 2,

    /// The height field or frame buffer could not be allocated.
    AllocationFailed = 3,
}

impl From<DefaultRippleSimError> for RippleSimErrorCode {
    fn from(error: DefaultRippleSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is kept here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, RippleSimErrorCode)> = const { RefCell::new((None, RippleSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, RippleSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, RippleSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made yet.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// RippleSimInstance* sim = NULL;
/// RippleSimErrorCode err = ripple_sim_new(2, 0, 0, 0.0f, &sim);
/// if (err != Ok) {
///     const char* error = ripple_sim_get_last_error();
///     if (error) {
///         fprintf(stderr, "Ripple sim creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn ripple_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn ripple_sim_get_last_error_code() -> RippleSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
