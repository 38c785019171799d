//! Live rule parameter setters.

use super::{status, VA_ERR_NULL, VA_OK};
use crate::simulator::Simulator;

/// Sets the tick interval in seconds.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// `VA_OK`, `VA_ERR_NULL` or `VA_ERR_INVALID_PARAMETER` for a negative or
/// non-finite value.
#[no_mangle]
pub unsafe extern "C" fn va_set_time_step(ptr: *mut Simulator, seconds: f32) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    status((*ptr).set_time_step(seconds))
}

/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
#[no_mangle]
pub unsafe extern "C" fn va_set_underpopulation_threshold(
    ptr: *mut Simulator,
    threshold: i32,
) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    (*ptr).set_underpopulation_threshold(threshold);
    VA_OK
}

/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
#[no_mangle]
pub unsafe extern "C" fn va_set_reproduction_criterion(ptr: *mut Simulator, criterion: i32) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    (*ptr).set_reproduction_criterion(criterion);
    VA_OK
}

/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
#[no_mangle]
pub unsafe extern "C" fn va_set_overpopulation_threshold(
    ptr: *mut Simulator,
    threshold: i32,
) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    (*ptr).set_overpopulation_threshold(threshold);
    VA_OK
}
