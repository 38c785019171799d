//! Grid initialization, stepping and cell access.

use super::{status, VA_ERR_NULL, VA_OK};
use crate::simulator::Simulator;

/// Replaces the grid with a fresh random one.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// `VA_OK`, `VA_ERR_NULL` or `VA_ERR_INVALID_DIMENSION`.
#[no_mangle]
pub unsafe extern "C" fn va_initialize(
    ptr: *mut Simulator,
    width: i32,
    height: i32,
    depth: i32,
    spawn_probability: f32,
) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    status((*ptr).initialize(width, height, depth, spawn_probability))
}

/// Same as `va_initialize`, with a reproducible spawn draw.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
#[no_mangle]
pub unsafe extern "C" fn va_initialize_seeded(
    ptr: *mut Simulator,
    width: i32,
    height: i32,
    depth: i32,
    spawn_probability: f32,
    seed: u64,
) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    status((*ptr).initialize_seeded(width, height, depth, spawn_probability, seed))
}

/// Sets a cell to alive (non-zero) or dead (0).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// `VA_OK`, `VA_ERR_NULL`, `VA_ERR_NOT_INITIALIZED` or `VA_ERR_OUT_OF_BOUNDS`.
#[no_mangle]
pub unsafe extern "C" fn va_set_cell(
    ptr: *mut Simulator,
    x: i32,
    y: i32,
    z: i32,
    alive: u8,
) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    status((*ptr).set_alive(x, y, z, alive != 0))
}

/// Gets the state of a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// 1 if alive; 0 if dead, out of bounds, uninitialized or null.
#[no_mangle]
pub unsafe extern "C" fn va_is_alive(ptr: *const Simulator, x: i32, y: i32, z: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).is_alive(x, y, z).map_or(0, u8::from)
}

/// Gets the state of a cell, reporting why a read failed.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
/// - `alive` must be valid for writes, or null
///
/// # Returns
/// `VA_OK` with 0 or 1 written to `alive`; otherwise `VA_ERR_NULL`,
/// `VA_ERR_NOT_INITIALIZED` or `VA_ERR_OUT_OF_BOUNDS` and `alive` untouched.
#[no_mangle]
pub unsafe extern "C" fn va_query_cell(
    ptr: *const Simulator,
    x: i32,
    y: i32,
    z: i32,
    alive: *mut u8,
) -> i32 {
    if ptr.is_null() || alive.is_null() {
        return VA_ERR_NULL;
    }
    match (*ptr).is_alive(x, y, z) {
        Ok(state) => {
            *alive = u8::from(state);
            VA_OK
        }
        Err(err) => super::error_code(&err),
    }
}

/// Advances the automaton by one generation.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// `VA_OK`, `VA_ERR_NULL` or `VA_ERR_NOT_INITIALIZED`.
#[no_mangle]
pub unsafe extern "C" fn va_step(ptr: *mut Simulator) -> i32 {
    if ptr.is_null() {
        return VA_ERR_NULL;
    }
    status((*ptr).step())
}

/// Writes the grid dimensions into the three out-pointers.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
/// - the out-pointers must be valid for writes, or null
#[no_mangle]
pub unsafe extern "C" fn va_get_dimensions(
    ptr: *const Simulator,
    width: *mut i32,
    height: *mut i32,
    depth: *mut i32,
) -> i32 {
    if ptr.is_null() || width.is_null() || height.is_null() || depth.is_null() {
        return VA_ERR_NULL;
    }
    match (*ptr).dimensions() {
        Ok((w, h, d)) => {
            *width = w;
            *height = h;
            *depth = d;
            VA_OK
        }
        Err(err) => super::error_code(&err),
    }
}

/// Number of alive cells, or 0 if null or uninitialized.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
#[no_mangle]
pub unsafe extern "C" fn va_alive_count(ptr: *const Simulator) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).alive_count().map_or(0, |n| n as u64)
}
