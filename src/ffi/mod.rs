//! C FFI layer for foreign presentation layers.
//!
//! This module exports C ABI functions over an opaque `Simulator` handle.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in `simulator` and `automaton`. These functions are
//! thin wrappers that handle null checks, pointer safety and the mapping of
//! `SimError` onto integer status codes.

pub mod grid;
pub mod lifecycle;
pub mod params;
pub mod region;

pub use grid::{
    va_alive_count, va_get_dimensions, va_initialize, va_initialize_seeded, va_is_alive,
    va_query_cell, va_set_cell, va_step,
};
pub use lifecycle::{
    va_create, va_create_with_threads, va_destroy, va_get_generation, va_init_logging,
};
pub use params::{
    va_set_overpopulation_threshold, va_set_reproduction_criterion, va_set_time_step,
    va_set_underpopulation_threshold,
};
pub use region::{va_extract_region, va_import_region};

use crate::error::SimError;

pub const VA_OK: i32 = 0;
pub const VA_ERR_NULL: i32 = 1;
pub const VA_ERR_INVALID_DIMENSION: i32 = 2;
pub const VA_ERR_INVALID_PARAMETER: i32 = 3;
pub const VA_ERR_NOT_INITIALIZED: i32 = 4;
pub const VA_ERR_OUT_OF_BOUNDS: i32 = 5;
pub const VA_ERR_OTHER: i32 = 6;

/// Stable status code for an error.
pub fn error_code(err: &SimError) -> i32 {
    match err {
        SimError::InvalidDimension { .. } => VA_ERR_INVALID_DIMENSION,
        SimError::InvalidParameter(_) => VA_ERR_INVALID_PARAMETER,
        SimError::NotInitialized => VA_ERR_NOT_INITIALIZED,
        SimError::OutOfBounds { .. } => VA_ERR_OUT_OF_BOUNDS,
        SimError::Config(_) | SimError::ThreadPool(_) => VA_ERR_OTHER,
    }
}

pub(crate) fn status<T>(result: crate::error::Result<T>) -> i32 {
    match result {
        Ok(_) => VA_OK,
        Err(err) => error_code(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            error_code(&SimError::InvalidDimension {
                width: 0,
                height: 1,
                depth: 1,
            }),
            error_code(&SimError::InvalidParameter("x".into())),
            error_code(&SimError::NotInitialized),
            error_code(&SimError::OutOfBounds { x: 0, y: 0, z: 0 }),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, VA_OK);
            assert_ne!(*a, VA_ERR_NULL);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
