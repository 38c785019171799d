//! Simulator creation, destruction, logging setup and generation queries.

use log::warn;

use crate::simulator::Simulator;

/// Creates a new uninitialized simulator with default rules and returns an
/// opaque pointer.
///
/// # Safety
/// The returned pointer must eventually be freed with `va_destroy()`.
#[no_mangle]
pub extern "C" fn va_create() -> *mut Simulator {
    Box::into_raw(Box::new(Simulator::new()))
}

/// Creates a simulator that steps on its own pool of `num_threads` threads.
///
/// # Returns
/// A pointer to a new Simulator, or null if the pool could not be built.
#[no_mangle]
pub extern "C" fn va_create_with_threads(num_threads: u8) -> *mut Simulator {
    match Simulator::with_threads(num_threads) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            warn!("va_create_with_threads: {}", err);
            std::ptr::null_mut()
        }
    }
}

/// Destroys a simulator and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `va_create*()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn va_destroy(ptr: *mut Simulator) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null or no grid exists.
#[no_mangle]
pub unsafe extern "C" fn va_get_generation(ptr: *const Simulator) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation().unwrap_or(0)
}

/// Routes `log` output to stderr, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
#[no_mangle]
pub extern "C" fn va_init_logging() {
    let _ = env_logger::try_init();
}
