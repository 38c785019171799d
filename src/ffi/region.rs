//! Region extraction and import FFI functions.

use crate::simulator::Simulator;

/// Extracts a box of cells `[min, max)` into a flat output buffer.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest),
/// one byte per cell (0 = dead, 1 = alive). This matches the layout expected
/// by `va_import_region`. Coordinates are clamped to the grid.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
/// - `out_buf` must point to at least `buf_len` writable bytes, or be null
///
/// # Returns
/// Number of bytes written, or 0 on error (null pointer, no grid, empty box
/// or a buffer shorter than the clamped box).
#[no_mangle]
pub unsafe extern "C" fn va_extract_region(
    ptr: *const Simulator,
    out_buf: *mut u8,
    buf_len: usize,
    min_x: i32,
    min_y: i32,
    min_z: i32,
    max_x: i32,
    max_y: i32,
    max_z: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let out = std::slice::from_raw_parts_mut(out_buf, buf_len);
    (*ptr)
        .extract_region([min_x, min_y, min_z], [max_x, max_y, max_z], out)
        .map_or(0, |n| n as u64)
}

/// Overwrites a box of cells `[min, max)` from a flat buffer.
///
/// # Layout
/// Same as `va_extract_region`. Input values are normalized: 0 = dead,
/// non-zero = alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulator, or null
/// - `in_buf` must point to at least `buf_len` readable bytes, or be null
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn va_import_region(
    ptr: *mut Simulator,
    in_buf: *const u8,
    buf_len: usize,
    min_x: i32,
    min_y: i32,
    min_z: i32,
    max_x: i32,
    max_y: i32,
    max_z: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let input = std::slice::from_raw_parts(in_buf, buf_len);
    (*ptr)
        .import_region([min_x, min_y, min_z], [max_x, max_y, max_z], input)
        .map_or(0, |n| n as u64)
}
