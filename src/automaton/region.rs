//! Bulk transfer of box-shaped regions between a grid and flat byte buffers.
//!
//! Buffers are laid out in z,y,x order (z changes slowest, x fastest), one
//! byte per cell: 0 = dead, 1 = alive. On import any non-zero byte is alive.

use super::grid::Grid;

/// Half-open box `[min, max)` clamped to the grid, or `None` if it is empty.
fn clamp_box(grid: &Grid, min: [i32; 3], max: [i32; 3]) -> Option<([i32; 3], [i32; 3])> {
    let dims = [grid.width(), grid.height(), grid.depth()];
    let mut lo = [0; 3];
    let mut hi = [0; 3];
    for axis in 0..3 {
        lo[axis] = min[axis].clamp(0, dims[axis]);
        hi[axis] = max[axis].clamp(0, dims[axis]);
        if lo[axis] >= hi[axis] {
            return None;
        }
    }
    Some((lo, hi))
}

/// Number of cells in the clamped box.
pub fn region_volume(grid: &Grid, min: [i32; 3], max: [i32; 3]) -> usize {
    match clamp_box(grid, min, max) {
        Some((lo, hi)) => (0..3).map(|a| (hi[a] - lo[a]) as usize).product(),
        None => 0,
    }
}

/// Copy the cells of `[min, max)` into `out`.
///
/// Coordinates are clamped to the grid. Writes nothing if `out` is shorter
/// than the clamped volume. Returns the number of bytes written.
pub fn extract_region(grid: &Grid, min: [i32; 3], max: [i32; 3], out: &mut [u8]) -> usize {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return 0;
    };
    let volume = region_volume(grid, min, max);
    if out.len() < volume {
        return 0;
    }

    let mut offset = 0;
    for z in lo[2]..hi[2] {
        for y in lo[1]..hi[1] {
            for x in lo[0]..hi[0] {
                out[offset] = grid.cells[grid.index_of(x, y, z)] as u8;
                offset += 1;
            }
        }
    }
    offset
}

/// Overwrite the cells of `[min, max)` from `input`.
///
/// Same clamping and layout as [`extract_region`]. Returns the number of
/// bytes read, or 0 if `input` is too short.
pub fn import_region(grid: &mut Grid, min: [i32; 3], max: [i32; 3], input: &[u8]) -> usize {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return 0;
    };
    if input.len() < region_volume(grid, min, max) {
        return 0;
    }

    let mut offset = 0;
    for z in lo[2]..hi[2] {
        for y in lo[1]..hi[1] {
            for x in lo[0]..hi[0] {
                let idx = grid.index_of(x, y, z);
                grid.cells[idx] = input[offset] != 0;
                offset += 1;
            }
        }
    }
    offset
}
