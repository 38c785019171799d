//! Synchronous whole-grid stepping with configurable thresholds.

use rayon::prelude::*;

use super::grid::Grid;
use crate::config::RuleParameters;

/// Outcome of a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSummary {
    /// Generation the grid holds after the step.
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub alive: usize,
}

/// Next state of one cell given its current state and alive neighbor count.
///
/// - Alive: dies if `neighbors < underpopulation` or `neighbors > overpopulation`
/// - Dead: born if `neighbors == reproduction`
#[inline]
pub fn next_state(alive: bool, neighbors: u8, rules: &RuleParameters) -> bool {
    let n = neighbors as i32;
    if alive {
        !(n < rules.underpopulation_threshold || n > rules.overpopulation_threshold)
    } else {
        n == rules.reproduction_criterion
    }
}

/// Advance the grid by one generation.
///
/// Every cell reads the frozen current buffer and writes into the back
/// buffer; z-slices are filled in parallel and the buffers are swapped only
/// once all of them are done. Returns `(births, deaths, alive)`.
pub fn step_grid(grid: &mut Grid, rules: &RuleParameters) -> (usize, usize, usize) {
    let plane = grid.plane_len();
    let mut next = std::mem::take(&mut grid.back);
    next.resize(grid.cells.len(), false);

    let current: &Grid = grid;
    let (births, deaths, alive) = next
        .par_chunks_mut(plane)
        .enumerate()
        .map(|(z, slice)| step_slice(current, z as i32, slice, rules))
        .reduce(|| (0, 0, 0), |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2));

    grid.back = std::mem::replace(&mut grid.cells, next);
    (births, deaths, alive)
}

fn step_slice(
    grid: &Grid,
    z: i32,
    slice: &mut [bool],
    rules: &RuleParameters,
) -> (usize, usize, usize) {
    let (mut births, mut deaths, mut alive) = (0, 0, 0);
    let width = grid.width() as usize;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let was_alive = grid.cells[grid.index_of(x, y, z)];
            let neighbors = grid.count_neighbors(x, y, z);
            let now_alive = next_state(was_alive, neighbors, rules);

            slice[y as usize * width + x as usize] = now_alive;
            match (was_alive, now_alive) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
            if now_alive {
                alive += 1;
            }
        }
    }

    (births, deaths, alive)
}
