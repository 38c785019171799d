//! Dense 3D cell buffer, indexing and neighbor counting.

use rand::Rng;

use crate::error::{Result, SimError};

/// Offsets of the 26 cells surrounding a cell (3x3x3 block minus the center).
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = [
    (-1, -1, -1),
    (0, -1, -1),
    (1, -1, -1),
    (-1, 0, -1),
    (0, 0, -1),
    (1, 0, -1),
    (-1, 1, -1),
    (0, 1, -1),
    (1, 1, -1),
    (-1, -1, 0),
    (0, -1, 0),
    (1, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (-1, 1, 0),
    (0, 1, 0),
    (1, 1, 0),
    (-1, -1, 1),
    (0, -1, 1),
    (1, -1, 1),
    (-1, 0, 1),
    (0, 0, 1),
    (1, 0, 1),
    (-1, 1, 1),
    (0, 1, 1),
    (1, 1, 1),
];

/// All-dead buffer of `size` cells, or `None` if it cannot be allocated.
fn dead_buffer(size: usize) -> Option<Vec<bool>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size).ok()?;
    buf.resize(size, false);
    Some(buf)
}

/// A fixed-size 3D grid of boolean cells.
///
/// Cells are stored z-major: x changes fastest, then y, then z. `back` is the
/// write target of the next step and is swapped with `cells` afterwards.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    depth: i32,
    pub(crate) cells: Vec<bool>,
    pub(crate) back: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Every dimension must be at least 1.
    pub fn new(width: i32, height: i32, depth: i32) -> Result<Self> {
        let invalid = || SimError::InvalidDimension {
            width,
            height,
            depth,
        };
        if width < 1 || height < 1 || depth < 1 {
            return Err(invalid());
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|s| s.checked_mul(depth as usize))
            .ok_or_else(invalid)?;
        let cells = dead_buffer(size).ok_or_else(invalid)?;
        let back = dead_buffer(size).ok_or_else(invalid)?;

        Ok(Grid {
            width,
            height,
            depth,
            cells,
            back,
        })
    }

    /// Create a grid where every cell is independently alive with probability
    /// `spawn_probability` (a uniform draw in [0, 1) compared against it).
    ///
    /// The probability is not clamped: values <= 0 (or NaN) spawn nothing,
    /// values >= 1 spawn everything.
    pub fn random<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        depth: i32,
        spawn_probability: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Grid::new(width, height, depth)?;
        for cell in grid.cells.iter_mut() {
            *cell = rng.gen::<f32>() < spawn_probability;
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn dimensions(&self) -> (i32, i32, i32) {
        (self.width, self.height, self.depth)
    }

    /// Number of cells in one z-slice.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32, z: i32) -> usize {
        z as usize * self.plane_len() + y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.depth
    }

    fn checked_index(&self, x: i32, y: i32, z: i32) -> Result<usize> {
        if self.in_bounds(x, y, z) {
            Ok(self.index_of(x, y, z))
        } else {
            Err(SimError::OutOfBounds { x, y, z })
        }
    }

    pub fn is_alive(&self, x: i32, y: i32, z: i32) -> Result<bool> {
        let idx = self.checked_index(x, y, z)?;
        Ok(self.cells[idx])
    }

    pub fn set_alive(&mut self, x: i32, y: i32, z: i32, alive: bool) -> Result<()> {
        let idx = self.checked_index(x, y, z)?;
        self.cells[idx] = alive;
        Ok(())
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Count alive cells in the Moore neighborhood (26 neighbors).
    ///
    /// Neighbors outside the grid are skipped; edges do not wrap.
    pub fn count_neighbors(&self, x: i32, y: i32, z: i32) -> u8 {
        let mut count = 0;
        for &(dx, dy, dz) in NEIGHBOR_OFFSETS.iter() {
            let (nx, ny, nz) = (x + dx, y + dy, z + dz);
            if self.in_bounds(nx, ny, nz) && self.cells[self.index_of(nx, ny, nz)] {
                count += 1;
            }
        }
        count
    }

    /// Coordinates of every alive cell, in storage order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        let (w, h) = (self.width as usize, self.height as usize);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| ((i % w) as i32, ((i / w) % h) as i32, (i / (w * h)) as i32))
    }
}
