//! Bounded square grid for the Game of Life

use crate::error::LifeError;

/// Smallest supported grid width/height
pub const MIN_SIZE: usize = 10;

/// Largest supported grid width/height
pub const MAX_SIZE: usize = 50;

/// Square grid of cells with a closed (non-wrapping) boundary
#[derive(Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid of dead cells
    pub fn new(size: usize) -> Result<Self, LifeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(LifeError::InvalidSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        let mut cells = Self::storage();
        cells.resize(size * size, false);

        Ok(Self { size, cells })
    }

    /// Backing storage sized for the largest grid; only size * size cells are in use
    fn storage() -> Vec<bool> {
        Vec::with_capacity(MAX_SIZE * MAX_SIZE)
    }

    /// Create a grid from row-major rows of booleans
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, LifeError> {
        let mut grid = Self::new(rows.len())?;

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != grid.size {
                return Err(LifeError::OutOfBounds {
                    row,
                    col: values.len().saturating_sub(1),
                    size: grid.size,
                });
            }
            for (col, alive) in values.into_iter().enumerate() {
                let idx = grid.index(row, col);
                grid.cells[idx] = alive;
            }
        }

        Ok(grid)
    }

    /// Width and height of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, LifeError> {
        if row >= self.size || col >= self.size {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> Result<bool, LifeError> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates, overwriting whatever was there
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), LifeError> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool, LifeError> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Count living neighbors of a cell; neighbors off the grid are dead
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> Result<u8, LifeError> {
        self.check_bounds(row, col)?;
        Ok(self.neighbors_unchecked(row, col))
    }

    /// Neighbor count for a coordinate already known to be on the grid
    pub(crate) fn neighbors_unchecked(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let r = row as isize + dr;
                let c = col as isize + dc;

                if self.is_neighbor_alive(r, c) {
                    count += 1;
                }
            }
        }

        count
    }

    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        let size = self.size as isize;
        if row >= 0 && row < size && col >= 0 && col < size {
            self.cells[self.index(row as usize, col as usize)]
        } else {
            false
        }
    }

    pub(crate) fn flip_unchecked(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = !self.cells[idx];
    }

    /// Iterate over rows as slices of cells
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size)
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

/// Clamp a requested size into the supported range
pub fn clamp_size(requested: i64) -> usize {
    requested.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as usize
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        let mut cells = Self::storage();
        cells.extend_from_slice(&self.cells);
        Self {
            size: self.size,
            cells,
        }
    }
}
