//! Game of Life transition rule and per-generation deltas

use super::Grid;
use crate::error::LifeError;

/// Game of Life rules engine
pub struct GameOfLifeRules;

/// Cells whose state flips in one generation
///
/// Built from a read-only view of the current grid, so no decision can
/// observe a neighbor that was already updated in the same generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationDelta {
    flips: Vec<(usize, usize)>,
}

impl GameOfLifeRules {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }

    /// Compute every flip needed to move `current` one generation forward
    pub fn compute_delta(current: &Grid) -> GenerationDelta {
        let size = current.size();
        let mut flips = Vec::new();

        for (row, cells) in current.rows().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                let neighbors = current.neighbors_unchecked(row, col);
                if Self::should_be_alive(alive, neighbors) != alive {
                    flips.push((row, col));
                }
            }
        }

        debug_assert!(flips.iter().all(|&(r, c)| r < size && c < size));
        GenerationDelta { flips }
    }

    /// Produce the next generation without touching `current`
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::compute_delta(current).apply_unchecked(&mut next);
        next
    }
}

impl GenerationDelta {
    /// Coordinates that change state
    pub fn flips(&self) -> &[(usize, usize)] {
        &self.flips
    }

    /// Number of cells that change state
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    /// True when the generation is a still life
    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// Apply every flip, or none if any coordinate is off the grid
    pub fn apply(&self, grid: &mut Grid) -> Result<(), LifeError> {
        let size = grid.size();
        if let Some(&(row, col)) = self.flips.iter().find(|&&(r, c)| r >= size || c >= size) {
            return Err(LifeError::OutOfBounds { row, col, size });
        }
        self.apply_unchecked(grid);
        Ok(())
    }

    pub(crate) fn apply_unchecked(&self, grid: &mut Grid) {
        for &(row, col) in &self.flips {
            grid.flip_unchecked(row, col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &(r, c) in alive {
            grid.set(r, c, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_rule_logic() {
        assert!(!GameOfLifeRules::should_be_alive(true, 0));
        assert!(!GameOfLifeRules::should_be_alive(true, 1));
        assert!(GameOfLifeRules::should_be_alive(true, 2));
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(!GameOfLifeRules::should_be_alive(true, 4));
        assert!(!GameOfLifeRules::should_be_alive(true, 8));
        assert!(GameOfLifeRules::should_be_alive(false, 3));
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
        assert!(!GameOfLifeRules::should_be_alive(false, 4));
    }

    #[test]
    fn test_still_life_block() {
        let grid = grid_with(10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);
        let delta = GameOfLifeRules::compute_delta(&grid);
        assert!(delta.is_empty());
        assert_eq!(GameOfLifeRules::evolve(&grid), grid);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid_with(10, &[(5, 4), (5, 5), (5, 6)]);
        let vertical = grid_with(10, &[(4, 5), (5, 5), (6, 5)]);

        let evolved = GameOfLifeRules::evolve(&horizontal);
        assert_eq!(evolved, vertical);
        assert_eq!(GameOfLifeRules::evolve(&evolved), horizontal);
        assert_eq!(GameOfLifeRules::compute_delta(&horizontal).len(), 4);
    }

    #[test]
    fn test_glider_next_generation() {
        //  .#.      ...
        //  ..#  ->  #.#
        //  ###      .##
        //           .#.
        let glider = grid_with(10, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let expected = grid_with(10, &[(1, 0), (1, 2), (2, 1), (2, 2), (3, 1)]);
        assert_eq!(GameOfLifeRules::evolve(&glider), expected);
    }

    #[test]
    fn test_blinker_against_edge() {
        // Cells beyond row 0 are dead, so the vertical phase loses its top cell
        let grid = grid_with(10, &[(0, 3), (0, 4), (0, 5)]);
        let expected = grid_with(10, &[(0, 4), (1, 4)]);
        assert_eq!(GameOfLifeRules::evolve(&grid), expected);
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        let grid = Grid::new(20).unwrap();
        let mut evolved = grid.clone();
        for _ in 0..7 {
            evolved = GameOfLifeRules::evolve(&evolved);
            assert!(GameOfLifeRules::compute_delta(&evolved).is_empty());
        }
        assert_eq!(evolved, grid);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let big = grid_with(20, &[(15, 14), (15, 15), (15, 16)]);
        let delta = GameOfLifeRules::compute_delta(&big);

        let mut small = grid_with(10, &[(1, 1)]);
        let before = small.clone();
        assert!(matches!(delta.apply(&mut small), Err(LifeError::OutOfBounds { .. })));
        assert_eq!(small, before);

        let mut same = big.clone();
        delta.apply(&mut same).unwrap();
        assert_eq!(same, GameOfLifeRules::evolve(&big));
    }
}
