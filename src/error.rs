//! Error types for the simulation core.
//!
//! Every fallible operation on a [`Grid`](crate::game_of_life::Grid) or a
//! [`SimulationEngine`](crate::game_of_life::SimulationEngine) returns
//! [`LifeError`]. All variants are recoverable: the caller rejects the input
//! and the engine keeps its previous state.

/// Errors raised by grid, rule and engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LifeError {
    /// Requested grid size is outside the supported range.
    #[error("grid size {size} is outside {min}..={max}")]
    InvalidSize {
        /// The rejected size.
        size: usize,
        /// Smallest supported size.
        min: usize,
        /// Largest supported size.
        max: usize,
    },

    /// A cell coordinate does not lie on the grid.
    #[error("cell ({row}, {col}) is out of bounds for a {size}x{size} grid")]
    OutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Grid width and height.
        size: usize,
    },

    /// Turn count is negative or above the batch cap.
    #[error("turn count {turns} is outside 0..={max}")]
    InvalidTurnCount {
        /// The rejected count.
        turns: i64,
        /// Largest batch accepted without clamping.
        max: usize,
    },

    /// Delay between generations is outside the accepted range.
    #[error("delay of {seconds}s is outside 0..={max}s")]
    InvalidDelay {
        /// The rejected delay.
        seconds: f64,
        /// Longest accepted delay.
        max: f64,
    },

    /// Save-file text does not follow the `.gol` format.
    #[error("malformed save file at line {line}: {reason}")]
    MalformedSaveFile {
        /// 1-based line number where parsing stopped.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl LifeError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LifeError::MalformedSaveFile {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LifeError::InvalidSize { size: 5, min: 10, max: 50 };
        assert_eq!(err.to_string(), "grid size 5 is outside 10..=50");

        let err = LifeError::OutOfBounds { row: 10, col: 2, size: 10 };
        assert_eq!(err.to_string(), "cell (10, 2) is out of bounds for a 10x10 grid");

        let err = LifeError::malformed(3, "unexpected character 'x'");
        assert_eq!(
            err.to_string(),
            "malformed save file at line 3: unexpected character 'x'"
        );
    }
}
