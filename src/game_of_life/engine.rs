//! Simulation engine: owns the grid, advances generations and paces them
//!
//! The engine never prompts anyone. Decisions that need a human (advancing
//! more than [`MAX_TURNS`] generations, a delay below the photosensitivity
//! threshold) are exposed as [`TurnRequest`] and [`DelayCheck`] so the caller
//! can ask before committing.

use super::{io, GameOfLifeRules, Grid};
use crate::error::LifeError;
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::{debug, info};

/// Largest number of generations advanced in one batch
pub const MAX_TURNS: usize = 50;

/// Delay between generations when nothing else is configured
pub const DEFAULT_DELAY_SECONDS: f64 = 0.5;

/// Longest accepted delay between generations
pub const MAX_DELAY_SECONDS: f64 = 10.0;

/// Refresh intervals shorter than this may affect photosensitive viewers
pub const DANGER_REFRESH_SECONDS: f64 = 1.333333;

/// Progress information handed to observers after each generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generations advanced since the grid was created or loaded
    pub generation: u64,
    /// Position of this generation within the current batch (1-based)
    pub turn: usize,
    /// Size of the current batch
    pub of: usize,
    /// Cells that changed state in this generation
    pub flipped: usize,
}

impl GenerationReport {
    /// True for the last generation of the batch
    pub fn is_final(&self) -> bool {
        self.turn == self.of
    }
}

/// Called after each generation is fully applied
///
/// Returning `ControlFlow::Break(())` cancels the rest of the batch; the grid
/// stays at the generation that was just reported.
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport, grid: &Grid) -> ControlFlow<()>;
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport, &Grid) -> ControlFlow<()>,
{
    fn on_generation(&mut self, report: &GenerationReport, grid: &Grid) -> ControlFlow<()> {
        self(report, grid)
    }
}

/// Observer that never interrupts and renders nothing
pub struct NoOpObserver;

impl GenerationObserver for NoOpObserver {
    fn on_generation(&mut self, _report: &GenerationReport, _grid: &Grid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// How a [`SimulationEngine::advance`] call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Zero turns were requested
    NoChange,
    /// Every requested generation was applied
    Completed { generations: usize },
    /// The observer stopped the batch early
    Cancelled { completed: usize },
}

/// Classification of a requested turn count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRequest {
    NoChange,
    Within(usize),
    /// Above [`MAX_TURNS`]; the caller must confirm advancing the capped amount
    OverCap { requested: u64 },
}

/// Advisory classification of a delay that is inside the accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayCheck {
    Comfortable,
    /// Accepted, but the viewer should confirm they are comfortable with it
    BelowDangerThreshold,
}

/// Owns one grid and drives it through generations
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: Grid,
    delay: Duration,
    generation: u64,
}

impl SimulationEngine {
    /// Create an engine over an empty grid of the given size
    pub fn new(size: usize) -> Result<Self, LifeError> {
        Ok(Self::with_grid(Grid::new(size)?))
    }

    /// Create an engine that takes ownership of an existing grid
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECONDS),
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for manual cell edits
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Generations advanced since the grid was created or loaded
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Discard the current grid and start over with an empty one
    pub fn new_grid(&mut self, size: usize) -> Result<&Grid, LifeError> {
        self.grid = Grid::new(size)?;
        self.generation = 0;
        info!(size, "Created new grid");
        Ok(&self.grid)
    }

    /// Classify a turn count without advancing anything
    pub fn check_turns(turns: i64) -> Result<TurnRequest, LifeError> {
        match usize::try_from(turns) {
            Err(_) => Err(LifeError::InvalidTurnCount {
                turns,
                max: MAX_TURNS,
            }),
            Ok(0) => Ok(TurnRequest::NoChange),
            Ok(n) if n <= MAX_TURNS => Ok(TurnRequest::Within(n)),
            Ok(_) => Ok(TurnRequest::OverCap {
                requested: turns as u64,
            }),
        }
    }

    /// Advance `turns` generations, rejecting counts above [`MAX_TURNS`]
    pub fn advance(
        &mut self,
        turns: i64,
        observer: &mut dyn GenerationObserver,
    ) -> Result<AdvanceOutcome, LifeError> {
        let turns = match Self::check_turns(turns)? {
            TurnRequest::NoChange => 0,
            TurnRequest::Within(n) => n,
            TurnRequest::OverCap { .. } => {
                return Err(LifeError::InvalidTurnCount {
                    turns,
                    max: MAX_TURNS,
                })
            }
        };
        Ok(self.run_generations(turns, observer))
    }

    /// Advance `turns` generations, clamping counts above [`MAX_TURNS`]
    pub fn advance_capped(
        &mut self,
        turns: i64,
        observer: &mut dyn GenerationObserver,
    ) -> Result<AdvanceOutcome, LifeError> {
        let turns = match Self::check_turns(turns)? {
            TurnRequest::NoChange => 0,
            TurnRequest::Within(n) => n,
            TurnRequest::OverCap { .. } => MAX_TURNS,
        };
        Ok(self.run_generations(turns, observer))
    }

    fn run_generations(
        &mut self,
        turns: usize,
        observer: &mut dyn GenerationObserver,
    ) -> AdvanceOutcome {
        if turns == 0 {
            debug!("No turns advanced");
            return AdvanceOutcome::NoChange;
        }

        for turn in 1..=turns {
            let delta = GameOfLifeRules::compute_delta(&self.grid);
            delta.apply_unchecked(&mut self.grid);
            self.generation += 1;

            let report = GenerationReport {
                generation: self.generation,
                turn,
                of: turns,
                flipped: delta.len(),
            };
            debug!(
                generation = report.generation,
                flipped = report.flipped,
                living = self.grid.living_count(),
                "Generation applied"
            );

            if observer.on_generation(&report, &self.grid).is_break() {
                info!(completed = turn, requested = turns, "Advance cancelled");
                return AdvanceOutcome::Cancelled { completed: turn };
            }

            if turn < turns && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }

        AdvanceOutcome::Completed { generations: turns }
    }

    /// Validate a delay and report whether the viewer should confirm it
    pub fn check_delay(seconds: f64) -> Result<DelayCheck, LifeError> {
        if !(0.0..=MAX_DELAY_SECONDS).contains(&seconds) {
            return Err(LifeError::InvalidDelay {
                seconds,
                max: MAX_DELAY_SECONDS,
            });
        }
        if seconds < DANGER_REFRESH_SECONDS {
            Ok(DelayCheck::BelowDangerThreshold)
        } else {
            Ok(DelayCheck::Comfortable)
        }
    }

    /// Set the pause between generations
    pub fn set_delay(&mut self, seconds: f64) -> Result<DelayCheck, LifeError> {
        let check = Self::check_delay(seconds)?;
        self.delay = Duration::from_secs_f64(seconds);
        debug!(seconds, "Delay updated");
        Ok(check)
    }

    pub fn reset_delay(&mut self) {
        self.delay = Duration::from_secs_f64(DEFAULT_DELAY_SECONDS);
    }

    /// Replace the grid with one parsed from `.gol` text
    ///
    /// The text is parsed into a fresh grid first; on any error the current
    /// grid and generation counter are left untouched.
    pub fn load(&mut self, text: &str) -> Result<&Grid, LifeError> {
        let grid = io::parse_save_file(text)?;
        info!(size = grid.size(), living = grid.living_count(), "Loaded grid");
        self.grid = grid;
        self.generation = 0;
        Ok(&self.grid)
    }

    /// Serialize the current grid to `.gol` text
    pub fn save(&self) -> String {
        io::format_save_file(&self.grid)
    }
}
