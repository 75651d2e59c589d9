//! Interactive text menu around a [`SimulationEngine`]
//!
//! Every prompt is an explicit loop: invalid input prints a message and asks
//! again. Reaching the end of input behaves like choosing to quit.

use crate::config::Settings;
use crate::game_of_life::{
    clamp_size, next_save_path, resolve_save_path, save_grid_to_file, DelayCheck,
    GenerationReport, Grid, SimulationEngine, TurnRequest, DANGER_REFRESH_SECONDS,
    DEFAULT_DELAY_SECONDS, MAX_DELAY_SECONDS, MAX_SIZE, MAX_TURNS, MIN_SIZE,
};
use crate::utils::{ColorOutput, GridFormatter};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use tracing::{info, warn};

const MAIN_MENU: &str = "To advance turns, enter 'a'. To manually change cells, enter 'c'.\n\
To load a save file, enter 'l'. To save current state, enter 's'.\n\
To view the instructions, enter 'i'. To restart the game, enter 'r'. To quit, enter 'q'.";

const INSTRUCTIONS: &str = "This is a simulator based on a set of rules designed by John Conway.\n\
The rules are as follows:\n\
Any live cell with fewer than two live neighbours dies, as if by underpopulation.\n\
Any live cell with two or three live neighbours lives on to the next generation.\n\
Any live cell with more than three live neighbours dies, as if by overpopulation.\n\
Any dead cell with exactly three live neighbours becomes a live cell, as if by reproduction.\n\
\n\
Cells beyond the edge of the grid are always dead.\n\
\n\
.gol files can be loaded and saved. This is an example of a .gol file:\n\
10\n\
0110000000\n\
0000000000\n\
...\n\
The first line is the grid size and each following line is a row of cells,\n\
'0' for dead and '1' for alive.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Start,
    Main,
    Quit,
}

/// Result of a sub-prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Done,
    Back,
    Quit,
}

/// A 0-based coordinate read from a 1-based prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coordinate {
    Index(usize),
    Stop,
    EndOfInput,
}

/// Text menu driving one simulation engine
pub struct Menu<R, W> {
    input: R,
    output: W,
    engine: SimulationEngine,
    settings: Settings,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu with an engine configured from `settings`
    pub fn new(input: R, output: W, settings: Settings) -> Result<Self> {
        let mut engine = SimulationEngine::new(settings.simulation.default_size)?;
        engine.set_delay(settings.simulation.delay_seconds)?;

        Ok(Self {
            input,
            output,
            engine,
            settings,
        })
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Give back the engine and the output sink
    pub fn into_inner(self) -> (SimulationEngine, W) {
        (self.engine, self.output)
    }

    /// Run until the user quits or input runs out
    pub fn run(&mut self) -> Result<()> {
        let mut screen = Screen::Start;

        while screen != Screen::Quit {
            screen = match screen {
                Screen::Start => self.start()?,
                Screen::Main => self.main_menu()?,
                Screen::Quit => Screen::Quit,
            };
        }

        writeln!(self.output, "Quitting...")?;
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn start(&mut self) -> Result<Screen> {
        let intro = format!(
            "Welcome to Conway's game of life. To see instructions, enter 'i'.\n\
             To start the game, enter how large you want the grid to be ({} to {}, {} is recommended)\n\
             or enter 'l' to load a save file.",
            MIN_SIZE, MAX_SIZE, self.settings.simulation.default_size
        );

        loop {
            let Some(input) = self.prompt(&intro)? else {
                return Ok(Screen::Quit);
            };

            if input.eq_ignore_ascii_case("i") {
                self.say(INSTRUCTIONS)?;
                continue;
            }
            if input.eq_ignore_ascii_case("l") {
                match self.load_flow()? {
                    Step::Done => return Ok(Screen::Main),
                    Step::Back => continue,
                    Step::Quit => return Ok(Screen::Quit),
                }
            }

            match input.parse::<i64>() {
                Ok(requested) => {
                    let size = clamp_size(requested);
                    if requested > MAX_SIZE as i64 {
                        self.say(&ColorOutput::warning(
                            "That's larger than the maximum. Setting grid size to the maximum...",
                        ))?;
                    } else if requested < MIN_SIZE as i64 {
                        self.say(&ColorOutput::warning(
                            "That's smaller than the minimum. Setting grid size to the minimum...",
                        ))?;
                    }
                    self.engine.new_grid(size)?;
                    return Ok(Screen::Main);
                }
                Err(_) => self.say("That is not a valid input.")?,
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let text = GridFormatter::format_with_axes(self.engine.grid(), &self.settings.display);
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<Screen> {
        self.render()?;

        loop {
            let Some(input) = self.prompt(MAIN_MENU)? else {
                return Ok(Screen::Quit);
            };

            let step = match input.to_lowercase().as_str() {
                "a" => self.advance_flow()?,
                "c" => self.change_cells_flow()?,
                "l" => self.load_flow()?,
                "s" => {
                    self.save()?;
                    Step::Done
                }
                "i" => {
                    self.say(INSTRUCTIONS)?;
                    match self.prompt("When you wish to continue, enter anything.")? {
                        Some(_) => Step::Done,
                        None => Step::Quit,
                    }
                }
                "r" => return Ok(Screen::Start),
                "q" => return Ok(Screen::Quit),
                _ => {
                    self.say("Invalid input")?;
                    continue;
                }
            };

            return Ok(match step {
                Step::Quit => Screen::Quit,
                Step::Done | Step::Back => Screen::Main,
            });
        }
    }

    fn advance_flow(&mut self) -> Result<Step> {
        let text = format!(
            "Either enter the amount of turns you would like to advance (at most {}), \
             or 't' to change the amount of time between turns.",
            MAX_TURNS
        );

        loop {
            let Some(input) = self.prompt(&text)? else {
                return Ok(Step::Quit);
            };

            if input.eq_ignore_ascii_case("t") {
                if self.delay_flow()? == Step::Quit {
                    return Ok(Step::Quit);
                }
                continue;
            }

            let Ok(requested) = input.parse::<i64>() else {
                self.say("Invalid input")?;
                continue;
            };

            let turns = match SimulationEngine::check_turns(requested) {
                Err(e) => {
                    warn!(requested, "Rejected turn count");
                    self.say(&ColorOutput::error(&format!("Invalid input: {}", e)))?;
                    continue;
                }
                Ok(TurnRequest::NoChange) => {
                    self.say("No turns advanced.")?;
                    return Ok(Step::Done);
                }
                Ok(TurnRequest::Within(n)) => n,
                Ok(TurnRequest::OverCap { .. }) => {
                    let question = format!(
                        "This is more than {0} turns. Enter 'a' to advance {0} turns. \
                         Enter anything else to re-enter the amount of turns.",
                        MAX_TURNS
                    );
                    match self.prompt(&question)? {
                        None => return Ok(Step::Quit),
                        Some(answer) if answer.eq_ignore_ascii_case("a") => MAX_TURNS,
                        Some(_) => continue,
                    }
                }
            };

            self.run_turns(turns)?;
            return Ok(Step::Done);
        }
    }

    fn run_turns(&mut self, turns: usize) -> Result<()> {
        let Menu {
            engine,
            output,
            settings,
            ..
        } = self;
        let display = &settings.display;
        let mut write_error = None;

        // The final generation is drawn by the main menu
        let mut observer = |report: &GenerationReport, grid: &Grid| {
            let mut text = GridFormatter::format_report(report, grid);
            text.push('\n');
            if !report.is_final() {
                text.push_str(&GridFormatter::format_with_axes(grid, display));
            }
            match output.write_all(text.as_bytes()).and_then(|_| output.flush()) {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    write_error = Some(e);
                    ControlFlow::Break(())
                }
            }
        };

        let outcome = engine.advance(turns as i64, &mut observer)?;
        info!(?outcome, "Turns advanced");

        match write_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn delay_flow(&mut self) -> Result<Step> {
        let text = format!(
            "Enter 'd' for the default time ({}s) or enter the amount of seconds you would like \
             between turns. This must be at most {}s.\n\
             WARNING: Anything less than {}s could affect photosensitive users.",
            DEFAULT_DELAY_SECONDS, MAX_DELAY_SECONDS, DANGER_REFRESH_SECONDS
        );

        loop {
            let Some(input) = self.prompt(&text)? else {
                return Ok(Step::Quit);
            };

            if input.eq_ignore_ascii_case("d") {
                self.engine.reset_delay();
                self.say(&format!("The time between turns is now {}s.", DEFAULT_DELAY_SECONDS))?;
                return Ok(Step::Done);
            }

            let Ok(seconds) = input.parse::<f64>() else {
                self.say("Invalid input")?;
                continue;
            };

            let seconds = match SimulationEngine::check_delay(seconds) {
                Ok(DelayCheck::Comfortable) => seconds,
                Ok(DelayCheck::BelowDangerThreshold) => {
                    let question = format!(
                        "Are you sure you would like to continue? {}s is less than {}s. (y/n)",
                        seconds, DANGER_REFRESH_SECONDS
                    );
                    match self.prompt(&question)?.map(|a| a.to_lowercase()).as_deref() {
                        None => return Ok(Step::Quit),
                        Some("y") => seconds,
                        Some("n") => continue,
                        Some(_) => {
                            self.say("Invalid input")?;
                            continue;
                        }
                    }
                }
                Err(_) if seconds > MAX_DELAY_SECONDS => {
                    let question = format!(
                        "This is more than {0}s. To make the time between turns {0}s, enter 't'. \
                         To re-enter the time, enter anything else.",
                        MAX_DELAY_SECONDS
                    );
                    match self.prompt(&question)? {
                        None => return Ok(Step::Quit),
                        Some(answer) if answer.eq_ignore_ascii_case("t") => MAX_DELAY_SECONDS,
                        Some(_) => continue,
                    }
                }
                Err(e) => {
                    self.say(&ColorOutput::error(&format!("Invalid input: {}", e)))?;
                    continue;
                }
            };

            self.engine.set_delay(seconds)?;
            self.say(&format!("The time between turns is now {}s.", seconds))?;
            return Ok(Step::Done);
        }
    }

    fn read_coordinate(&mut self, text: &str) -> Result<Coordinate> {
        let size = self.engine.grid().size();

        loop {
            let Some(input) = self.prompt(text)? else {
                return Ok(Coordinate::EndOfInput);
            };
            if input.eq_ignore_ascii_case("s") {
                return Ok(Coordinate::Stop);
            }

            match input.parse::<usize>() {
                Ok(n) if (1..=size).contains(&n) => return Ok(Coordinate::Index(n - 1)),
                Ok(_) => self.say("That coordinate isn't on the grid")?,
                Err(_) => self.say("Invalid input")?,
            }
        }
    }

    fn change_cells_flow(&mut self) -> Result<Step> {
        let mut first = true;

        loop {
            let x_prompt = if first {
                "Please enter the x-coordinate of the cell you would like to change."
            } else {
                "Enter 's' to stop changing cells or enter the x-coordinate of the cell you would like to change."
            };

            let col = match self.read_coordinate(x_prompt)? {
                Coordinate::Index(col) => col,
                Coordinate::Stop => return Ok(Step::Done),
                Coordinate::EndOfInput => return Ok(Step::Quit),
            };
            let row = match self
                .read_coordinate("Please enter the y-coordinate of the cell you would like to change.")?
            {
                Coordinate::Index(row) => row,
                Coordinate::Stop => return Ok(Step::Done),
                Coordinate::EndOfInput => return Ok(Step::Quit),
            };

            self.engine.grid_mut().toggle(row, col)?;
            first = false;
            self.render()?;
        }
    }

    fn load_flow(&mut self) -> Result<Step> {
        loop {
            let Some(name) = self.prompt(
                "Enter 'b' to go back or the name of the file you would like to open.",
            )?
            else {
                return Ok(Step::Quit);
            };

            if name.eq_ignore_ascii_case("b") {
                return Ok(Step::Back);
            }
            if name.is_empty() {
                self.say("Invalid input")?;
                continue;
            }

            let path = resolve_save_path(&self.settings.storage.save_directory, &name);
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not read save file");
                    self.say(&ColorOutput::error("That file could not be found."))?;
                    continue;
                }
            };

            match self.engine.load(&text) {
                Ok(grid) => {
                    let size = grid.size();
                    self.say(&ColorOutput::success(&format!(
                        "Loaded {} ({}x{}).",
                        path.display(),
                        size,
                        size
                    )))?;
                    return Ok(Step::Done);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Rejected save file");
                    self.say(&ColorOutput::error(&format!(
                        "This file is not compatible with this program: {}",
                        e
                    )))?;
                }
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        let storage = &self.settings.storage;
        let path = next_save_path(&storage.save_directory, &storage.file_prefix);

        match save_grid_to_file(self.engine.grid(), &path) {
            Ok(()) => self.say(&ColorOutput::success(&format!("State saved to {}!", path.display()))),
            Err(e) => {
                warn!(error = %e, "Save failed");
                self.say(&ColorOutput::error(&format!("Something went wrong while saving: {:#}", e)))
            }
        }
    }
}
