//! Display and output formatting utilities

use crate::config::DisplayConfig;
use crate::game_of_life::{GenerationReport, Grid};
use serde::{Deserialize, Serialize};

/// Format grids for display
pub struct GridFormatter;

impl GridFormatter {
    /// Render a grid with 1-based column numbers across the top and row numbers down the side
    pub fn format_with_axes(grid: &Grid, display: &DisplayConfig) -> String {
        let mut output = String::from("  ");

        for x in 1..=grid.size() {
            output.push_str(&format!("{:<3}", x));
        }
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:<3}", y + 1));
            for &cell in row {
                output.push(if cell { display.alive_symbol } else { display.dead_symbol });
                output.push_str("  ");
            }
            output.push('\n');
        }

        output
    }

    /// One-line progress summary for a generation
    pub fn format_report(report: &GenerationReport, grid: &Grid) -> String {
        format!(
            "Generation {} ({}/{}): {} living, {} changed",
            report.generation,
            report.turn,
            report.of,
            grid.living_count(),
            report.flipped
        )
    }

    /// Living-cell statistics for a grid
    pub fn format_statistics(grid: &Grid) -> String {
        let total = grid.size() * grid.size();
        format!(
            "Grid Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            grid.size(),
            grid.size(),
            grid.living_count(),
            (grid.living_count() as f64 / total as f64) * 100.0
        )
    }
}

/// Serializable view of a grid for JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: usize,
    pub generation: u64,
    pub living_cells: usize,
    /// Rows in save-file notation, '1' alive and '0' dead
    pub rows: Vec<String>,
}

impl GridSnapshot {
    pub fn new(grid: &Grid, generation: u64) -> Self {
        Self {
            size: grid.size(),
            generation,
            living_cells: grid.living_count(),
            rows: grid
                .rows()
                .map(|row| row.iter().map(|&cell| if cell { '1' } else { '0' }).collect())
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// ANSI foreground colors used for status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
}

/// Status-line coloring, disabled by `NO_COLOR` or a dumb terminal
pub struct ColorOutput;

impl ColorOutput {
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color as u8, text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(12).unwrap();
        grid.set(0, 0, true).unwrap();
        grid.set(11, 10, true).unwrap();
        grid
    }

    #[test]
    fn test_format_with_axes() {
        let display = Settings::default().display;
        let text = GridFormatter::format_with_axes(&sample_grid(), &display);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("  1  2  3"));
        assert!(lines[0].ends_with("10 11 12 "));
        assert!(lines[1].starts_with("1  ■  □  "));
        assert!(lines[12].starts_with("12 □  "));
        assert_eq!(lines[12].matches('■').count(), 1);
    }

    #[test]
    fn test_format_statistics() {
        let grid = sample_grid();
        let stats = GridFormatter::format_statistics(&grid);
        assert!(stats.contains("Living cells: 2"));
        assert!(stats.contains("Size: 12x12"));
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = GridSnapshot::new(&sample_grid(), 4);
        assert_eq!(snapshot.rows.len(), 12);
        assert_eq!(snapshot.rows[0], "100000000000");

        let json = snapshot.to_json().unwrap();
        let parsed: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.generation, 4);
    }

    #[test]
    fn test_color_output() {
        assert_eq!(Color::Red as u8, 31);
        assert_eq!(Color::Blue as u8, 34);

        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        if colored != "test" {
            assert!(colored.starts_with("\x1b[31m"));
            assert!(colored.ends_with("\x1b[0m"));
        }

        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
