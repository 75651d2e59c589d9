//! `.gol` save-file format and file I/O for grids
//!
//! Format: the first line is the grid size; it is followed by `size` rows of
//! `size` characters each, '1' for alive cells and '0' for dead cells.

use super::{Grid, MAX_SIZE, MIN_SIZE};
use crate::error::LifeError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension used for save files
pub const SAVE_EXTENSION: &str = "gol";

/// Parse a grid from `.gol` text
pub fn parse_save_file(content: &str) -> Result<Grid, LifeError> {
    let mut lines = content.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = lines.next().unwrap_or_default().trim();
    let size: i64 = header
        .parse()
        .map_err(|_| LifeError::malformed(1, format!("grid size '{}' is not an integer", header)))?;

    if size < MIN_SIZE as i64 || size > MAX_SIZE as i64 {
        return Err(LifeError::malformed(
            1,
            format!("grid size {} is outside {}..={}", size, MIN_SIZE, MAX_SIZE),
        ));
    }
    let size = size as usize;

    let mut grid = Grid::new(size).map_err(|e| LifeError::malformed(1, e.to_string()))?;

    for row in 0..size {
        let line_no = row + 2;
        let line = lines.next().ok_or_else(|| {
            LifeError::malformed(line_no, format!("expected {} rows, found {}", size, row))
        })?;

        let mut found = 0;
        for (col, ch) in line.chars().take(size).enumerate() {
            let alive = match ch {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(LifeError::malformed(
                        line_no,
                        format!("invalid character '{}' in column {}", ch, col + 1),
                    ))
                }
            };
            grid.set(row, col, alive)?;
            found += 1;
        }

        if found < size {
            return Err(LifeError::malformed(
                line_no,
                format!("row has {} cells, expected {}", found, size),
            ));
        }
    }

    debug!(size, living = grid.living_count(), "Parsed save file");
    Ok(grid)
}

/// Convert a grid to `.gol` text
pub fn format_save_file(grid: &Grid) -> String {
    let size = grid.size();
    let mut result = String::with_capacity(4 + size * (size + 1));

    result.push_str(&size.to_string());
    result.push('\n');
    for row in grid.rows() {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Resolve a user-supplied save name, adding the `.gol` extension when missing
pub fn resolve_save_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    let path = dir.as_ref().join(name.trim());
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(SAVE_EXTENSION)
    }
}

/// Load a grid from a `.gol` file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read save file: {}", path.display()))?;

    let grid = parse_save_file(&content)
        .with_context(|| format!("Failed to parse save file: {}", path.display()))?;
    info!(path = %path.display(), size = grid.size(), "Loaded save file");
    Ok(grid)
}

/// Save a grid to a `.gol` file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(path, format_save_file(grid))
        .with_context(|| format!("Failed to write save file: {}", path.display()))?;
    info!(path = %path.display(), "Saved grid");

    Ok(())
}

/// First unused `<prefix><n>.gol` in `dir`, counting up from zero
pub fn next_save_path<P: AsRef<Path>>(dir: P, prefix: &str) -> PathBuf {
    let dir = dir.as_ref();
    (0u64..)
        .map(|n| dir.join(format!("{}{}.{}", prefix, n, SAVE_EXTENSION)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| dir.join(format!("{}.{}", prefix, SAVE_EXTENSION)))
}

/// Create example save files for testing
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns: [(&str, &[(usize, usize)]); 4] = [
        ("glider", &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]),
        ("blinker", &[(4, 3), (4, 4), (4, 5)]),
        ("block", &[(4, 4), (4, 5), (5, 4), (5, 5)]),
        ("beacon", &[(3, 3), (3, 4), (4, 3), (4, 4), (5, 5), (5, 6), (6, 5), (6, 6)]),
    ];

    for (name, cells) in patterns {
        let mut grid = Grid::new(MIN_SIZE)?;
        for &(row, col) in cells {
            grid.set(row, col, true)?;
        }
        save_grid_to_file(&grid, resolve_save_path(dir, name))
            .with_context(|| format!("Failed to write {}.{}", name, SAVE_EXTENSION))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rows(size: usize, fill: char) -> String {
        let mut text = format!("{}\n", size);
        for _ in 0..size {
            text.push_str(&fill.to_string().repeat(size));
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_parse_save_file() {
        let mut content = String::from("10\n0110000000\n");
        for _ in 0..8 {
            content.push_str("0000000000\n");
        }
        content.push_str("1000000001\n");
        let grid = parse_save_file(&content).unwrap();

        assert_eq!(grid.size(), 10);
        assert_eq!(grid.living_cells(), vec![(0, 1), (0, 2), (9, 0), (9, 9)]);
    }

    #[test]
    fn test_format_save_file() {
        let mut grid = Grid::new(10).unwrap();
        grid.set(0, 0, true).unwrap();
        grid.set(9, 9, true).unwrap();
        let text = format_save_file(&grid);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "10");
        assert_eq!(lines[1], "1000000000");
        assert_eq!(lines[10], "0000000001");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_round_trip() {
        let mut grid = Grid::new(23).unwrap();
        for i in 0..23 {
            grid.set(i, (i * 7) % 23, true).unwrap();
        }
        let parsed = parse_save_file(&format_save_file(&grid)).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_largest_grid() {
        let grid = parse_save_file(&rows(MAX_SIZE, '1')).unwrap();
        assert_eq!(grid.size(), MAX_SIZE);
        assert_eq!(grid.living_count(), 2500);

        let mut checker = Grid::new(MAX_SIZE).unwrap();
        for r in 0..MAX_SIZE {
            for c in (r % 2..MAX_SIZE).step_by(2) {
                checker.set(r, c, true).unwrap();
            }
        }
        assert_eq!(parse_save_file(&format_save_file(&checker)).unwrap(), checker);

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sf0.gol");
        save_grid_to_file(&checker, &path).unwrap();
        let loaded = load_grid_from_file(&path).unwrap();
        assert_eq!(loaded, checker);
        assert_eq!(loaded.living_count(), MAX_SIZE * MAX_SIZE / 2);
    }

    #[test]
    fn test_lenient_line_endings() {
        let crlf = rows(10, '1').replace('\n', "\r\n");
        assert_eq!(parse_save_file(&crlf).unwrap().living_count(), 100);

        let no_final_newline = rows(10, '0');
        let trimmed = no_final_newline.trim_end();
        assert!(parse_save_file(trimmed).unwrap().is_empty());

        let long_rows = rows(10, '0').replace("0000000000", "000000000011");
        assert!(parse_save_file(&long_rows).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input() {
        let bad_header = rows(10, '0').replacen("10", "ten", 1);
        assert!(matches!(
            parse_save_file(&bad_header),
            Err(LifeError::MalformedSaveFile { line: 1, .. })
        ));

        assert!(parse_save_file(&rows(9, '0')).is_err());
        assert!(parse_save_file(&rows(51, '0')).is_err());
        assert!(parse_save_file("-12\n").is_err());
        assert!(parse_save_file("").is_err());

        let mut missing_row = rows(10, '0');
        missing_row.truncate(missing_row.len() - 11);
        assert!(matches!(
            parse_save_file(&missing_row),
            Err(LifeError::MalformedSaveFile { line: 11, .. })
        ));

        let short_row = rows(10, '0').replacen("0000000000", "000000000", 1);
        assert!(matches!(
            parse_save_file(&short_row),
            Err(LifeError::MalformedSaveFile { line: 2, .. })
        ));

        let bad_char = rows(10, '0').replacen("0000000000", "0000X00000", 1);
        assert!(matches!(
            parse_save_file(&bad_char),
            Err(LifeError::MalformedSaveFile { line: 2, .. })
        ));
    }

    #[test]
    fn test_resolve_save_path() {
        let dir = Path::new("saves");
        assert_eq!(resolve_save_path(dir, "glider"), dir.join("glider.gol"));
        assert_eq!(resolve_save_path(dir, "glider.gol"), dir.join("glider.gol"));
        assert_eq!(resolve_save_path(dir, " sf3 "), dir.join("sf3.gol"));
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.gol");

        let mut original = Grid::new(15).unwrap();
        original.set(7, 8, true).unwrap();

        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);

        assert!(load_grid_from_file(temp_dir.path().join("missing.gol")).is_err());
    }

    #[test]
    fn test_next_save_path() {
        let temp_dir = tempdir().unwrap();
        let first = next_save_path(temp_dir.path(), "sf");
        assert_eq!(first, temp_dir.path().join("sf0.gol"));

        std::fs::write(&first, "").unwrap();
        std::fs::write(temp_dir.path().join("sf1.gol"), "").unwrap();
        assert_eq!(next_save_path(temp_dir.path(), "sf"), temp_dir.path().join("sf2.gol"));
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        for name in ["glider", "blinker", "block", "beacon"] {
            assert!(temp_dir.path().join(format!("{}.gol", name)).exists());
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.gol")).unwrap();
        assert_eq!(glider.size(), 10);
        assert_eq!(glider.living_count(), 5);
    }
}
