//! Command line front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_of_life_gol::{
    config::{CliOverrides, Settings},
    game_of_life::{
        create_example_grids, load_grid_from_file, save_grid_to_file, AdvanceOutcome,
        GenerationReport, Grid, SimulationEngine,
    },
    utils::{ColorOutput, GridFormatter, GridSnapshot},
    Menu,
};
use std::ops::ControlFlow;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gol")]
#[command(about = "Conway's Game of Life on a bounded grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively through the text menu
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Suggested grid size (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        delay: Option<f64>,

        /// Directory for save files (overrides config)
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// Advance a save file without interaction
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Save file to start from
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        generations: i64,

        /// Advance the maximum batch instead of failing when over it
        #[arg(long)]
        clamp: bool,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        delay: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the final grid to this save file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a save file with coordinates and statistics
    Show {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Save file to render
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Create a default configuration and example save files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Final grid only
    Text,
    /// Final grid as JSON
    Json,
    /// Every generation as it is computed
    Visual,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config, size, delay, save_dir } => {
            play_command(config, size, delay, save_dir)
        }
        Commands::Run { config, input, generations, clamp, delay, format, output } => {
            run_command(config, input, generations, clamp, delay, format, output)
        }
        Commands::Show { config, input } => show_command(config, input),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load settings from `config_path`, falling back to defaults when it does not exist
fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn play_command(
    config_path: PathBuf,
    size: Option<usize>,
    delay: Option<f64>,
    save_dir: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(
        &config_path,
        &CliOverrides {
            size,
            delay_seconds: delay,
            save_directory: save_dir,
        },
    )?;

    let stdin = std::io::stdin();
    let mut menu = Menu::new(stdin.lock(), std::io::stdout(), settings)?;
    menu.run()
}

fn run_command(
    config_path: PathBuf,
    input: PathBuf,
    generations: i64,
    clamp: bool,
    delay: Option<f64>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(
        &config_path,
        &CliOverrides {
            delay_seconds: delay,
            ..Default::default()
        },
    )?;

    let grid = load_grid_from_file(&input)?;
    let mut engine = SimulationEngine::with_grid(grid);

    // Only the visual format is watched live, so only it is paced
    if format == OutputFormat::Visual {
        engine.set_delay(settings.simulation.delay_seconds)?;
    } else {
        engine.set_delay(0.0)?;
    }

    let display = settings.display.clone();
    let mut observer = |report: &GenerationReport, grid: &Grid| {
        if format == OutputFormat::Visual {
            println!("{}", ColorOutput::info(&GridFormatter::format_report(report, grid)));
            println!("{}", GridFormatter::format_with_axes(grid, &display));
        }
        ControlFlow::Continue(())
    };

    let outcome = if clamp {
        engine.advance_capped(generations, &mut observer)
    } else {
        engine.advance(generations, &mut observer)
    }
    .with_context(|| format!("Failed to advance {}", input.display()))?;

    match format {
        OutputFormat::Text => {
            println!("{}", GridFormatter::format_with_axes(engine.grid(), &settings.display));
        }
        OutputFormat::Json => {
            let snapshot = GridSnapshot::new(engine.grid(), engine.generation());
            println!("{}", snapshot.to_json().context("Failed to serialize grid")?);
        }
        OutputFormat::Visual => {}
    }

    if format != OutputFormat::Json {
        let summary = match outcome {
            AdvanceOutcome::NoChange => "No turns advanced.".to_string(),
            AdvanceOutcome::Completed { generations } => {
                format!("Advanced {} generation(s)", generations)
            }
            AdvanceOutcome::Cancelled { completed } => {
                format!("Stopped after {} generation(s)", completed)
            }
        };
        println!("{}", ColorOutput::success(&summary));
    }

    if let Some(output_path) = output {
        save_grid_to_file(engine.grid(), &output_path)?;
        eprintln!("Saved to {}", output_path.display());
    }

    Ok(())
}

fn show_command(config_path: PathBuf, input: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path, &CliOverrides::default())?;
    let grid = load_grid_from_file(&input)?;

    println!("{}", GridFormatter::format_with_axes(&grid, &settings.display));
    println!("{}", GridFormatter::format_statistics(&grid));

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&patterns_dir).context("Failed to create example grids")?;
    println!("Created example save files in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: gol play --save-dir {}", patterns_dir.display());

    Ok(())
}
