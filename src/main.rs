//! Main CLI application for the Game of Life simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_automaton::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, load_grid_from_file, GameOfLifeAutomaton},
    simulation::Simulation,
    utils::{ColorOutput, FrameFormatter, GameOfLifeStyle},
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Parser)]
#[command(name = "game_of_life_automaton")]
#[command(about = "Conway's Game of Life in the terminal")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and render it to the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config)
        #[arg(long)]
        columns: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        step_interval: Option<u64>,

        /// Stop after this many generations
        #[arg(short, long)]
        generations: Option<u64>,

        /// Start paused
        #[arg(long)]
        paused: bool,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a pattern file as a grid
    Show {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Run {
            config, pattern, rows, columns, seed, step_interval, generations, paused
        } => {
            let overrides = CliOverrides {
                rows,
                columns,
                pattern_file: pattern,
                seed,
                step_interval_ms: step_interval,
            };
            run_command(&config, &overrides, generations, paused)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Show { config, pattern } => show_command(&config, &pattern),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: &Path,
    overrides: &CliOverrides,
    generations: Option<u64>,
    paused: bool,
) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);

    let simulation = Arc::new(Simulation::from_settings(&settings, !paused)?);
    let formatter = FrameFormatter::new(
        GameOfLifeStyle::new(&settings.display),
        settings.display.color && ColorOutput::supports_color(),
    );

    let quit = Arc::new(AtomicBool::new(false));
    spawn_input_reader(Arc::clone(&simulation), Arc::clone(&quit))?;

    let stepper = simulation.spawn_stepper(settings.timing.step_interval())?;
    log::info!(
        "Running {}x{} grid, one generation every {:?}",
        settings.grid.rows,
        settings.grid.columns,
        settings.timing.step_interval()
    );

    let mut stdout = std::io::stdout().lock();
    while !quit.load(Ordering::Acquire) {
        let frame = formatter.format_frame(simulation.automaton().as_ref());
        let state = if simulation.is_playing() { "playing" } else { "paused" };

        write!(stdout, "\x1b[2J\x1b[H{}", frame)?;
        writeln!(
            stdout,
            "generation {} ({}) - [p]lay/pause, [r]andomize, [q]uit + Enter",
            simulation.generation(),
            state
        )?;
        stdout.flush()?;

        if generations.is_some_and(|limit| simulation.generation() >= limit) {
            break;
        }
        thread::sleep(settings.timing.frame_interval());
    }

    drop(stdout);
    stepper.stop()?;
    println!("{}", ColorOutput::success(&format!(
        "Stopped after {} generations",
        simulation.generation()
    )));

    Ok(())
}

/// Read play/pause, randomize and quit commands from stdin. End of input only
/// stops reading, the simulation keeps running.
fn spawn_input_reader(simulation: Arc<Simulation>, quit: Arc<AtomicBool>) -> Result<()> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match line.trim() {
                    "p" | "" => {
                        simulation.toggle_play();
                    }
                    "r" => simulation.request_randomize(),
                    "q" => {
                        quit.store(true, Ordering::Release);
                        break;
                    }
                    other => log::warn!("Unknown command: {:?}", other),
                }
            }
        })
        .context("Failed to spawn input thread")?;
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let mut settings = Settings::default();
    settings.input.pattern_file = Some(PathBuf::from("patterns/glider.csv"));

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir, settings.input.encoding)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn show_command(config_path: &Path, pattern_path: &Path) -> Result<()> {
    let settings = load_settings(config_path)?;

    let grid = load_grid_from_file(
        pattern_path,
        settings.grid.rows,
        settings.grid.columns,
        settings.input.encoding,
    )
    .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    println!("Pattern ({}x{}):", grid.rows(), grid.columns());
    println!("  Living cells: {}", grid.living_count());

    let automaton = GameOfLifeAutomaton::from_grid(grid);
    let formatter = FrameFormatter::new(GameOfLifeStyle::new(&settings.display), false);
    print!("{}", formatter.format_frame_with_coords(&automaton));

    Ok(())
}
