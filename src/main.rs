mod config;
mod help;
mod logging;
mod sandbox;
mod settings;
mod sim;
mod simulate;
mod terminal;
mod theme;
mod view;

use clap::{Args, Parser, Subcommand};
use config::{valid_density, SandboxConfig, Seed, SimulateConfig, DEFAULT_DENSITY};
use settings::Settings;
use sim::Boundary;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifesandbox")]
#[command(version = "0.1.0")]
#[command(about = "Interactive Game of Life sandbox for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand; they override config.toml
#[derive(Args)]
struct SessionArgs {
    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Edge behaviour: clamped or toroidal
    #[arg(short, long)]
    boundary: Option<String>,

    /// Generations per second while running (1-60)
    #[arg(long)]
    speed: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Live-cell probability for random fill (0.0-1.0)
    #[arg(short, long)]
    density: Option<f64>,

    /// Save file used by save and load
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Color theme: classic, neon, matrix, ocean, fire
    #[arg(short = 'T', long)]
    theme: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive sandbox
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// Start with a library pattern selected
        #[arg(short, long)]
        pattern: Option<String>,

        /// Load the save file on startup
        #[arg(short, long)]
        load: bool,
    },

    /// Run generations headlessly and print the result
    Simulate {
        #[command(flatten)]
        session: SessionArgs,

        /// Number of generations to compute
        #[arg(short = 'n', long, default_value = "100")]
        generations: u64,

        /// Start from a library pattern, centered
        #[arg(short, long)]
        pattern: Option<String>,

        /// Start from a plaintext (.cells) pattern file, centered
        #[arg(long)]
        pattern_file: Option<PathBuf>,

        /// Start from a JSON save file
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Start from an empty grid instead of a random fill
        #[arg(long)]
        empty: bool,

        /// Only print the statistics, not the grid
        #[arg(short, long)]
        quiet: bool,

        /// Save the final state to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn build_config(args: SessionArgs) -> SandboxConfig {
    let mut config = SandboxConfig::default();
    Settings::load().apply(&mut config);

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(name) = args.boundary {
        config.boundary = Boundary::from_name(&name).unwrap_or_else(|| {
            eprintln!("Unknown boundary: {}. Using clamped.", name);
            eprintln!("Available: clamped, toroidal");
            Boundary::Clamped
        });
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    config.seed = args.seed.or(config.seed);
    if let Some(density) = args.density {
        config.density = valid_density(density).unwrap_or_else(|| {
            eprintln!("Invalid density: {}. Using {}.", density, DEFAULT_DENSITY);
            DEFAULT_DENSITY
        });
    }
    if let Some(file) = args.file {
        config.save_path = file;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    config
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    match cli.command {
        Commands::Play { session, pattern, load } => {
            let config = build_config(session);
            sandbox::run(config, pattern, load)?;
        }
        Commands::Simulate {
            session,
            generations,
            pattern,
            pattern_file,
            load,
            empty,
            quiet,
            output,
        } => {
            let seed = match (load, pattern_file, pattern) {
                (Some(path), _, _) => Seed::SaveFile(path),
                (None, Some(path), _) => Seed::PatternFile(path),
                (None, None, Some(name)) => Seed::Pattern(name),
                (None, None, None) if empty => Seed::Empty,
                (None, None, None) => Seed::Random,
            };
            let config = SimulateConfig {
                sandbox: build_config(session),
                seed,
                generations,
                print: !quiet,
                output,
            };
            if let Err(e) = simulate::run(config) {
                log::error!("simulate failed: {}", e);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
