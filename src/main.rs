use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serpents::game::GameConfig;
use serpents::modes::{HeadlessMode, HumanMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "serpents")]
#[command(version, about = "Two serpents, one arena")]
struct Cli {
    /// Front-end to run the match with
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Cells per side of the arena
    #[arg(long, default_value_t = 25)]
    grid_size: usize,

    /// Pixel size of one cell
    #[arg(long, default_value_t = 25)]
    cell_size: u32,

    /// Border around the board in pixels
    #[arg(long, default_value_t = 75)]
    margin: u32,

    /// Lives per serpent
    #[arg(long, default_value_t = 5)]
    lives: u32,

    /// Milliseconds between two moves
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// Milliseconds between two food spawns
    #[arg(long, default_value_t = 3000)]
    spawn_ms: u64,

    /// Milliseconds a finished round stays on screen
    #[arg(long, default_value_t = 3000)]
    round_hold_ms: u64,

    /// Milliseconds the final result stays on screen
    #[arg(long, default_value_t = 5000)]
    final_hold_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (terminal mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Two players on one keyboard
    Human,
    /// Run a match without a terminal, logging to stderr
    Headless,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            board_margin: self.margin,
            starting_lives: self.lives,
            tick_period_ms: self.tick_ms,
            food_spawn_period_ms: self.spawn_ms,
            round_hold_ms: self.round_hold_ms,
            final_hold_ms: self.final_hold_ms,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        (None, Mode::Headless) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
        // Logging to the terminal would tear the rendered board
        (None, Mode::Human) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config();
    config.validate().context("Invalid configuration")?;
    let board_px = config.board_extent_px().context("Invalid configuration")?;
    info!(
        grid_size = config.grid_size,
        lives = config.starting_lives,
        tick_ms = config.tick_period_ms,
        spawn_ms = config.food_spawn_period_ms,
        board_px,
        "configuration loaded"
    );

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(config);
            headless_mode.run().await?;
        }
    }

    Ok(())
}
