use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging;
use grid_snake::modes::PlayMode;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Wrap-around Snake in the terminal")]
struct Cli {
    /// Side length of the square grid, 2 to 128 [default: 20]
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for food placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with game settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)?,
        None => GameConfig::default(),
    };

    // A new grid size rescales start positions; timing and heading are kept
    if let Some(grid_size) = cli.grid_size {
        config = GameConfig {
            initial_direction: config.initial_direction,
            tick_interval_ms: config.tick_interval_ms,
            ..GameConfig::new(grid_size)
        };
    }

    info!(?config, seed = ?cli.seed, "configuration loaded");

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .context("Invalid game configuration")?;

    let mut play_mode = PlayMode::new(engine);
    play_mode.run().await?;

    Ok(())
}
