use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use snake_arcade::game::{Difficulty, GameConfig};
use snake_arcade::modes::HumanMode;
use snake_arcade::persistence::JsonFileStore;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Snake arcade game for the terminal")]
struct Cli {
    /// Difficulty for the session
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Grid width
    #[arg(long, default_value = "30")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // The terminal belongs to the game, so logs only show up on request
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = GameConfig::new(cli.width, cli.height).with_difficulty(cli.difficulty);
    config.validate()?;

    let store = JsonFileStore::new(cli.high_score_file);
    let mut human_mode = HumanMode::new(config, store);
    human_mode.run().await?;

    Ok(())
}
