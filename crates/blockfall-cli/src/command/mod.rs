use std::path::PathBuf;

use blockfall_engine::{Level, PieceSeed};
use clap::{Parser, ValueEnum};

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Falling-block puzzle game for the terminal", long_about = None)]
pub struct CommandArgs {
    /// Start at this level instead of showing the level menu
    #[arg(long, value_enum)]
    level: Option<LevelArg>,
    /// File holding the high score
    /// [default: $BLOCKFALL_STORE, else $XDG_CONFIG_HOME/blockfall/store.json]
    #[arg(long)]
    store: Option<PathBuf>,
    /// Seed for the piece sequence, as 32 hex digits
    #[arg(long)]
    seed: Option<PieceSeed>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Easy,
    Medium,
    Hard,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Easy => Level::Easy,
            LevelArg::Medium => Level::Medium,
            LevelArg::Hard => Level::Hard,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&play::PlayArg {
        level: args.level.map(Level::from),
        store: args.store,
        seed: args.seed,
    })
}
