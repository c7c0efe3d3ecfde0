use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{Board, GameController, GameState, Level, PieceGenerator, PieceSeed};
use blockfall_runtime::Runtime;

use crate::{command::play::app::PlayApp, store::JsonFileStore};

mod app;

#[derive(Default, Debug, Clone)]
pub(crate) struct PlayArg {
    pub(crate) level: Option<Level>,
    pub(crate) store: Option<PathBuf>,
    pub(crate) seed: Option<PieceSeed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { level, store, seed } = arg;

    let store_path = store.clone().unwrap_or_else(JsonFileStore::default_path);
    let store = JsonFileStore::open(store_path)?;
    eprintln!("High score store: {}", store.path().display());

    let generator = seed.map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
    let state = GameState::with_parts(Board::new(), generator);
    let mut app = PlayApp::new(GameController::new(state, store), *level);

    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    eprintln!("High score: {}", app.high_score());
    Ok(())
}
