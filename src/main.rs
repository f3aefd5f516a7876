//! University Guess
//!
//! Terminal front end: loads the catalog, shuffles it, and plays one round
//! against stdin/stdout.

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use uniguess::{
    config::LeaderboardTarget,
    core::rng::{entropy_seed, DeterministicRng},
    game::round::Round,
    leaderboard::{JsonLinesLeaderboard, LeaderboardStore, MemoryLeaderboard},
    play::{Console, GameSession},
    Catalog, GameConfig, VERSION,
};

/// Interval between countdown ticks.
const TICK_PERIOD: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, quiet by default so the board stays readable)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("University Guess v{}", VERSION);

    let mut config = GameConfig::from_env().context("invalid configuration")?;
    if let Some(path) = std::env::args().nth(1) {
        config.catalog_path = path.into();
    }

    // No catalog, no game
    let mut catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("failed to load catalog {}", config.catalog_path.display()))?;

    let round_id = Uuid::new_v4();
    let seed = config.seed.unwrap_or_else(|| entropy_seed(round_id.as_bytes()));
    info!("Round {} seed 0x{}", round_id, hex::encode(seed.to_be_bytes()));

    let mut rng = DeterministicRng::new(seed);
    catalog.shuffle(&mut rng);
    let catalog = Arc::new(catalog);

    let store: Arc<dyn LeaderboardStore> = match &config.leaderboard {
        LeaderboardTarget::File(path) => Arc::new(JsonLinesLeaderboard::new(path.clone())),
        LeaderboardTarget::Memory => Arc::new(MemoryLeaderboard::new()),
    };

    let round = Round::new(catalog.clone(), config.round_config());
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let session = GameSession::with_id(round_id, round, events_tx);

    let mut console = Console::new(session, events_rx, store, config.leaderboard_size, stdout()).await;
    console.greet(catalog.len(), config.round_seconds)?;

    let timer = console.session().spawn_timer(TICK_PERIOD);
    let mut lines = BufReader::new(stdin()).lines();

    let summary = console.play(&mut lines).await?;
    console.session().stop();
    timer.await.context("timer task failed")?;

    if let Some(summary) = summary {
        info!("Round {} finished: {:?} in {} guesses", round_id, summary.phase, summary.guesses_used);
        console.finish(&summary, &mut lines).await?;
    }

    Ok(())
}
