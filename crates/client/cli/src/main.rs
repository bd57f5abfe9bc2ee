//! Headless battle simulator entry point.
//!
//! Loads a content set, plays a whole run with a simple greedy policy, and
//! logs every battle event through `tracing`. Set `RUST_LOG=debug` to see
//! individual events.
mod autoplay;
mod config;

use anyhow::Result;
use battle_content::ContentFactory;
use battle_core::{BattleEngine, TracingObserver};

use crate::autoplay::{AutoPlayer, RunOutcome};
use crate::config::SimConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();

    let mut content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir).load_all()?,
        None => ContentFactory::embedded()?,
    };
    if let Some(seed) = config.seed {
        content.config.seed = Some(seed);
    }
    tracing::info!(
        cards = content.catalog.card_count(),
        enemies = content.catalog.enemy_count(),
        encounters = content.encounters.len(),
        seed = ?content.config.seed,
        "content ready"
    );

    let mut engine = BattleEngine::new(content.catalog, content.config);
    engine.add_observer(TracingObserver);

    let report = AutoPlayer::new(config.max_turns).play_run(&mut engine, content.encounters)?;
    match report.outcome {
        RunOutcome::Completed => tracing::info!(
            battles = report.battles_won,
            turns = report.turns,
            health = report.final_health,
            deck = report.deck_size,
            "run completed"
        ),
        RunOutcome::Defeated { encounter } => tracing::info!(
            encounter,
            battles = report.battles_won,
            turns = report.turns,
            "player defeated"
        ),
        RunOutcome::TurnLimit => tracing::warn!(
            battles = report.battles_won,
            turns = report.turns,
            "turn limit reached"
        ),
    }

    Ok(())
}
