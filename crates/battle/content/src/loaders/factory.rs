//! Content factory for building a battle session's content from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use battle_core::{BattleConfig, Catalog, EncounterPlan};

use crate::loaders::{CardLoader, ConfigLoader, EncounterLoader, EnemyLoader, LoadResult};

const EMBEDDED_CARDS: &str = include_str!("../../data/cards.ron");
const EMBEDDED_ENEMIES: &str = include_str!("../../data/enemies.ron");
const EMBEDDED_ENCOUNTERS: &str = include_str!("../../data/encounters.ron");
const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Everything needed to start a run.
#[derive(Debug, Clone)]
pub struct ContentSet {
    pub catalog: Arc<Catalog>,
    pub config: BattleConfig,
    pub encounters: EncounterPlan,
}

impl ContentSet {
    /// Checks that every encounter names a known opponent and that the
    /// configured starting deck only names known cards.
    pub fn validate(&self) -> LoadResult<()> {
        for (index, roster) in self.encounters.encounters.iter().enumerate() {
            for name in roster {
                self.catalog
                    .enemy(name)
                    .map_err(|e| anyhow::anyhow!("Encounter {}: {}", index, e))?;
            }
        }
        for entry in &self.config.starter_deck {
            self.catalog
                .card(&entry.card)
                .map_err(|e| anyhow::anyhow!("Starter deck: {}", e))?;
        }
        if self.config.starter_deck.is_empty() && self.catalog.starter_cards().next().is_none() {
            anyhow::bail!("Catalog has no starter cards and config names no starter deck");
        }
        Ok(())
    }
}

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── enemies.ron
/// └── encounters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load cards from `cards.ron` and opponents from `enemies.ron` into a catalog.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let cards = CardLoader::load(&self.data_dir.join("cards.ron"))?;
        let enemies = EnemyLoader::load(&self.data_dir.join("enemies.ron"))?;
        Catalog::new(cards, enemies).map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))
    }

    /// Load the run's encounter plan from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<EncounterPlan> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Load and cross-check every content file.
    pub fn load_all(&self) -> LoadResult<ContentSet> {
        let content = ContentSet {
            catalog: Arc::new(self.load_catalog()?),
            config: self.load_config()?,
            encounters: self.load_encounters()?,
        };
        content.validate()?;
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            cards = content.catalog.card_count(),
            enemies = content.catalog.enemy_count(),
            encounters = content.encounters.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// The default content set compiled into the crate.
    pub fn embedded() -> LoadResult<ContentSet> {
        let catalog = Catalog::new(
            CardLoader::parse(EMBEDDED_CARDS)?,
            EnemyLoader::parse(EMBEDDED_ENEMIES)?,
        )
        .map_err(|e| anyhow::anyhow!("Invalid embedded catalog: {}", e))?;

        let content = ContentSet {
            catalog: Arc::new(catalog),
            config: ConfigLoader::parse(EMBEDDED_CONFIG)?,
            encounters: EncounterLoader::parse(EMBEDDED_ENCOUNTERS)?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
