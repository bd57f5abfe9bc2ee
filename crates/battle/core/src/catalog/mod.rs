//! Read-only catalog of card and opponent templates.
//!
//! The catalog is built once per session and shared behind an `Arc`. Nothing
//! in the engine mutates a template, so every pile and opponent holds plain
//! shared references to the definitions stored here.

pub mod card;
pub mod enemy;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use card::{CardCategory, CardDefinition};
pub use enemy::{ActionCategory, ActionDefinition, EnemyDefinition};

use crate::error::{ErrorSeverity, GameError};
use crate::rng::BattleRng;

/// Errors raised while building or querying the catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("unknown card '{name}'")]
    UnknownCard { name: String },

    #[error("unknown enemy '{name}'")]
    UnknownEnemy { name: String },

    #[error("card '{name}' is defined more than once")]
    DuplicateCard { name: String },

    #[error("enemy '{name}' is defined more than once")]
    DuplicateEnemy { name: String },

    #[error("enemy '{name}' has no actions")]
    EmptyActionSet { name: String },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        use CatalogError::*;
        match self {
            // Lookup misses abort the setup step that asked for them
            UnknownCard { .. } | UnknownEnemy { .. } => ErrorSeverity::Fatal,
            DuplicateCard { .. } | DuplicateEnemy { .. } | EmptyActionSet { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            UnknownCard { .. } => "CATALOG_UNKNOWN_CARD",
            UnknownEnemy { .. } => "CATALOG_UNKNOWN_ENEMY",
            DuplicateCard { .. } => "CATALOG_DUPLICATE_CARD",
            DuplicateEnemy { .. } => "CATALOG_DUPLICATE_ENEMY",
            EmptyActionSet { .. } => "CATALOG_EMPTY_ACTION_SET",
        }
    }
}

/// Name-keyed lookup of every card and opponent template.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: BTreeMap<String, Arc<CardDefinition>>,
    enemies: BTreeMap<String, Arc<EnemyDefinition>>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate names and opponents without actions.
    pub fn new(
        cards: impl IntoIterator<Item = CardDefinition>,
        enemies: impl IntoIterator<Item = EnemyDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for card in cards {
            if catalog.cards.contains_key(&card.name) {
                return Err(CatalogError::DuplicateCard { name: card.name });
            }
            catalog.cards.insert(card.name.clone(), Arc::new(card));
        }

        for enemy in enemies {
            if enemy.actions.is_empty() {
                return Err(CatalogError::EmptyActionSet { name: enemy.name });
            }
            if catalog.enemies.contains_key(&enemy.name) {
                return Err(CatalogError::DuplicateEnemy { name: enemy.name });
            }
            catalog.enemies.insert(enemy.name.clone(), Arc::new(enemy));
        }

        tracing::debug!(
            cards = catalog.cards.len(),
            enemies = catalog.enemies.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    pub fn card(&self, name: &str) -> Result<&Arc<CardDefinition>, CatalogError> {
        self.cards.get(name).ok_or_else(|| CatalogError::UnknownCard {
            name: name.to_owned(),
        })
    }

    pub fn enemy(&self, name: &str) -> Result<&Arc<EnemyDefinition>, CatalogError> {
        self.enemies
            .get(name)
            .ok_or_else(|| CatalogError::UnknownEnemy {
                name: name.to_owned(),
            })
    }

    /// All cards, ordered by name.
    pub fn cards(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }

    /// All opponent templates, ordered by name.
    pub fn enemies(&self) -> impl Iterator<Item = &Arc<EnemyDefinition>> {
        self.enemies.values()
    }

    pub fn starter_cards(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(|card| card.is_starter_card)
    }

    /// Cards eligible as victory rewards: everything that is not a starter card.
    pub fn reward_pool(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(|card| !card.is_starter_card)
    }

    /// Up to `count` distinct cards sampled uniformly from the reward pool.
    ///
    /// Falls back to the whole catalog when every card is a starter card.
    pub fn random_cards(&self, count: usize, rng: &mut BattleRng) -> Vec<Arc<CardDefinition>> {
        let mut pool: Vec<&Arc<CardDefinition>> = self.reward_pool().collect();
        if pool.is_empty() {
            pool = self.cards.values().collect();
        }

        rng.sample_indices(pool.len(), count)
            .into_iter()
            .map(|index| Arc::clone(pool[index]))
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }
}
