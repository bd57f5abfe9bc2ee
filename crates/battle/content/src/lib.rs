//! Data-driven battle content and loaders.
//!
//! This crate houses the card catalog, opponent templates, encounter plans
//! and battle configuration as RON/TOML data files:
//! - Card catalog (`cards.ron`)
//! - Opponent templates and their action scripts (`enemies.ron`)
//! - Encounter plan for a run (`encounters.ron`)
//! - Battle configuration (`config.toml`)
//!
//! All loaders deserialize battle-core types directly through its `serde` feature.
//! A default content set is compiled in and available through
//! [`ContentFactory::embedded`].

pub mod loaders;

pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, ContentSet, EncounterLoader, EnemyLoader, LoadResult,
};
