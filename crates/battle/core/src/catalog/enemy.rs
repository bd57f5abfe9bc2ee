//! Opponent templates and their scripted actions.

use std::sync::Arc;

use crate::sequencer::SelectionMode;

/// What an opponent action does when it resolves.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCategory {
    Damage,
    Block,
    Heal,
    Buff,
}

/// Immutable opponent action template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub name: String,
    pub category: ActionCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub multi_hit: bool,
    /// Hits per resolution when `multi_hit` is set.
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_per_hit: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_amount: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_amount: u32,
    /// Added to the owner's buff progress. May be negative.
    #[cfg_attr(feature = "serde", serde(default))]
    pub buff_amount: i32,
}

#[cfg(feature = "serde")]
fn default_hits() -> u32 {
    1
}

impl ActionDefinition {
    fn base(name: impl Into<String>, category: ActionCategory) -> Self {
        Self {
            name: name.into(),
            category,
            multi_hit: false,
            hits: 1,
            damage_per_hit: 0,
            block_amount: 0,
            heal_amount: 0,
            buff_amount: 0,
        }
    }

    pub fn damage(name: impl Into<String>, damage_per_hit: u32) -> Self {
        Self {
            damage_per_hit,
            ..Self::base(name, ActionCategory::Damage)
        }
    }

    pub fn multi_hit(name: impl Into<String>, damage_per_hit: u32, hits: u32) -> Self {
        Self {
            multi_hit: true,
            hits,
            damage_per_hit,
            ..Self::base(name, ActionCategory::Damage)
        }
    }

    pub fn block(name: impl Into<String>, amount: u32) -> Self {
        Self {
            block_amount: amount,
            ..Self::base(name, ActionCategory::Block)
        }
    }

    pub fn heal(name: impl Into<String>, amount: u32) -> Self {
        Self {
            heal_amount: amount,
            ..Self::base(name, ActionCategory::Heal)
        }
    }

    pub fn buff(name: impl Into<String>, amount: i32) -> Self {
        Self {
            buff_amount: amount,
            ..Self::base(name, ActionCategory::Buff)
        }
    }

    /// Number of hits a Damage action resolves: `hits` if multi-hit, else 1.
    pub fn hit_count(&self) -> u32 {
        if self.multi_hit { self.hits } else { 1 }
    }

    /// Damage per hit after the owner's buff progress, floored at 0.
    pub fn effective_damage_per_hit(&self, buff_progress: i32) -> u32 {
        let adjusted = i64::from(self.damage_per_hit) + i64::from(buff_progress);
        adjusted.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Immutable opponent template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: u32,
    /// When false the opponent spawns with `starting_health` instead of full health.
    #[cfg_attr(feature = "serde", serde(default = "default_reset_health"))]
    pub reset_health_on_spawn: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_health: Option<u32>,
    pub actions: Vec<Arc<ActionDefinition>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub selection: SelectionMode,
}

#[cfg(feature = "serde")]
fn default_reset_health() -> bool {
    true
}

impl EnemyDefinition {
    pub fn new(name: impl Into<String>, max_health: u32, actions: Vec<ActionDefinition>) -> Self {
        Self {
            name: name.into(),
            max_health,
            reset_health_on_spawn: true,
            starting_health: None,
            actions: actions.into_iter().map(Arc::new).collect(),
            selection: SelectionMode::FixedLooping,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_starting_health(mut self, health: u32) -> Self {
        self.reset_health_on_spawn = false;
        self.starting_health = Some(health);
        self
    }

    /// Health the opponent has when it enters a battle.
    pub fn spawn_health(&self) -> u32 {
        if self.reset_health_on_spawn {
            return self.max_health;
        }
        self.starting_health
            .unwrap_or(self.max_health)
            .min(self.max_health)
    }
}
