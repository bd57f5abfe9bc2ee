//! Per-opponent selection of the next scripted action.
//!
//! The sequencer decides one turn ahead: [`ActionSequencer::show_next_intent`]
//! picks the action the opponent will take and stores it as pending so the
//! player can see it. The enemy phase executes that stored action; the next
//! call to `show_next_intent` moves the cursor on.

use std::sync::Arc;

use crate::catalog::{ActionCategory, ActionDefinition};
use crate::rng::BattleRng;

/// How an opponent walks its action list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionMode {
    /// In order, wrapping to the first action after the last.
    #[default]
    FixedLooping,
    /// In order, repeating the last action forever once reached.
    FixedOnce,
    /// Uniformly random, never the same action twice in a row.
    RandomNoRepeat,
}

/// What the player sees of an opponent's pending action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentPreview {
    pub action: String,
    pub category: ActionCategory,
    /// Per-hit damage after buff for Damage; the block, heal or buff amount otherwise.
    pub value: i64,
    /// Number of hits. 1 for everything but multi-hit damage.
    pub hits: u32,
}

impl IntentPreview {
    /// Computes the preview of `action` for an owner with `buff_progress`.
    pub fn compute(action: &ActionDefinition, buff_progress: i32) -> Self {
        let (value, hits) = match action.category {
            ActionCategory::Damage => (
                i64::from(action.effective_damage_per_hit(buff_progress)),
                action.hit_count(),
            ),
            ActionCategory::Block => (i64::from(action.block_amount), 1),
            ActionCategory::Heal => (i64::from(action.heal_amount), 1),
            ActionCategory::Buff => (i64::from(action.buff_amount), 1),
        };

        Self {
            action: action.name.clone(),
            category: action.category,
            value,
            hits,
        }
    }

    /// Total damage if every hit lands unblocked. 0 for non-damage intents.
    pub fn total_damage(&self) -> i64 {
        match self.category {
            ActionCategory::Damage => self.value * i64::from(self.hits),
            _ => 0,
        }
    }
}

/// Cursor over one opponent's action list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSequencer {
    mode: SelectionMode,
    sequence_index: usize,
    last_selected: Option<usize>,
    pending: Option<usize>,
}

impl ActionSequencer {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Index of the pending action, if an intent has been shown.
    pub fn pending_index(&self) -> Option<usize> {
        self.pending
    }

    /// The pending action looked up in `actions`.
    pub fn pending<'a>(&self, actions: &'a [Arc<ActionDefinition>]) -> Option<&'a Arc<ActionDefinition>> {
        self.pending.and_then(|index| actions.get(index))
    }

    /// Chooses the next action and stores it as pending.
    ///
    /// Returns `None` only for an empty action list.
    pub fn show_next_intent<'a>(
        &mut self,
        actions: &'a [Arc<ActionDefinition>],
        rng: &mut BattleRng,
    ) -> Option<&'a Arc<ActionDefinition>> {
        let index = self.select(actions, rng)?;
        self.pending = Some(index);
        actions.get(index)
    }

    /// Picks an index into `actions` according to the selection mode.
    ///
    /// Random selection never returns an action equal to the previous pick,
    /// unless every entry in `actions` is the same action.
    pub fn select<T: PartialEq>(&mut self, actions: &[T], rng: &mut BattleRng) -> Option<usize> {
        let count = actions.len();
        if count == 0 {
            return None;
        }

        let index = match self.mode {
            SelectionMode::FixedLooping => {
                let current = self.sequence_index % count;
                self.sequence_index = (current + 1) % count;
                current
            }
            SelectionMode::FixedOnce => {
                let current = self.sequence_index.min(count - 1);
                if current + 1 < count {
                    self.sequence_index = current + 1;
                }
                current
            }
            SelectionMode::RandomNoRepeat => {
                let mut candidate = rng.index(count);
                let previous = self.last_selected.and_then(|last| actions.get(last));
                let single = actions.iter().all(|action| *action == actions[0]);
                if let (Some(previous), false) = (previous, single) {
                    while actions[candidate] == *previous {
                        candidate = rng.index(count);
                    }
                }
                candidate
            }
        };

        self.last_selected = Some(index);
        Some(index)
    }
}
