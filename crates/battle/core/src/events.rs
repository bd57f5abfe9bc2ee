//! Notifications produced by engine commands.
//!
//! Every command returns the events it produced, in order, and forwards them
//! to registered observers after all state mutation for the command is done.

use crate::deck::CardInstanceId;
use crate::engine::BattlePhase;
use crate::opponent::OpponentId;
use crate::sequencer::IntentPreview;

/// Who an effect landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantRef {
    Player,
    Opponent(OpponentId),
}

/// One-way notification of something that happened in a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A card moved from the draw pile into the hand.
    CardDrawn { card: CardInstanceId, name: String },

    /// The discard pile was shuffled back into the draw pile.
    DeckReshuffled,

    /// A card moved from the hand into the discard pile.
    CardDiscarded { card: CardInstanceId, name: String },

    CardPlayed {
        card: CardInstanceId,
        name: String,
        target: Option<OpponentId>,
    },

    EnergyChanged { current: u32, maximum: u32 },

    /// One hit resolved against a combatant. `hit` counts from 1.
    ///
    /// `fully_blocked` is set when block absorbed the whole hit, including a
    /// hit exactly equal to the remaining block.
    DamageApplied {
        target: CombatantRef,
        amount: u32,
        blocked: u32,
        health_damage: u32,
        fully_blocked: bool,
        hit: u32,
    },

    /// The player lost health to a card's own cost, bypassing block.
    SelfDamaged { amount: u32 },

    Healed { target: CombatantRef, amount: u32 },

    BlockGained { target: CombatantRef, amount: u32 },

    BuffApplied { target: CombatantRef, amount: i32 },

    /// Health reached 0. Opponents are removed from the active set.
    CombatantDied { target: CombatantRef },

    IntentRevealed {
        opponent: OpponentId,
        intent: IntentPreview,
    },

    PhaseChanged { from: BattlePhase, to: BattlePhase },

    BattleStarted {
        /// Index in the encounter plan, when the battle belongs to a run.
        encounter: Option<usize>,
        opponents: Vec<String>,
    },

    BattleWon,

    BattleLost,

    RewardsOffered { cards: Vec<String> },

    RewardTaken { card: CardInstanceId, name: String },

    /// Every encounter of the run has been won.
    RunCompleted { battles: usize },
}

impl BattleEvent {
    /// Stable snake_case name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CardDrawn { .. } => "card_drawn",
            Self::DeckReshuffled => "deck_reshuffled",
            Self::CardDiscarded { .. } => "card_discarded",
            Self::CardPlayed { .. } => "card_played",
            Self::EnergyChanged { .. } => "energy_changed",
            Self::DamageApplied { .. } => "damage_applied",
            Self::SelfDamaged { .. } => "self_damaged",
            Self::Healed { .. } => "healed",
            Self::BlockGained { .. } => "block_gained",
            Self::BuffApplied { .. } => "buff_applied",
            Self::CombatantDied { .. } => "combatant_died",
            Self::IntentRevealed { .. } => "intent_revealed",
            Self::PhaseChanged { .. } => "phase_changed",
            Self::BattleStarted { .. } => "battle_started",
            Self::BattleWon => "battle_won",
            Self::BattleLost => "battle_lost",
            Self::RewardsOffered { .. } => "rewards_offered",
            Self::RewardTaken { .. } => "reward_taken",
            Self::RunCompleted { .. } => "run_completed",
        }
    }
}
