//! Turn-based combat engine for a card-driven battler.
//!
//! `battle-core` owns the player's deck economy, the energy budget, the turn
//! state machine alternating player and opponent phases, opponent intent
//! sequencing, and the block/damage/heal/buff arithmetic shared by every
//! combatant. All state mutation flows through [`engine::BattleEngine`];
//! presentation layers read snapshots and listen to [`events::BattleEvent`]s.
pub mod catalog;
pub mod combatant;
pub mod config;
pub mod deck;
pub mod effects;
pub mod energy;
pub mod engine;
pub mod error;
pub mod events;
pub mod opponent;
pub mod rng;
pub mod sequencer;
pub use catalog::{
    ActionCategory, ActionDefinition, CardCategory, CardDefinition, Catalog, CatalogError,
    EnemyDefinition,
};
pub use combatant::{CombatantState, DamageOutcome};
pub use config::{BattleConfig, DeckEntry, EnemyPhaseMode};
pub use deck::{CardInstance, CardInstanceId, DeckError, DeckState, DrawnCard};
pub use effects::{ActionReport, CardPlayReport};
pub use energy::EnergyPool;
pub use engine::{
    BattleEngine, BattleObserver, BattlePhase, BattleSnapshot, CardView, CommandError,
    CommandResult, EncounterPlan, EventLog, OpponentView, TracingObserver,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{BattleEvent, CombatantRef};
pub use opponent::{Opponent, OpponentId};
pub use rng::BattleRng;
pub use sequencer::{ActionSequencer, IntentPreview, SelectionMode};
