//! Battle session and turn state machine.
//!
//! [`BattleEngine`] owns every piece of mutable battle state: the deck, the
//! energy pool, the player, the active opponents and the session RNG. All
//! mutation goes through its commands. Each command validates first, so a
//! rejected command leaves the session exactly as it was, then mutates, then
//! hands the produced events to the observers.
//!
//! Commands are grouped by concern:
//! - [`play`]: card selection and card plays during the player phase
//! - [`turns`]: end of turn, the enemy phase, and the start of the player phase
//! - [`run`]: battle start, encounter plans, and victory rewards

mod errors;
mod observer;
mod phase;
mod play;
mod run;
mod snapshot;
mod turns;

use std::collections::VecDeque;
use std::sync::Arc;

pub use errors::CommandError;
pub use observer::{BattleObserver, EventLog, TracingObserver};
pub use phase::BattlePhase;
pub use run::EncounterPlan;
pub use snapshot::{BattleSnapshot, CardView, OpponentView};

use crate::catalog::{CardDefinition, Catalog};
use crate::combatant::CombatantState;
use crate::config::BattleConfig;
use crate::deck::{CardInstance, CardInstanceId, DeckState};
use crate::energy::EnergyPool;
use crate::events::BattleEvent;
use crate::opponent::{Opponent, OpponentId};
use crate::rng::BattleRng;

/// Events produced by one command, or the reason it was rejected.
pub type CommandResult = Result<Vec<BattleEvent>, CommandError>;

/// One battle session: a player, their deck, and the opponents they face.
pub struct BattleEngine {
    catalog: Arc<Catalog>,
    config: BattleConfig,
    rng: BattleRng,
    deck: DeckState,
    energy: EnergyPool,
    player: CombatantState,
    /// Active opponents in spawn order. Defeated opponents are removed.
    opponents: Vec<Opponent>,
    next_opponent_id: u32,
    phase: BattlePhase,
    /// Opponents still to act in the current enemy phase.
    enemy_queue: VecDeque<OpponentId>,
    selected_card: Option<CardInstanceId>,
    turn: u32,
    run: Option<run::RunProgress>,
    reward_offer: Option<Vec<Arc<CardDefinition>>>,
    observers: Vec<Box<dyn BattleObserver>>,
}

impl BattleEngine {
    /// Creates an idle session. Nothing happens until a battle is started.
    pub fn new(catalog: Arc<Catalog>, config: BattleConfig) -> Self {
        let rng = BattleRng::from_seed(config.seed);
        Self {
            catalog,
            rng,
            deck: DeckState::new(),
            energy: EnergyPool::new(config.max_energy),
            player: CombatantState::new(config.player_max_health),
            opponents: Vec::new(),
            next_opponent_id: 0,
            phase: BattlePhase::Idle,
            enemy_queue: VecDeque::new(),
            selected_card: None,
            turn: 0,
            run: None,
            reward_offer: None,
            observers: Vec::new(),
            config,
        }
    }

    /// Registers an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: impl BattleObserver + 'static) {
        tracing::debug!(observer = observer.name(), "observer registered");
        self.observers.push(Box::new(observer));
    }

    // ===== queries =====

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Player turns started in the current battle, counting from 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn deck(&self) -> &DeckState {
        &self.deck
    }

    pub fn hand(&self) -> &[CardInstance] {
        self.deck.hand()
    }

    pub fn draw_count(&self) -> usize {
        self.deck.draw_count()
    }

    pub fn discard_count(&self) -> usize {
        self.deck.discard_count()
    }

    pub fn energy(&self) -> &EnergyPool {
        &self.energy
    }

    pub fn player(&self) -> &CombatantState {
        &self.player
    }

    /// Living opponents in the order they act.
    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn opponent(&self, id: OpponentId) -> Option<&Opponent> {
        self.opponents.iter().find(|opponent| opponent.id() == id)
    }

    pub fn selected_card(&self) -> Option<CardInstanceId> {
        self.selected_card
    }

    /// Cards offered after the last victory, until one is taken or skipped.
    pub fn pending_rewards(&self) -> Option<&[Arc<CardDefinition>]> {
        self.reward_offer.as_deref()
    }

    /// Index of the current battle in the active encounter plan.
    pub fn encounter_index(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.index)
    }

    /// Read-only reward query: up to `count` random non-starter cards.
    ///
    /// Draws from the session RNG but touches no battle state.
    pub fn random_cards(&mut self, count: usize) -> Vec<Arc<CardDefinition>> {
        self.catalog.random_cards(count, &mut self.rng)
    }

    // ===== internal helpers =====

    fn require_phase(&self, command: &str, allowed: &[BattlePhase]) -> Result<(), CommandError> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        tracing::warn!(command, phase = %self.phase, "command rejected in current phase");
        Err(CommandError::InvalidPhase {
            command: command.to_owned(),
            phase: self.phase,
        })
    }

    fn set_phase(&mut self, to: BattlePhase, events: &mut Vec<BattleEvent>) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::debug!(%from, %to, turn = self.turn, "phase changed");
        events.push(BattleEvent::PhaseChanged { from, to });
    }

    fn opponent_index(&self, id: OpponentId) -> Option<usize> {
        self.opponents.iter().position(|opponent| opponent.id() == id)
    }

    /// Hands `events` to every observer and returns them to the caller.
    fn publish(&mut self, events: Vec<BattleEvent>) -> CommandResult {
        self.notify(&events);
        Ok(events)
    }

    /// Hands `events` to every observer.
    fn notify(&mut self, events: &[BattleEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("player", &self.player)
            .field("energy", &self.energy)
            .field("opponents", &self.opponents.len())
            .field("hand", &self.deck.hand().len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
