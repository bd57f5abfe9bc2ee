//! Turn transitions and the enemy phase.
//!
//! ```text
//! PlayerPhase --end turn--> EnemyPhase --all acted--> PlayerPhase
//!                               |
//!                               +--player at 0 HP--> BattleLost
//! ```

use super::{BattleEngine, BattlePhase, CommandResult};
use crate::config::EnemyPhaseMode;
use crate::effects::{self, push_draw, push_energy};
use crate::events::{BattleEvent, CombatantRef};

impl BattleEngine {
    /// Ends the player's turn.
    ///
    /// The hand is discarded and the selection cleared. With
    /// [`EnemyPhaseMode::Immediate`] every opponent acts before this returns;
    /// with [`EnemyPhaseMode::Stepped`] the caller drives
    /// [`resolve_next_enemy_action`](Self::resolve_next_enemy_action).
    ///
    /// Repeated requests during the enemy phase are ignored.
    pub fn request_end_turn(&mut self) -> CommandResult {
        if self.phase == BattlePhase::EnemyPhase {
            tracing::debug!("end turn ignored: enemy phase already running");
            return Ok(Vec::new());
        }
        self.require_phase("end_turn", &[BattlePhase::PlayerPhase])?;

        let mut events = Vec::new();
        for card in self.deck.discard_hand() {
            events.push(BattleEvent::CardDiscarded {
                card: card.id,
                name: card.name().to_owned(),
            });
        }
        self.selected_card = None;

        self.enemy_queue = self.opponents.iter().map(|opponent| opponent.id()).collect();
        self.set_phase(BattlePhase::EnemyPhase, &mut events);

        if self.config.enemy_phase == EnemyPhaseMode::Immediate {
            while self.phase == BattlePhase::EnemyPhase {
                self.enemy_step(&mut events);
            }
        }

        self.publish(events)
    }

    /// Lets the next opponent in spawn order take its pending action.
    ///
    /// When the last opponent has acted and the player is alive, the next
    /// player phase begins.
    pub fn resolve_next_enemy_action(&mut self) -> CommandResult {
        self.require_phase("resolve_enemy_action", &[BattlePhase::EnemyPhase])?;
        let mut events = Vec::new();
        self.enemy_step(&mut events);
        self.publish(events)
    }

    /// Number of opponents that have not acted yet this enemy phase.
    pub fn enemies_remaining(&self) -> usize {
        self.enemy_queue.len()
    }

    fn enemy_step(&mut self, events: &mut Vec<BattleEvent>) {
        if let Some(id) = self.enemy_queue.pop_front() {
            if let Some(index) = self.opponent_index(id) {
                let opponent = &mut self.opponents[index];
                opponent.state_mut().reset_block();

                match opponent.pending_action() {
                    Some(action) => {
                        effects::resolve_opponent_action(
                            id,
                            &action,
                            opponent.state_mut(),
                            &mut self.player,
                            events,
                        );
                    }
                    None => tracing::warn!(opponent = %id, "opponent has no pending action"),
                }
            }

            if self.player.is_dead() {
                self.enemy_queue.clear();
                events.push(BattleEvent::CombatantDied {
                    target: CombatantRef::Player,
                });
                self.enter_battle_lost(events);
                return;
            }
        }

        if self.enemy_queue.is_empty() {
            self.begin_player_phase(events);
        }
    }

    /// Starts a player phase: intents, energy, hand, then block reset.
    pub(super) fn begin_player_phase(&mut self, events: &mut Vec<BattleEvent>) {
        self.turn += 1;
        self.set_phase(BattlePhase::PlayerPhase, events);

        for opponent in &mut self.opponents {
            if let Some(intent) = opponent.show_next_intent(&mut self.rng) {
                events.push(BattleEvent::IntentRevealed {
                    opponent: opponent.id(),
                    intent,
                });
            }
        }

        self.energy.restore();
        push_energy(&self.energy, events);

        for drawn in self.deck.draw_many(self.config.hand_size, &mut self.rng) {
            push_draw(&drawn, events);
        }

        self.player.reset_block();
        tracing::debug!(
            turn = self.turn,
            hand = self.deck.hand().len(),
            energy = self.energy.current(),
            "player phase started"
        );
    }
}
