//! Player-phase commands.

use super::{BattleEngine, BattlePhase, CommandError, CommandResult};
use crate::deck::{CardInstanceId, DeckError};
use crate::effects::{self, CardTarget};
use crate::events::{BattleEvent, CombatantRef};
use crate::opponent::OpponentId;

impl BattleEngine {
    /// Sets or clears the selected card. A selected card must be in hand.
    pub fn select_card(&mut self, card: Option<CardInstanceId>) -> CommandResult {
        self.require_phase("select_card", &[BattlePhase::PlayerPhase])?;
        if let Some(card) = card {
            if self.deck.hand_card(card).is_none() {
                return Err(DeckError::CardNotInHand { card }.into());
            }
        }
        self.selected_card = card;
        self.publish(Vec::new())
    }

    /// Plays a card from the hand.
    ///
    /// Cards that deal damage need a living target. When `target` is `None`
    /// and exactly one opponent is alive, that opponent is chosen. Target and
    /// cost are both validated before anything changes.
    pub fn request_play_card(
        &mut self,
        card: CardInstanceId,
        target: Option<OpponentId>,
    ) -> CommandResult {
        self.require_phase("play_card", &[BattlePhase::PlayerPhase])?;

        let definition = self
            .deck
            .hand_card(card)
            .map(|instance| instance.definition.clone())
            .ok_or(DeckError::CardNotInHand { card })?;

        let target_index = if definition.needs_target() {
            Some(self.resolve_target(target)?)
        } else {
            None
        };

        if !self.energy.can_afford(definition.cost) {
            tracing::warn!(
                card = %card,
                cost = definition.cost,
                energy = self.energy.current(),
                "card rejected: not enough energy"
            );
            return Err(CommandError::InsufficientEnergy {
                required: definition.cost,
                available: self.energy.current(),
            });
        }

        let mut events = Vec::new();
        let card_target = match target_index {
            Some(index) => {
                let opponent = &mut self.opponents[index];
                Some(CardTarget {
                    id: opponent.id(),
                    state: opponent.state_mut(),
                })
            }
            None => None,
        };
        effects::resolve_card_play(
            card,
            &mut self.deck,
            &mut self.energy,
            &mut self.player,
            card_target,
            &mut self.rng,
            &mut events,
        )?;

        if self.selected_card == Some(card) {
            self.selected_card = None;
        }

        self.settle_deaths(&mut events);
        self.publish(events)
    }

    /// Index of the living opponent a damaging card lands on.
    fn resolve_target(&self, requested: Option<OpponentId>) -> Result<usize, CommandError> {
        let found = match requested {
            Some(id) => self.opponent_index(id),
            None if self.opponents.len() == 1 => Some(0),
            None => None,
        };

        found
            .filter(|&index| !self.opponents[index].state().is_dead())
            .ok_or_else(|| {
                tracing::warn!(?requested, "card rejected: no target");
                CommandError::TargetNotFound { requested }
            })
    }

    /// Removes defeated opponents and decides the battle if it is over.
    ///
    /// Player death wins over a simultaneous opponent wipe.
    pub(super) fn settle_deaths(&mut self, events: &mut Vec<BattleEvent>) {
        let mut fallen = Vec::new();
        self.opponents.retain(|opponent| {
            if opponent.state().is_dead() {
                fallen.push(opponent.id());
                false
            } else {
                true
            }
        });
        for id in fallen {
            tracing::debug!(opponent = %id, "opponent defeated");
            self.enemy_queue.retain(|queued| *queued != id);
            events.push(BattleEvent::CombatantDied {
                target: CombatantRef::Opponent(id),
            });
        }

        if self.player.is_dead() {
            events.push(BattleEvent::CombatantDied {
                target: CombatantRef::Player,
            });
            self.enter_battle_lost(events);
        } else if self.opponents.is_empty() {
            self.enter_battle_won(events);
        }
    }
}
