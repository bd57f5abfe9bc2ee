//! Battle start, encounter progression and victory rewards.

use std::sync::Arc;

use super::{BattleEngine, BattlePhase, CommandError, CommandResult};
use crate::catalog::CardDefinition;
use crate::config::DeckEntry;
use crate::events::BattleEvent;
use crate::opponent::{Opponent, OpponentId};

/// Ordered opponent rosters fought one after another in a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterPlan {
    pub encounters: Vec<Vec<String>>,
}

impl EncounterPlan {
    pub fn new(encounters: Vec<Vec<String>>) -> Self {
        Self { encounters }
    }

    /// Appends one roster.
    #[must_use]
    pub fn then<S: Into<String>>(mut self, roster: impl IntoIterator<Item = S>) -> Self {
        self.encounters
            .push(roster.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    pub fn roster(&self, index: usize) -> Option<&[String]> {
        self.encounters.get(index).map(Vec::as_slice)
    }
}

#[derive(Clone, Debug)]
pub(super) struct RunProgress {
    pub(super) plan: EncounterPlan,
    pub(super) index: usize,
}

impl BattleEngine {
    /// Starts a battle against `roster`.
    ///
    /// With `reset_deck` the player returns to full health and the deck is
    /// rebuilt from the starter composition. Otherwise the piles are
    /// consolidated and health carries over. The draw pile is shuffled either
    /// way. Allowed before the first battle and after a battle is decided.
    /// A standalone battle ends any run in progress.
    pub fn start_battle<S: AsRef<str>>(&mut self, roster: &[S], reset_deck: bool) -> CommandResult {
        self.require_phase(
            "start_battle",
            &[BattlePhase::Idle, BattlePhase::BattleWon, BattlePhase::BattleLost],
        )?;
        let mut events = Vec::new();
        self.begin_battle(roster, reset_deck, None, &mut events)?;
        self.run = None;
        self.publish(events)
    }

    /// Starts the first encounter of `plan` with a fresh deck.
    pub fn start_run(&mut self, plan: EncounterPlan) -> CommandResult {
        self.require_phase(
            "start_run",
            &[BattlePhase::Idle, BattlePhase::BattleWon, BattlePhase::BattleLost],
        )?;
        let first = plan.roster(0).ok_or(CommandError::EmptyRoster)?.to_vec();

        let mut events = Vec::new();
        self.begin_battle(&first, true, Some(0), &mut events)?;
        tracing::debug!(encounters = plan.len(), "run started");
        self.run = Some(RunProgress { plan, index: 0 });
        self.publish(events)
    }

    /// Starts the next encounter of the run, keeping deck and health.
    ///
    /// When every encounter has been won, observers receive
    /// [`BattleEvent::RunCompleted`] and the command fails with
    /// [`CommandError::RunComplete`].
    pub fn start_next_battle(&mut self) -> CommandResult {
        self.require_phase("start_next_battle", &[BattlePhase::BattleWon])?;
        let (next, roster) = {
            let run = self.run.as_ref().ok_or(CommandError::NoActiveRun)?;
            let next = run.index + 1;
            (next, run.plan.roster(next).map(<[String]>::to_vec))
        };

        let Some(roster) = roster else {
            tracing::debug!(battles = next, "run completed");
            self.notify(&[BattleEvent::RunCompleted { battles: next }]);
            return Err(CommandError::RunComplete);
        };

        let mut events = Vec::new();
        self.begin_battle(&roster, false, Some(next), &mut events)?;
        if let Some(run) = self.run.as_mut() {
            run.index = next;
        }
        self.publish(events)
    }

    /// Adds the offered card named `name` to the deck and closes the offer.
    ///
    /// The card is placed on the discard pile and joins the draw pile at the
    /// next consolidation.
    pub fn select_reward(&mut self, name: &str) -> CommandResult {
        self.require_phase("select_reward", &[BattlePhase::BattleWon])?;
        let offer = self
            .reward_offer
            .as_ref()
            .ok_or(CommandError::NoRewardPending)?;
        let definition = offer
            .iter()
            .find(|card| card.name == name)
            .map(Arc::clone)
            .ok_or_else(|| CommandError::RewardNotOffered {
                name: name.to_owned(),
            })?;

        self.reward_offer = None;
        let card = self.deck.add_card(definition, false, &mut self.rng);
        tracing::debug!(card = %card.id, name, "reward taken");
        self.publish(vec![BattleEvent::RewardTaken {
            card: card.id,
            name: card.name().to_owned(),
        }])
    }

    /// Closes the reward offer without taking a card.
    pub fn skip_reward(&mut self) -> CommandResult {
        self.require_phase("skip_reward", &[BattlePhase::BattleWon])?;
        if self.reward_offer.take().is_none() {
            return Err(CommandError::NoRewardPending);
        }
        tracing::debug!("reward skipped");
        self.publish(Vec::new())
    }

    fn begin_battle<S: AsRef<str>>(
        &mut self,
        roster: &[S],
        reset_deck: bool,
        encounter: Option<usize>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), CommandError> {
        if roster.is_empty() {
            return Err(CommandError::EmptyRoster);
        }
        let templates = roster
            .iter()
            .map(|name| self.catalog.enemy(name.as_ref()).map(Arc::clone))
            .collect::<Result<Vec<_>, _>>()?;

        // A defeated player or a session without a deck always starts fresh
        if reset_deck || self.player.is_dead() || self.deck.library().is_empty() {
            let composition = self.starter_composition();
            self.deck.initialize(&self.catalog, &composition)?;
            self.player.reset();
        } else {
            self.deck.reset_for_next_battle();
            self.player.reset_block();
        }
        self.deck.shuffle(&mut self.rng);

        self.opponents = templates
            .into_iter()
            .map(|template| {
                let id = OpponentId(self.next_opponent_id);
                self.next_opponent_id += 1;
                Opponent::spawn(id, template)
            })
            .collect();
        self.enemy_queue.clear();
        self.selected_card = None;
        self.reward_offer = None;
        self.turn = 0;

        tracing::debug!(
            opponents = self.opponents.len(),
            reset_deck,
            deck = self.deck.library().len(),
            "battle started"
        );
        events.push(BattleEvent::BattleStarted {
            encounter,
            opponents: self.opponents.iter().map(|o| o.name().to_owned()).collect(),
        });
        self.begin_player_phase(events);
        Ok(())
    }

    /// The configured starting deck, or every starter card times `starter_copies`.
    fn starter_composition(&self) -> Vec<DeckEntry> {
        if !self.config.starter_deck.is_empty() {
            return self.config.starter_deck.clone();
        }
        self.catalog
            .starter_cards()
            .map(|card| DeckEntry::new(card.name.clone(), self.config.starter_copies))
            .collect()
    }

    pub(super) fn enter_battle_won(&mut self, events: &mut Vec<BattleEvent>) {
        self.set_phase(BattlePhase::BattleWon, events);
        self.enemy_queue.clear();
        events.push(BattleEvent::BattleWon);

        let offer: Vec<Arc<CardDefinition>> = self
            .catalog
            .random_cards(self.config.reward_options as usize, &mut self.rng);
        if offer.is_empty() {
            self.reward_offer = None;
            return;
        }
        events.push(BattleEvent::RewardsOffered {
            cards: offer.iter().map(|card| card.name.clone()).collect(),
        });
        tracing::debug!(options = offer.len(), "battle won");
        self.reward_offer = Some(offer);
    }

    pub(super) fn enter_battle_lost(&mut self, events: &mut Vec<BattleEvent>) {
        self.set_phase(BattlePhase::BattleLost, events);
        self.enemy_queue.clear();
        self.opponents.clear();
        self.reward_offer = None;
        tracing::debug!(turn = self.turn, "battle lost");
        events.push(BattleEvent::BattleLost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_builder_keeps_order() {
        let plan = EncounterPlan::default()
            .then(["Slime"])
            .then(["Slime", "Goblin"]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.roster(1).unwrap(), ["Slime", "Goblin"]);
        assert!(plan.roster(2).is_none());
        assert!(EncounterPlan::new(Vec::new()).is_empty());
    }
}
