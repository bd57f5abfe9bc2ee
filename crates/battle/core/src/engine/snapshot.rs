//! Owned read-only view of a session for presentation layers.

use super::{BattleEngine, BattlePhase};
use crate::combatant::CombatantState;
use crate::deck::{CardInstance, CardInstanceId};
use crate::opponent::{Opponent, OpponentId};
use crate::sequencer::IntentPreview;

/// A card in hand as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardView {
    pub id: CardInstanceId,
    pub name: String,
    pub cost: u32,
    pub description: String,
    pub playable: bool,
}

/// An opponent as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentView {
    pub id: OpponentId,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub block: u32,
    pub buff_progress: i32,
    pub intent: Option<IntentPreview>,
}

/// Everything a presentation layer needs to draw the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub phase: BattlePhase,
    pub turn: u32,
    pub encounter: Option<usize>,
    pub energy: u32,
    pub max_energy: u32,
    pub player: CombatantState,
    pub hand: Vec<CardView>,
    pub draw_count: usize,
    pub discard_count: usize,
    pub library_size: usize,
    pub opponents: Vec<OpponentView>,
    pub selected_card: Option<CardInstanceId>,
    pub pending_rewards: Vec<String>,
}

impl BattleEngine {
    pub fn snapshot(&self) -> BattleSnapshot {
        let in_player_phase = self.phase == BattlePhase::PlayerPhase;
        BattleSnapshot {
            phase: self.phase,
            turn: self.turn,
            encounter: self.encounter_index(),
            energy: self.energy.current(),
            max_energy: self.energy.maximum(),
            player: self.player,
            hand: self
                .deck
                .hand()
                .iter()
                .map(|card| self.card_view(card, in_player_phase))
                .collect(),
            draw_count: self.deck.draw_count(),
            discard_count: self.deck.discard_count(),
            library_size: self.deck.library().len(),
            opponents: self.opponents.iter().map(opponent_view).collect(),
            selected_card: self.selected_card,
            pending_rewards: self
                .pending_rewards()
                .unwrap_or_default()
                .iter()
                .map(|card| card.name.clone())
                .collect(),
        }
    }

    fn card_view(&self, card: &CardInstance, in_player_phase: bool) -> CardView {
        let definition = &card.definition;
        CardView {
            id: card.id,
            name: definition.name.clone(),
            cost: definition.cost,
            description: definition.describe(),
            playable: in_player_phase && self.energy.can_afford(definition.cost),
        }
    }
}

fn opponent_view(opponent: &Opponent) -> OpponentView {
    let state = opponent.state();
    OpponentView {
        id: opponent.id(),
        name: opponent.name().to_owned(),
        health: state.health(),
        max_health: state.max_health(),
        block: state.block(),
        buff_progress: state.buff_progress(),
        intent: opponent.intent().cloned(),
    }
}
