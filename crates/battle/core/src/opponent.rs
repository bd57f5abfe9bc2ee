//! Live opponents spawned from catalog templates.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{ActionDefinition, EnemyDefinition};
use crate::combatant::CombatantState;
use crate::rng::BattleRng;
use crate::sequencer::{ActionSequencer, IntentPreview};

/// Battle-unique identifier of a spawned opponent.
///
/// Ids increase in spawn order, which is also the order opponents act in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentId(pub u32);

impl fmt::Display for OpponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opponent-{}", self.0)
    }
}

/// One opponent in the active set.
#[derive(Clone, Debug)]
pub struct Opponent {
    id: OpponentId,
    definition: Arc<EnemyDefinition>,
    state: CombatantState,
    sequencer: ActionSequencer,
    intent: Option<IntentPreview>,
}

impl Opponent {
    /// Spawns an opponent with the health its template asks for.
    pub fn spawn(id: OpponentId, definition: Arc<EnemyDefinition>) -> Self {
        let state = CombatantState::with_health(definition.max_health, definition.spawn_health());
        let sequencer = ActionSequencer::new(definition.selection);
        Self {
            id,
            definition,
            state,
            sequencer,
            intent: None,
        }
    }

    pub fn id(&self) -> OpponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &Arc<EnemyDefinition> {
        &self.definition
    }

    pub fn state(&self) -> &CombatantState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    /// Preview of the action this opponent will take next enemy phase.
    pub fn intent(&self) -> Option<&IntentPreview> {
        self.intent.as_ref()
    }

    /// The stored action that the next enemy phase executes.
    pub fn pending_action(&self) -> Option<Arc<ActionDefinition>> {
        self.sequencer
            .pending(&self.definition.actions)
            .map(Arc::clone)
    }

    /// Advances the sequencer and stores the new intent.
    pub fn show_next_intent(&mut self, rng: &mut BattleRng) -> Option<IntentPreview> {
        let action = self
            .sequencer
            .show_next_intent(&self.definition.actions, rng)?;
        let preview = IntentPreview::compute(action, self.state.buff_progress());
        tracing::trace!(opponent = %self.id, action = %preview.action, "intent chosen");
        self.intent = Some(preview.clone());
        Some(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActionDefinition;
    use crate::sequencer::SelectionMode;

    fn slime() -> Arc<EnemyDefinition> {
        Arc::new(
            EnemyDefinition::new(
                "Slime",
                20,
                vec![
                    ActionDefinition::damage("Tackle", 4),
                    ActionDefinition::block("Harden", 5),
                ],
            )
            .with_selection(SelectionMode::FixedLooping),
        )
    }

    #[test]
    fn spawn_uses_template_health() {
        let opponent = Opponent::spawn(OpponentId(0), slime());
        assert_eq!(opponent.state().health(), 20);
        assert!(opponent.intent().is_none());
        assert!(opponent.pending_action().is_none());

        let wounded = Arc::new((*slime()).clone().with_starting_health(7));
        assert_eq!(Opponent::spawn(OpponentId(1), wounded).state().health(), 7);
    }

    #[test]
    fn intent_tracks_pending_action() {
        let mut opponent = Opponent::spawn(OpponentId(0), slime());
        let mut rng = BattleRng::new(0);

        let first = opponent.show_next_intent(&mut rng).unwrap();
        assert_eq!(first.action, "Tackle");
        assert_eq!(opponent.pending_action().unwrap().name, "Tackle");

        opponent.state_mut().add_buff(2);
        opponent.show_next_intent(&mut rng);
        opponent.show_next_intent(&mut rng);
        assert_eq!(opponent.intent().unwrap().value, 6);
    }
}
