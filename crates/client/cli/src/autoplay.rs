//! Greedy auto-play policy used by the simulator.

use anyhow::Result;
use battle_core::{
    BattleEngine, BattlePhase, CardInstance, CommandError, EncounterPlan, Opponent, OpponentId,
};

/// How a simulated run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every encounter in the plan was won.
    Completed,
    /// The player died in encounter `encounter` (0-based).
    Defeated { encounter: usize },
    /// The turn budget ran out first.
    TurnLimit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub battles_won: usize,
    pub turns: u32,
    pub final_health: u32,
    pub deck_size: usize,
}

/// Plays attacks at the weakest opponent, blocks when an attack is
/// incoming, and always takes the first offered reward.
pub struct AutoPlayer {
    max_turns: u32,
}

impl AutoPlayer {
    pub fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }

    pub fn play_run(&self, engine: &mut BattleEngine, plan: EncounterPlan) -> Result<RunReport> {
        engine.start_run(plan)?;
        let mut battles_won = 0;
        let mut turns = 0;

        let outcome = loop {
            match engine.phase() {
                BattlePhase::PlayerPhase => {
                    if turns >= self.max_turns {
                        break RunOutcome::TurnLimit;
                    }
                    self.play_turn(engine)?;
                    turns += 1;
                }
                BattlePhase::EnemyPhase => {
                    engine.resolve_next_enemy_action()?;
                }
                BattlePhase::BattleWon => {
                    battles_won += 1;
                    let reward = engine
                        .pending_rewards()
                        .and_then(|offer| offer.first())
                        .map(|card| card.name.clone());
                    if let Some(name) = reward {
                        engine.select_reward(&name)?;
                        tracing::info!(reward = %name, "reward taken");
                    }

                    match engine.start_next_battle() {
                        Ok(_) => tracing::info!(
                            encounter = engine.encounter_index(),
                            health = engine.player().health(),
                            "next encounter"
                        ),
                        Err(CommandError::RunComplete) => break RunOutcome::Completed,
                        Err(error) => return Err(error.into()),
                    }
                }
                BattlePhase::BattleLost => {
                    break RunOutcome::Defeated {
                        encounter: engine.encounter_index().unwrap_or_default(),
                    };
                }
                BattlePhase::Idle => anyhow::bail!("run did not start"),
            }
        };

        Ok(RunReport {
            outcome,
            battles_won,
            turns,
            final_health: engine.player().health(),
            deck_size: engine.deck().library().len(),
        })
    }

    /// Plays cards until nothing useful is affordable, then ends the turn.
    fn play_turn(&self, engine: &mut BattleEngine) -> Result<()> {
        while engine.phase() == BattlePhase::PlayerPhase {
            match choose_play(engine) {
                Some((card, target)) => {
                    engine.request_play_card(card.id, target)?;
                }
                None => {
                    engine.request_end_turn()?;
                    break;
                }
            }
        }
        Ok(())
    }
}

fn choose_play(engine: &BattleEngine) -> Option<(CardInstance, Option<OpponentId>)> {
    let affordable: Vec<&CardInstance> = engine
        .hand()
        .iter()
        .filter(|card| engine.energy().can_afford(card.definition.cost))
        .collect();

    let incoming: i64 = engine
        .opponents()
        .iter()
        .filter_map(Opponent::intent)
        .map(|intent| intent.total_damage())
        .sum();
    let block = i64::from(engine.player().block());

    if incoming > block {
        if let Some(card) = affordable
            .iter()
            .filter(|card| card.definition.block > 0 && card.definition.damage == 0)
            .max_by_key(|card| card.definition.block)
        {
            return Some(((*card).clone(), None));
        }
    }

    let target = engine
        .opponents()
        .iter()
        .min_by_key(|opponent| opponent.state().health() + opponent.state().block())
        .map(Opponent::id);

    if let Some(card) = affordable
        .iter()
        .filter(|card| card.definition.damage > 0)
        .filter(|card| card.definition.self_damage < engine.player().health())
        .max_by_key(|card| card.definition.damage)
    {
        return Some(((*card).clone(), target));
    }

    affordable
        .into_iter()
        .find(|card| {
            let definition = &card.definition;
            definition.damage == 0
                && definition.self_damage == 0
                && (definition.card_draw > 0 || definition.overcharge > 0 || definition.heal > 0)
        })
        .map(|card| (card.clone(), None))
}
