//! Effect resolution for card plays and opponent actions.
//!
//! Both resolvers mutate the components they are handed, append the
//! resulting [`BattleEvent`]s, and return a report. Deaths are reported but
//! not acted on here; removing opponents and deciding the battle is the
//! engine's job.

use crate::catalog::{ActionCategory, ActionDefinition};
use crate::combatant::{CombatantState, DamageOutcome};
use crate::deck::{CardInstanceId, DeckError, DeckState, DrawnCard};
use crate::energy::EnergyPool;
use crate::engine::CommandError;
use crate::events::{BattleEvent, CombatantRef};
use crate::opponent::OpponentId;
use crate::rng::BattleRng;

/// What a single card play did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardPlayReport {
    pub energy_spent: u32,
    pub healed: u32,
    pub self_damage: u32,
    pub drawn: Vec<CardInstanceId>,
    pub energy_gained: u32,
    pub damage: Option<DamageOutcome>,
    pub block_gained: u32,
}

/// What a single opponent action did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// One outcome per resolved hit. Stops early when the player dies.
    pub hits: Vec<DamageOutcome>,
    pub block_gained: u32,
    pub healed: u32,
    pub buff: i32,
}

impl ActionReport {
    pub fn health_damage(&self) -> u32 {
        self.hits.iter().map(|hit| hit.health_damage).sum()
    }
}

/// The opponent a card play lands on.
pub struct CardTarget<'a> {
    pub id: OpponentId,
    pub state: &'a mut CombatantState,
}

/// Plays `card` from the hand.
///
/// Fails without touching anything when the card is not in hand or its cost
/// cannot be paid. Otherwise applies heal, self-damage, card draw, energy
/// gain, damage to `target` and block, each only when non-zero, and then
/// moves the card to the discard pile.
pub fn resolve_card_play(
    card: CardInstanceId,
    deck: &mut DeckState,
    energy: &mut EnergyPool,
    player: &mut CombatantState,
    target: Option<CardTarget<'_>>,
    rng: &mut BattleRng,
    events: &mut Vec<BattleEvent>,
) -> Result<CardPlayReport, CommandError> {
    let instance = deck
        .hand_card(card)
        .cloned()
        .ok_or(DeckError::CardNotInHand { card })?;
    let definition = &instance.definition;

    if !energy.try_spend(definition.cost) {
        return Err(CommandError::InsufficientEnergy {
            required: definition.cost,
            available: energy.current(),
        });
    }

    events.push(BattleEvent::CardPlayed {
        card,
        name: definition.name.clone(),
        target: target.as_ref().map(|target| target.id),
    });
    let mut report = CardPlayReport {
        energy_spent: definition.cost,
        ..CardPlayReport::default()
    };
    if definition.cost > 0 {
        push_energy(energy, events);
    }

    if definition.heal > 0 {
        report.healed = player.heal(definition.heal);
        events.push(BattleEvent::Healed {
            target: CombatantRef::Player,
            amount: report.healed,
        });
    }

    if definition.self_damage > 0 {
        report.self_damage = player.apply_self_damage(definition.self_damage);
        events.push(BattleEvent::SelfDamaged {
            amount: report.self_damage,
        });
    }

    if definition.card_draw > 0 {
        for drawn in deck.draw_many(definition.card_draw, rng) {
            push_draw(&drawn, events);
            report.drawn.push(drawn.card.id);
        }
    }

    if definition.overcharge > 0 {
        energy.gain(definition.overcharge);
        report.energy_gained = definition.overcharge;
        push_energy(energy, events);
    }

    if definition.damage > 0 {
        if let Some(target) = target {
            let amount = card_damage(definition.damage, player.buff_progress());
            let outcome = target.state.apply_damage(amount);
            events.push(damage_event(CombatantRef::Opponent(target.id), &outcome, 1));
            report.damage = Some(outcome);
        }
    }

    if definition.block > 0 {
        player.add_block(definition.block);
        report.block_gained = definition.block;
        events.push(BattleEvent::BlockGained {
            target: CombatantRef::Player,
            amount: definition.block,
        });
    }

    let discarded = deck.discard(card)?;
    events.push(BattleEvent::CardDiscarded {
        card,
        name: discarded.definition.name.clone(),
    });

    tracing::debug!(
        card = %card,
        name = %definition.name,
        energy = energy.current(),
        "card resolved"
    );
    Ok(report)
}

/// Executes one opponent action against the player.
///
/// Multi-hit damage resolves hit by hit, each against the block left by the
/// previous one, and stops as soon as the player's health reaches 0.
pub fn resolve_opponent_action(
    opponent: OpponentId,
    action: &ActionDefinition,
    owner: &mut CombatantState,
    player: &mut CombatantState,
    events: &mut Vec<BattleEvent>,
) -> ActionReport {
    let mut report = ActionReport::default();
    let source = CombatantRef::Opponent(opponent);

    match action.category {
        ActionCategory::Damage => {
            let per_hit = action.effective_damage_per_hit(owner.buff_progress());
            for hit in 1..=action.hit_count() {
                if player.is_dead() {
                    break;
                }
                let outcome = player.apply_damage(per_hit);
                events.push(damage_event(CombatantRef::Player, &outcome, hit));
                report.hits.push(outcome);
            }
        }
        ActionCategory::Block => {
            owner.add_block(action.block_amount);
            report.block_gained = action.block_amount;
            events.push(BattleEvent::BlockGained {
                target: source,
                amount: action.block_amount,
            });
        }
        ActionCategory::Heal => {
            report.healed = owner.heal(action.heal_amount);
            events.push(BattleEvent::Healed {
                target: source,
                amount: report.healed,
            });
        }
        ActionCategory::Buff => {
            owner.add_buff(action.buff_amount);
            report.buff = action.buff_amount;
            events.push(BattleEvent::BuffApplied {
                target: source,
                amount: action.buff_amount,
            });
        }
    }

    tracing::debug!(
        opponent = %opponent,
        action = %action.name,
        category = %action.category,
        player_health = player.health(),
        "opponent action resolved"
    );
    report
}

/// Card damage after the player's buff progress, floored at 0.
pub fn card_damage(base: u32, buff_progress: i32) -> u32 {
    (i64::from(base) + i64::from(buff_progress)).clamp(0, i64::from(u32::MAX)) as u32
}

pub(crate) fn push_draw(drawn: &DrawnCard, events: &mut Vec<BattleEvent>) {
    if drawn.reshuffled {
        events.push(BattleEvent::DeckReshuffled);
    }
    events.push(BattleEvent::CardDrawn {
        card: drawn.card.id,
        name: drawn.card.name().to_owned(),
    });
}

pub(crate) fn push_energy(energy: &EnergyPool, events: &mut Vec<BattleEvent>) {
    events.push(BattleEvent::EnergyChanged {
        current: energy.current(),
        maximum: energy.maximum(),
    });
}

fn damage_event(target: CombatantRef, outcome: &DamageOutcome, hit: u32) -> BattleEvent {
    BattleEvent::DamageApplied {
        target,
        amount: outcome.amount,
        blocked: outcome.blocked_amount,
        health_damage: outcome.health_damage,
        fully_blocked: outcome.fully_blocked,
        hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardCategory, CardDefinition, Catalog, EnemyDefinition};
    use crate::config::DeckEntry;

    fn catalog() -> Catalog {
        Catalog::new(
            [
                CardDefinition::new("Slash", CardCategory::Attack, 1).with_damage(6),
                CardDefinition::new("Shield", CardCategory::Skill, 1).with_block(5),
                CardDefinition::new("Cleave", CardCategory::Attack, 2).with_damage(11),
                CardDefinition::new("Blood Pact", CardCategory::Skill, 0)
                    .with_heal(2)
                    .with_self_damage(4)
                    .with_card_draw(2)
                    .with_overcharge(2),
            ],
            Vec::<EnemyDefinition>::new(),
        )
        .unwrap()
    }

    fn deck_of(entries: &[DeckEntry], draw: u32, rng: &mut BattleRng) -> DeckState {
        let mut deck = DeckState::new();
        deck.initialize(&catalog(), entries).unwrap();
        deck.draw_many(draw, rng);
        deck
    }

    #[test]
    fn attack_spends_energy_damages_and_discards() {
        let mut rng = BattleRng::new(1);
        let mut deck = deck_of(&[DeckEntry::new("Slash", 2)], 2, &mut rng);
        let mut energy = EnergyPool::new(3);
        let mut player = CombatantState::new(75);
        let mut enemy = CombatantState::new(20);
        let mut events = Vec::new();
        let card = deck.hand()[0].id;

        let report = resolve_card_play(
            card,
            &mut deck,
            &mut energy,
            &mut player,
            Some(CardTarget {
                id: OpponentId(0),
                state: &mut enemy,
            }),
            &mut rng,
            &mut events,
        )
        .unwrap();

        assert_eq!(report.energy_spent, 1);
        assert_eq!(report.damage.unwrap().health_damage, 6);
        assert_eq!(enemy.health(), 14);
        assert_eq!(energy.current(), 2);
        assert_eq!(deck.hand().len(), 1);
        assert_eq!(deck.discard_pile()[0].id, card);
        assert!(matches!(events.first(), Some(BattleEvent::CardPlayed { .. })));
        assert!(matches!(events.last(), Some(BattleEvent::CardDiscarded { .. })));
        deck.integrity_check().unwrap();
    }

    #[test]
    fn unaffordable_card_changes_nothing() {
        let mut rng = BattleRng::new(1);
        let mut deck = deck_of(&[DeckEntry::new("Cleave", 1)], 1, &mut rng);
        let mut energy = EnergyPool::new(1);
        let mut player = CombatantState::new(75);
        let mut enemy = CombatantState::new(20);
        let mut events = Vec::new();
        let card = deck.hand()[0].id;

        let result = resolve_card_play(
            card,
            &mut deck,
            &mut energy,
            &mut player,
            Some(CardTarget {
                id: OpponentId(0),
                state: &mut enemy,
            }),
            &mut rng,
            &mut events,
        );

        assert_eq!(
            result,
            Err(CommandError::InsufficientEnergy {
                required: 2,
                available: 1
            })
        );
        assert_eq!(energy.current(), 1);
        assert_eq!(enemy.health(), 20);
        assert_eq!(deck.hand()[0].id, card);
        assert!(events.is_empty());
    }

    #[test]
    fn effects_apply_in_fixed_order() {
        let mut rng = BattleRng::new(4);
        let mut deck = deck_of(
            &[DeckEntry::new("Blood Pact", 1), DeckEntry::new("Shield", 4)],
            5,
            &mut rng,
        );
        // Leave only the pact in hand so its draws come from a reshuffle
        let shields: Vec<_> = deck
            .hand()
            .iter()
            .filter(|card| card.name() == "Shield")
            .map(|card| card.id)
            .collect();
        for shield in shields {
            deck.discard(shield).unwrap();
        }

        let mut energy = EnergyPool::new(3);
        let mut player = CombatantState::with_health(75, 70);
        let mut events = Vec::new();
        let card = deck.hand()[0].id;

        let report = resolve_card_play(
            card,
            &mut deck,
            &mut energy,
            &mut player,
            None,
            &mut rng,
            &mut events,
        )
        .unwrap();

        assert_eq!(report.healed, 2);
        assert_eq!(report.self_damage, 4);
        assert_eq!(report.drawn.len(), 2);
        assert_eq!(report.energy_gained, 2);
        assert_eq!(player.health(), 68);
        assert_eq!(energy.current(), 5);

        let kinds: Vec<_> = events
            .iter()
            .map(BattleEvent::kind)
            .filter(|kind| *kind != "deck_reshuffled")
            .collect();
        assert_eq!(
            kinds,
            [
                "card_played",
                "healed",
                "self_damaged",
                "card_drawn",
                "card_drawn",
                "energy_changed",
                "card_discarded"
            ]
        );
        deck.integrity_check().unwrap();
    }

    #[test]
    fn multi_hit_stops_when_player_dies() {
        let flurry = ActionDefinition::multi_hit("Flurry", 4, 5);
        let mut owner = CombatantState::new(30);
        let mut player = CombatantState::with_health(10, 10);
        player.add_block(2);
        let mut events = Vec::new();

        let report =
            resolve_opponent_action(OpponentId(0), &flurry, &mut owner, &mut player, &mut events);

        // 4 - 2 block, then 4, then 4 kills at hit 3
        assert_eq!(report.hits.len(), 3);
        assert_eq!(report.hits[0].blocked_amount, 2);
        assert!(report.hits[2].died);
        assert_eq!(report.health_damage(), 10);
        assert!(player.is_dead());
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn damage_event_reports_a_fully_blocked_hit() {
        let bite = ActionDefinition::damage("Bite", 5);
        let mut owner = CombatantState::new(30);
        let mut player = CombatantState::new(20);
        player.add_block(5);
        let mut events = Vec::new();

        resolve_opponent_action(OpponentId(0), &bite, &mut owner, &mut player, &mut events);
        resolve_opponent_action(OpponentId(0), &bite, &mut owner, &mut player, &mut events);

        assert_eq!(
            events,
            [
                BattleEvent::DamageApplied {
                    target: CombatantRef::Player,
                    amount: 5,
                    blocked: 5,
                    health_damage: 0,
                    fully_blocked: true,
                    hit: 1,
                },
                BattleEvent::DamageApplied {
                    target: CombatantRef::Player,
                    amount: 5,
                    blocked: 0,
                    health_damage: 5,
                    fully_blocked: false,
                    hit: 1,
                },
            ]
        );
        assert_eq!(player.health(), 15);
    }

    #[test]
    fn buffed_hits_use_effective_damage() {
        let bite = ActionDefinition::damage("Bite", 5);
        let mut owner = CombatantState::new(30);
        owner.add_buff(3);
        let mut player = CombatantState::new(75);
        let mut events = Vec::new();

        resolve_opponent_action(OpponentId(1), &bite, &mut owner, &mut player, &mut events);
        assert_eq!(player.health(), 67);
    }

    #[test]
    fn support_actions_affect_the_owner() {
        let mut owner = CombatantState::with_health(30, 20);
        let mut player = CombatantState::new(75);
        let mut events = Vec::new();

        resolve_opponent_action(
            OpponentId(0),
            &ActionDefinition::block("Harden", 6),
            &mut owner,
            &mut player,
            &mut events,
        );
        let heal = resolve_opponent_action(
            OpponentId(0),
            &ActionDefinition::heal("Regrow", 15),
            &mut owner,
            &mut player,
            &mut events,
        );
        resolve_opponent_action(
            OpponentId(0),
            &ActionDefinition::buff("Roar", 2),
            &mut owner,
            &mut player,
            &mut events,
        );

        assert_eq!(owner.block(), 6);
        assert_eq!(heal.healed, 10);
        assert_eq!(owner.health(), 30);
        assert_eq!(owner.buff_progress(), 2);
        assert_eq!(player.health(), 75);
    }

    #[test]
    fn card_damage_floors_at_zero() {
        assert_eq!(card_damage(6, 2), 8);
        assert_eq!(card_damage(6, -10), 0);
    }
}
