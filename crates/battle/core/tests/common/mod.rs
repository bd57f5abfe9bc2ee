#![allow(dead_code)]

use std::sync::Arc;

use battle_core::{
    ActionDefinition, BattleConfig, BattleEngine, CardCategory, CardDefinition, CardInstanceId,
    Catalog, DeckEntry, EnemyDefinition, SelectionMode,
};

/// Slash/Shield starter deck, two reward cards, and a handful of opponents.
pub fn catalog() -> Arc<Catalog> {
    let cards = [
        CardDefinition::new("Slash", CardCategory::Attack, 1)
            .with_damage(6)
            .starter()
            .with_description("Deal {damage} damage."),
        CardDefinition::new("Shield", CardCategory::Skill, 1)
            .with_block(5)
            .starter()
            .with_description("Gain {block} block."),
        CardDefinition::new("Cleave", CardCategory::Attack, 2).with_damage(11),
        CardDefinition::new("Mend", CardCategory::Skill, 1).with_heal(6),
    ];
    let enemies = [
        EnemyDefinition::new("Slime", 20, vec![ActionDefinition::damage("Tackle", 4)]),
        EnemyDefinition::new("Gnat", 5, vec![ActionDefinition::damage("Sting", 10)]),
        EnemyDefinition::new(
            "Hornet",
            30,
            vec![ActionDefinition::multi_hit("Flurry", 4, 5)],
        ),
        EnemyDefinition::new(
            "Toad",
            25,
            vec![
                ActionDefinition::block("Puff Up", 6),
                ActionDefinition::damage("Tongue", 3),
                ActionDefinition::buff("Croak", 2),
            ],
        )
        .with_selection(SelectionMode::FixedOnce),
    ];
    Arc::new(Catalog::new(cards, enemies).expect("test catalog should be valid"))
}

/// Seeded config whose hand size equals the deck size, so every starter card
/// is in hand on the first turn.
pub fn config() -> BattleConfig {
    BattleConfig::new()
        .with_seed(7)
        .with_hand_size(6)
        .with_starter_deck(vec![DeckEntry::new("Slash", 3), DeckEntry::new("Shield", 3)])
}

pub fn engine(config: BattleConfig) -> BattleEngine {
    BattleEngine::new(catalog(), config)
}

/// Ids of every card in hand named `name`, in hand order.
pub fn cards_named(engine: &BattleEngine, name: &str) -> Vec<CardInstanceId> {
    engine
        .hand()
        .iter()
        .filter(|card| card.name() == name)
        .map(|card| card.id)
        .collect()
}

/// First card in hand that deals damage.
pub fn any_attack(engine: &BattleEngine) -> CardInstanceId {
    engine
        .hand()
        .iter()
        .find(|card| card.definition.damage > 0)
        .map(|card| card.id)
        .expect("hand should contain an attack")
}

pub fn assert_conservation(engine: &BattleEngine) {
    engine
        .deck()
        .integrity_check()
        .expect("every card should be in exactly one pile");
}
