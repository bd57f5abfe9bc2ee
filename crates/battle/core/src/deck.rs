//! The four-pile card economy.
//!
//! `library` is the master list of every card instance the player owns in the
//! current battle. Each instance sits in exactly one of `draw_pile`, `hand` or
//! `discard_pile`:
//!
//! ```text
//! |library| == |draw_pile| + |hand| + |discard_pile|
//! ```
//!
//! Every operation below preserves that equality. Instances are identified by
//! [`CardInstanceId`], so two copies of the same card are never confused.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::catalog::{CardDefinition, Catalog, CatalogError};
use crate::config::DeckEntry;
use crate::error::{ErrorSeverity, GameError};
use crate::rng::BattleRng;

/// Session-unique identifier of one physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstanceId(pub u32);

impl fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One card in the player's deck: an id plus its shared template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub definition: Arc<CardDefinition>,
}

impl CardInstance {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// A card moved into the hand by [`DeckState::draw_one`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: CardInstance,
    /// True when the discard pile had to be shuffled back in first.
    pub reshuffled: bool,
}

/// Errors raised by pile operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Both the draw pile and the discard pile are empty.
    #[error("no cards available to draw")]
    NoCardsAvailable,

    #[error("card {card} is not in hand")]
    CardNotInHand { card: CardInstanceId },

    /// The pile sizes or contents no longer match the library.
    #[error("deck integrity violated: {reason}")]
    Integrity { reason: String },
}

impl GameError for DeckError {
    fn severity(&self) -> ErrorSeverity {
        use DeckError::*;
        match self {
            Catalog(error) => error.severity(),
            NoCardsAvailable => ErrorSeverity::Recoverable,
            CardNotInHand { .. } => ErrorSeverity::Internal,
            Integrity { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use DeckError::*;
        match self {
            Catalog(error) => error.error_code(),
            NoCardsAvailable => "DECK_NO_CARDS_AVAILABLE",
            CardNotInHand { .. } => "DECK_CARD_NOT_IN_HAND",
            Integrity { .. } => "DECK_INTEGRITY",
        }
    }
}

/// Library, draw pile, hand and discard pile of the player.
#[derive(Clone, Debug, Default)]
pub struct DeckState {
    library: Vec<CardInstance>,
    draw_pile: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard_pile: Vec<CardInstance>,
    next_id: u32,
}

impl DeckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the library from `composition` and copies it into the draw pile.
    ///
    /// Every name is resolved before anything is touched, so an unknown card
    /// leaves the previous deck intact. The draw pile is not shuffled.
    pub fn initialize(
        &mut self,
        catalog: &Catalog,
        composition: &[DeckEntry],
    ) -> Result<(), DeckError> {
        let resolved = composition
            .iter()
            .map(|entry| {
                catalog
                    .card(&entry.card)
                    .map(|definition| (Arc::clone(definition), entry.copies))
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| tracing::warn!(%error, "deck initialization aborted"))?;

        self.library.clear();
        self.draw_pile.clear();
        self.hand.clear();
        self.discard_pile.clear();

        for (definition, copies) in resolved {
            for _ in 0..copies {
                let card = self.mint(Arc::clone(&definition));
                self.library.push(card);
            }
        }
        self.draw_pile = self.library.clone();

        tracing::debug!(cards = self.library.len(), "deck initialized");
        Ok(())
    }

    /// Fisher–Yates shuffle of the draw pile, walking from the last index down.
    pub fn shuffle(&mut self, rng: &mut BattleRng) {
        for i in (1..self.draw_pile.len()).rev() {
            let j = rng.index_inclusive(i);
            self.draw_pile.swap(i, j);
        }
        tracing::trace!(cards = self.draw_pile.len(), "draw pile shuffled");
    }

    /// Moves the whole discard pile into the draw pile and shuffles it.
    pub fn reshuffle(&mut self, rng: &mut BattleRng) {
        self.draw_pile.append(&mut self.discard_pile);
        self.shuffle(rng);
        tracing::debug!(cards = self.draw_pile.len(), "discard pile reshuffled into draw pile");
    }

    /// Draws the top card into the hand, reshuffling the discard pile if needed.
    pub fn draw_one(&mut self, rng: &mut BattleRng) -> Result<DrawnCard, DeckError> {
        let mut reshuffled = false;
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(DeckError::NoCardsAvailable);
            }
            self.reshuffle(rng);
            reshuffled = true;
        }

        let card = self.draw_pile.remove(0);
        tracing::trace!(card = %card.id, name = card.name(), "card drawn");
        self.hand.push(card.clone());
        Ok(DrawnCard { card, reshuffled })
    }

    /// Draws up to `count` cards, stopping quietly when nothing is left.
    pub fn draw_many(&mut self, count: u32, rng: &mut BattleRng) -> Vec<DrawnCard> {
        let mut drawn = Vec::new();
        for _ in 0..count {
            match self.draw_one(rng) {
                Ok(card) => drawn.push(card),
                Err(_) => {
                    tracing::debug!(
                        requested = count,
                        drawn = drawn.len(),
                        "no cards left to draw"
                    );
                    break;
                }
            }
        }
        drawn
    }

    /// Moves one instance from the hand to the discard pile.
    pub fn discard(&mut self, card: CardInstanceId) -> Result<CardInstance, DeckError> {
        let position = self
            .hand
            .iter()
            .position(|instance| instance.id == card)
            .ok_or(DeckError::CardNotInHand { card })?;

        let instance = self.hand.remove(position);
        self.discard_pile.push(instance.clone());
        Ok(instance)
    }

    /// Puts an instance back into the hand if it is owned but in no pile.
    ///
    /// Idempotent: returns false and does nothing when the card is already
    /// tracked in any pile or does not belong to the library.
    pub fn return_to_hand(&mut self, card: CardInstanceId) -> bool {
        let tracked = |pile: &[CardInstance]| pile.iter().any(|instance| instance.id == card);
        if tracked(&self.hand) || tracked(&self.draw_pile) || tracked(&self.discard_pile) {
            return false;
        }

        match self.library.iter().find(|instance| instance.id == card) {
            Some(instance) => {
                self.hand.push(instance.clone());
                true
            }
            None => false,
        }
    }

    /// Moves every card left in hand to the discard pile, in hand order.
    pub fn discard_hand(&mut self) -> Vec<CardInstance> {
        let discarded: Vec<CardInstance> = self.hand.drain(..).collect();
        self.discard_pile.extend(discarded.iter().cloned());
        discarded
    }

    /// Adds a new instance of `definition` to the library.
    ///
    /// With `shuffle_into_draw` the card joins the draw pile, which is then
    /// reshuffled. Otherwise it is placed on the discard pile and rejoins the
    /// draw pile at the next reshuffle or consolidation.
    pub fn add_card(
        &mut self,
        definition: Arc<CardDefinition>,
        shuffle_into_draw: bool,
        rng: &mut BattleRng,
    ) -> CardInstance {
        let card = self.mint(definition);
        self.library.push(card.clone());

        if shuffle_into_draw {
            self.draw_pile.push(card.clone());
            self.shuffle(rng);
        } else {
            self.discard_pile.push(card.clone());
        }

        tracing::debug!(card = %card.id, name = card.name(), shuffle_into_draw, "card added to deck");
        card
    }

    /// Moves the hand and discard pile back into the draw pile.
    ///
    /// The library is unchanged. The draw pile is not shuffled.
    pub fn reset_for_next_battle(&mut self) {
        self.draw_pile.append(&mut self.hand);
        self.draw_pile.append(&mut self.discard_pile);
        tracing::debug!(cards = self.draw_pile.len(), "piles consolidated for next battle");
    }

    /// Checks that every library instance sits in exactly one pile.
    pub fn integrity_check(&self) -> Result<(), DeckError> {
        let in_piles = self.draw_pile.len() + self.hand.len() + self.discard_pile.len();
        if in_piles != self.library.len() {
            return Err(DeckError::Integrity {
                reason: format!(
                    "library has {} cards but piles hold {}",
                    self.library.len(),
                    in_piles
                ),
            });
        }

        let mut seen: BTreeMap<CardInstanceId, u32> = BTreeMap::new();
        for card in self
            .draw_pile
            .iter()
            .chain(&self.hand)
            .chain(&self.discard_pile)
        {
            *seen.entry(card.id).or_default() += 1;
        }

        for card in &self.library {
            match seen.remove(&card.id) {
                Some(1) => {}
                Some(count) => {
                    return Err(DeckError::Integrity {
                        reason: format!("card {} appears {} times", card.id, count),
                    });
                }
                None => {
                    return Err(DeckError::Integrity {
                        reason: format!("card {} is in no pile", card.id),
                    });
                }
            }
        }

        if let Some(stray) = seen.keys().next() {
            return Err(DeckError::Integrity {
                reason: format!("card {stray} is not in the library"),
            });
        }
        Ok(())
    }

    pub fn library(&self) -> &[CardInstance] {
        &self.library
    }

    /// Draw pile, top card first.
    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw_pile
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard_pile
    }

    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn hand_card(&self, card: CardInstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|instance| instance.id == card)
    }

    fn mint(&mut self, definition: Arc<CardDefinition>) -> CardInstance {
        let id = CardInstanceId(self.next_id);
        self.next_id += 1;
        CardInstance { id, definition }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardCategory, EnemyDefinition};

    fn catalog() -> Catalog {
        Catalog::new(
            [
                CardDefinition::new("Slash", CardCategory::Attack, 1).with_damage(6),
                CardDefinition::new("Shield", CardCategory::Skill, 1).with_block(5),
                CardDefinition::new("Cleave", CardCategory::Attack, 2).with_damage(11),
            ],
            Vec::<EnemyDefinition>::new(),
        )
        .unwrap()
    }

    fn starter_deck() -> DeckState {
        let mut deck = DeckState::new();
        deck.initialize(
            &catalog(),
            &[DeckEntry::new("Slash", 3), DeckEntry::new("Shield", 3)],
        )
        .unwrap();
        deck
    }

    #[test]
    fn initialize_fills_library_and_draw_pile() {
        let deck = starter_deck();
        assert_eq!(deck.library().len(), 6);
        assert_eq!(deck.draw_count(), 6);
        assert!(deck.hand().is_empty());
        assert_eq!(deck.discard_count(), 0);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn unknown_card_leaves_existing_deck_untouched() {
        let mut deck = starter_deck();
        let result = deck.initialize(
            &catalog(),
            &[DeckEntry::new("Slash", 1), DeckEntry::new("Fireball", 2)],
        );

        assert_eq!(
            result,
            Err(DeckError::Catalog(CatalogError::UnknownCard {
                name: "Fireball".into()
            }))
        );
        assert_eq!(deck.library().len(), 6);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = starter_deck();
        let mut before: Vec<_> = deck.draw_pile().iter().map(|c| c.id).collect();
        deck.shuffle(&mut BattleRng::new(5));
        let mut after: Vec<_> = deck.draw_pile().iter().map(|c| c.id).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut deck = starter_deck();
        let top = deck.draw_pile()[0].id;
        let drawn = deck.draw_one(&mut BattleRng::new(1)).unwrap();
        assert_eq!(drawn.card.id, top);
        assert!(!drawn.reshuffled);
        assert_eq!(deck.hand().len(), 1);
        assert_eq!(deck.draw_count(), 5);
    }

    #[test]
    fn empty_draw_pile_reshuffles_discard() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(9);
        assert_eq!(deck.draw_many(6, &mut rng).len(), 6);
        deck.discard_hand();
        assert_eq!(deck.draw_count(), 0);
        assert_eq!(deck.discard_count(), 6);

        let drawn = deck.draw_one(&mut rng).unwrap();
        assert!(drawn.reshuffled);
        assert_eq!(deck.draw_count(), 5);
        assert_eq!(deck.discard_count(), 0);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn draw_with_nothing_anywhere_fails_without_change() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(2);
        deck.draw_many(6, &mut rng);

        let hand_before: Vec<_> = deck.hand().iter().map(|c| c.id).collect();
        assert_eq!(deck.draw_one(&mut rng), Err(DeckError::NoCardsAvailable));
        let hand_after: Vec<_> = deck.hand().iter().map(|c| c.id).collect();
        assert_eq!(hand_before, hand_after);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn draw_many_stops_early() {
        let mut deck = starter_deck();
        let drawn = deck.draw_many(10, &mut BattleRng::new(4));
        assert_eq!(drawn.len(), 6);
        assert_eq!(deck.hand().len(), 6);
    }

    #[test]
    fn discard_moves_exactly_one_instance() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(3);
        deck.draw_many(2, &mut rng);
        let target = deck.hand()[1].id;

        let discarded = deck.discard(target).unwrap();
        assert_eq!(discarded.id, target);
        assert_eq!(deck.hand().len(), 1);
        assert_eq!(deck.discard_pile()[0].id, target);

        assert_eq!(
            deck.discard(target),
            Err(DeckError::CardNotInHand { card: target })
        );
        deck.integrity_check().unwrap();
    }

    #[test]
    fn return_to_hand_never_duplicates() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(8);
        deck.draw_many(1, &mut rng);
        let in_hand = deck.hand()[0].id;
        let in_draw = deck.draw_pile()[0].id;

        assert!(!deck.return_to_hand(in_hand));
        assert!(!deck.return_to_hand(in_draw));
        assert!(!deck.return_to_hand(CardInstanceId(999)));
        assert_eq!(deck.hand().len(), 1);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn return_to_hand_restores_a_card_in_flight() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(8);
        deck.draw_many(1, &mut rng);
        let card = deck.hand.pop().unwrap();
        assert!(deck.integrity_check().is_err());

        assert!(deck.return_to_hand(card.id));
        assert!(!deck.return_to_hand(card.id));
        deck.integrity_check().unwrap();
    }

    #[test]
    fn add_card_keeps_conservation_either_way() {
        let catalog = catalog();
        let cleave = Arc::clone(catalog.card("Cleave").unwrap());
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(6);

        let shuffled = deck.add_card(Arc::clone(&cleave), true, &mut rng);
        assert!(deck.draw_pile().iter().any(|c| c.id == shuffled.id));

        let parked = deck.add_card(cleave, false, &mut rng);
        assert!(deck.discard_pile().iter().any(|c| c.id == parked.id));

        assert_eq!(deck.library().len(), 8);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn reset_for_next_battle_consolidates_piles() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(12);
        deck.draw_many(4, &mut rng);
        let first = deck.hand()[0].id;
        deck.discard(first).unwrap();

        deck.reset_for_next_battle();
        assert_eq!(deck.draw_count(), 6);
        assert!(deck.hand().is_empty());
        assert_eq!(deck.discard_count(), 0);
        deck.integrity_check().unwrap();
    }

    #[test]
    fn conservation_holds_through_random_operations() {
        let mut deck = starter_deck();
        let mut rng = BattleRng::new(2024);

        for step in 0..500 {
            match rng.index(4) {
                0 => {
                    let _ = deck.draw_one(&mut rng);
                }
                1 => {
                    if !deck.hand().is_empty() {
                        let pick = deck.hand()[rng.index(deck.hand().len())].id;
                        deck.discard(pick).unwrap();
                    }
                }
                2 => {
                    deck.discard_hand();
                }
                _ => {
                    deck.draw_many(3, &mut rng);
                }
            }
            assert!(
                deck.integrity_check().is_ok(),
                "conservation broken at step {step}"
            );
        }
    }
}
