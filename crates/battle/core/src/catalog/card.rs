//! Card templates.

/// Category of a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardCategory {
    Attack,
    Skill,
}

/// Immutable card template owned by the [`Catalog`](super::Catalog).
///
/// Every effect value is non-negative; an effect with value 0 is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub name: String,
    pub category: CardCategory,
    /// Energy spent to play the card.
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: u32,
    /// Health lost by the player, ignoring block.
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_damage: u32,
    /// Cards drawn on play.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_draw: u32,
    /// Energy gained on play. May push energy above the pool maximum.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overcharge: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_starter_card: bool,
    /// Text with `{damage}`, `{block}`, `{heal}`, `{selfDamage}`,
    /// `{cardDraw}`, `{overcharge}` and `{cost}` placeholders.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description_template: String,
}

impl CardDefinition {
    /// Creates a card with no effects; use the `with_*` builders to add them.
    pub fn new(name: impl Into<String>, category: CardCategory, cost: u32) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
            damage: 0,
            block: 0,
            heal: 0,
            self_damage: 0,
            card_draw: 0,
            overcharge: 0,
            is_starter_card: false,
            description_template: String::new(),
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: u32) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_heal(mut self, heal: u32) -> Self {
        self.heal = heal;
        self
    }

    #[must_use]
    pub fn with_self_damage(mut self, self_damage: u32) -> Self {
        self.self_damage = self_damage;
        self
    }

    #[must_use]
    pub fn with_card_draw(mut self, card_draw: u32) -> Self {
        self.card_draw = card_draw;
        self
    }

    #[must_use]
    pub fn with_overcharge(mut self, overcharge: u32) -> Self {
        self.overcharge = overcharge;
        self
    }

    #[must_use]
    pub fn starter(mut self) -> Self {
        self.is_starter_card = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, template: impl Into<String>) -> Self {
        self.description_template = template.into();
        self
    }

    /// Returns true if playing this card needs an opponent to target.
    pub fn needs_target(&self) -> bool {
        self.damage > 0
    }

    /// Renders the description template with this card's values.
    pub fn describe(&self) -> String {
        self.description_template
            .replace("{damage}", &self.damage.to_string())
            .replace("{block}", &self.block.to_string())
            .replace("{heal}", &self.heal.to_string())
            .replace("{selfDamage}", &self.self_damage.to_string())
            .replace("{cardDraw}", &self.card_draw.to_string())
            .replace("{overcharge}", &self.overcharge.to_string())
            .replace("{cost}", &self.cost.to_string())
    }
}
