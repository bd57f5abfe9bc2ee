/// Pacing of the opponent phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnemyPhaseMode {
    /// `request_end_turn` resolves every opponent before returning.
    #[default]
    Immediate,
    /// `request_end_turn` only enters the enemy phase; the caller drives
    /// `resolve_next_enemy_action` once per opponent.
    Stepped,
}

/// One line of a deck composition: a card name and how many copies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckEntry {
    pub card: String,
    pub copies: u32,
}

impl DeckEntry {
    pub fn new(card: impl Into<String>, copies: u32) -> Self {
        Self {
            card: card.into(),
            copies,
        }
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Energy restored at the start of every player phase.
    pub max_energy: u32,
    /// Cards drawn at the start of every player phase.
    pub hand_size: u32,
    /// Player health at the start of a run.
    pub player_max_health: u32,
    /// Number of cards offered after a victory.
    pub reward_options: u32,
    /// Copies of each starter card when `starter_deck` is empty.
    pub starter_copies: u32,
    /// Explicit starting deck. Empty means "every starter card".
    pub starter_deck: Vec<DeckEntry>,
    pub enemy_phase: EnemyPhaseMode,
    /// Seed for the session RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ENERGY: u32 = 3;
    pub const DEFAULT_HAND_SIZE: u32 = 5;
    pub const DEFAULT_PLAYER_MAX_HEALTH: u32 = 75;
    pub const DEFAULT_REWARD_OPTIONS: u32 = 3;
    pub const DEFAULT_STARTER_COPIES: u32 = 6;

    pub fn new() -> Self {
        Self {
            max_energy: Self::DEFAULT_MAX_ENERGY,
            hand_size: Self::DEFAULT_HAND_SIZE,
            player_max_health: Self::DEFAULT_PLAYER_MAX_HEALTH,
            reward_options: Self::DEFAULT_REWARD_OPTIONS,
            starter_copies: Self::DEFAULT_STARTER_COPIES,
            starter_deck: Vec::new(),
            enemy_phase: EnemyPhaseMode::Immediate,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_starter_deck(mut self, deck: Vec<DeckEntry>) -> Self {
        self.starter_deck = deck;
        self
    }

    #[must_use]
    pub fn with_enemy_phase(mut self, mode: EnemyPhaseMode) -> Self {
        self.enemy_phase = mode;
        self
    }

    #[must_use]
    pub fn with_max_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = max_energy;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: u32) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_player_max_health(mut self, health: u32) -> Self {
        self.player_max_health = health;
        self
    }

    #[must_use]
    pub fn with_reward_options(mut self, count: u32) -> Self {
        self.reward_options = count;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
