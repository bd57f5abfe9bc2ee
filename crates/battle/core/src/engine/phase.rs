/// Turn state machine states.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// No battle has started yet.
    #[default]
    Idle,
    /// The player may play cards and end the turn.
    PlayerPhase,
    /// Opponents are resolving their pending actions.
    EnemyPhase,
    BattleWon,
    BattleLost,
}

impl BattlePhase {
    /// Returns true once the current battle is decided.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::BattleWon | Self::BattleLost)
    }

    /// Returns true if a new battle may be started from this phase.
    pub const fn can_start_battle(&self) -> bool {
        matches!(self, Self::Idle | Self::BattleWon | Self::BattleLost)
    }
}
