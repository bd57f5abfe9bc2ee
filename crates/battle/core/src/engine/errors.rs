//! Error types for engine commands.

use crate::catalog::CatalogError;
use crate::deck::DeckError;
use crate::error::{ErrorSeverity, GameError};
use crate::opponent::OpponentId;

use super::BattlePhase;

/// Errors surfaced by [`BattleEngine`](super::BattleEngine) commands.
///
/// A rejected command leaves the session unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("{command} is not accepted during {phase}")]
    InvalidPhase { command: String, phase: BattlePhase },

    #[error("card costs {required} energy but only {available} is available")]
    InsufficientEnergy { required: u32, available: u32 },

    /// The card needs a target and none of the living opponents matches.
    #[error("no living opponent matches target {requested:?}")]
    TargetNotFound { requested: Option<OpponentId> },

    #[error("cannot start a battle without opponents")]
    EmptyRoster,

    #[error("no run is in progress")]
    NoActiveRun,

    #[error("every encounter of the run has been completed")]
    RunComplete,

    #[error("no reward offer is pending")]
    NoRewardPending,

    #[error("card '{name}' is not part of the reward offer")]
    RewardNotOffered { name: String },

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            InsufficientEnergy { .. } | RunComplete => ErrorSeverity::Recoverable,
            InvalidPhase { .. }
            | TargetNotFound { .. }
            | EmptyRoster
            | NoActiveRun
            | NoRewardPending
            | RewardNotOffered { .. } => ErrorSeverity::Validation,
            Deck(error) => error.severity(),
            Catalog(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            InvalidPhase { .. } => "COMMAND_INVALID_PHASE",
            InsufficientEnergy { .. } => "COMMAND_INSUFFICIENT_ENERGY",
            TargetNotFound { .. } => "COMMAND_TARGET_NOT_FOUND",
            EmptyRoster => "COMMAND_EMPTY_ROSTER",
            NoActiveRun => "COMMAND_NO_ACTIVE_RUN",
            RunComplete => "COMMAND_RUN_COMPLETE",
            NoRewardPending => "COMMAND_NO_REWARD_PENDING",
            RewardNotOffered { .. } => "COMMAND_REWARD_NOT_OFFERED",
            Deck(error) => error.error_code(),
            Catalog(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_classification() {
        let error = CommandError::from(DeckError::CardNotInHand {
            card: crate::deck::CardInstanceId(4),
        });
        assert_eq!(error.error_code(), "DECK_CARD_NOT_IN_HAND");
        assert_eq!(error.severity(), ErrorSeverity::Internal);

        let error = CommandError::InvalidPhase {
            command: "play_card".into(),
            phase: BattlePhase::EnemyPhase,
        };
        assert_eq!(error.to_string(), "play_card is not accepted during enemy_phase");
        assert!(!error.severity().is_recoverable());
    }

    #[test]
    fn target_message_names_the_request() {
        assert_eq!(
            CommandError::TargetNotFound {
                requested: Some(OpponentId(2))
            }
            .to_string(),
            "no living opponent matches target Some(OpponentId(2))"
        );
        assert_eq!(
            CommandError::TargetNotFound { requested: None }.error_code(),
            "COMMAND_TARGET_NOT_FOUND"
        );
    }
}
