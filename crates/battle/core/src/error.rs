//! Common error infrastructure for battle-core.
//!
//! Domain errors (`CatalogError`, `DeckError`, `CommandError`) live next to the
//! component they validate. This module provides the shared classification used
//! by all of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: each component has its own error enum with specific variants
//! - **Local Recovery**: every error is reported to the caller; none aborts the session
//! - **Severity Classification**: errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: expected gameplay outcome, the session continues unchanged
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: caller bug or state inconsistency that requires investigation
/// - **Fatal**: setup could not complete, the triggering step was aborted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error, e.g. not enough energy or nothing left to draw.
    Recoverable,

    /// Validation error, e.g. a command issued in the wrong phase.
    Validation,

    /// Internal error, e.g. discarding a card that is not in hand.
    Internal,

    /// Fatal error, e.g. a deck composition naming an unknown card.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable `SCREAMING_SNAKE` code per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
