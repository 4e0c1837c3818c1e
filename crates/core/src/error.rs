//! Error types surfaced by the engine.
//! Ordinary game flow (defeat, level-up, threshold misses) never goes through these.

use crate::types::{ArtefactId, Currency, EventId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient {currency}: requested {requested}, available {available}")]
    InsufficientFunds { currency: Currency, requested: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    #[error("artefact {0} is not owned")]
    NotOwned(ArtefactId),

    #[error("artefact upgrade needs {needed} shards, {available} available")]
    InsufficientShards { needed: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Roster or artefact catalog is empty; no initial encounter can be established.
    #[error("missing baseline content: {what} is empty")]
    MissingBaselineContent { what: &'static str },

    /// Every catalog artefact must feed at least one bonus category.
    #[error("artefact {0} has no effect tags")]
    ArtefactWithoutEffects(ArtefactId),

    #[error("unknown event {0}")]
    UnknownEvent(EventId),

    #[error("event {0} has no encounters")]
    EmptyEvent(EventId),

    #[error("an event is already in progress")]
    EventAlreadyActive,

    #[error("no event victory is waiting for acknowledgement")]
    NoVictoryToAcknowledge,

    /// A tap arrived while the encounter was down or an event victory was pending.
    #[error("no living encounter to attack")]
    NoLiveEncounter,

    #[error("failed to save {key}: {message}")]
    Save { key: &'static str, message: String },

    #[error("failed to restore {key}: {message}")]
    Restore { key: &'static str, message: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Upgrade(#[from] UpgradeError),
}
