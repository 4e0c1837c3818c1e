use crate::config::EngineConfig;
use crate::content::ContentPack;
use crate::error::EngineError;
use crate::game::Game;
use crate::journal::InputJournal;
use crate::types::{BattleMode, LogEvent};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ReplayError {
    #[error("journal was recorded against content {expected:#018x}, loaded content is {found:#018x}")]
    ContentMismatch { expected: u64, found: u64 },

    #[error("journal record {seq} was rejected: {source}")]
    RejectedInput {
        seq: u64,
        #[source]
        source: EngineError,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_mode: BattleMode,
    pub inputs_applied: u64,
    pub stage: u64,
    pub coins: u64,
    pub log: Vec<LogEvent>,
}

/// Rebuild the live game a journal describes, for resuming a crashed session.
/// A zero `content_hash` skips the content check.
pub fn replay_journal_inputs(
    content: &ContentPack,
    config: &EngineConfig,
    journal: &InputJournal,
) -> Result<Game, ReplayError> {
    if journal.content_hash != 0 {
        let found = content.content_hash();
        if found != journal.content_hash {
            return Err(ReplayError::ContentMismatch { expected: journal.content_hash, found });
        }
    }

    let mut game = Game::new(journal.seed, content, config.clone())?;
    for record in &journal.inputs {
        game.apply_input(&record.payload)
            .map_err(|source| ReplayError::RejectedInput { seq: record.seq, source })?;
    }
    Ok(game)
}

pub fn replay_to_end(
    content: &ContentPack,
    config: &EngineConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let mut game = replay_journal_inputs(content, config, journal)?;
    Ok(ReplayResult {
        final_snapshot_hash: game.snapshot_hash(),
        final_mode: game.mode().clone(),
        inputs_applied: game.inputs_applied(),
        stage: game.counters().stage,
        coins: game.ledger().coins(),
        log: game.take_log(),
    })
}
