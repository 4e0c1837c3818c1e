use serde::{Deserialize, Serialize};

use crate::types::{ArtefactId, EventId};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub content_hash: u64,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

/// Every command that can mutate a run. Replaying the accepted ones in order from the same
/// seed, content and config reproduces the run exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPayload {
    Tap,
    SetAutoBattle { enabled: bool },
    AdvanceClock { millis: u64 },
    StartEvent { event: EventId },
    AcknowledgeVictory,
    BuyTapUpgrade,
    UpgradeArtefact { artefact: ArtefactId },
    CompleteQuest,
    Reset,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            content_hash: 0,
            seed,
            inputs: Vec::new(),
        }
    }

    pub fn with_content_hash(mut self, content_hash: u64) -> Self {
        self.content_hash = content_hash;
        self
    }

    /// Record an accepted input under the next sequence number.
    pub fn append(&mut self, payload: InputPayload) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
        seq
    }
}
