//! Journaled command dispatch.
//! This module exists to give replay and live sessions one entry point for every command.
//! It does not own journaling; callers record a payload only after it was accepted.

use std::time::Duration;

use super::*;
use crate::journal::InputPayload;

impl Game {
    /// Apply one command. Rejected commands leave the run untouched and are not counted.
    pub fn apply_input(&mut self, payload: &InputPayload) -> Result<(), EngineError> {
        match payload {
            InputPayload::Tap => {
                self.tap_attack().ok_or(EngineError::NoLiveEncounter)?;
            }
            InputPayload::SetAutoBattle { enabled } => self.set_auto_battle(*enabled),
            InputPayload::AdvanceClock { millis } => {
                self.advance_clock(Duration::from_millis(*millis));
            }
            InputPayload::StartEvent { event } => self.start_event(event)?,
            InputPayload::AcknowledgeVictory => self.acknowledge_victory()?,
            InputPayload::BuyTapUpgrade => {
                self.buy_tap_upgrade()?;
            }
            InputPayload::UpgradeArtefact { artefact } => {
                self.upgrade_artefact(artefact)?;
            }
            InputPayload::CompleteQuest => self.complete_quest(),
            InputPayload::Reset => self.reset(),
        }
        self.inputs_applied += 1;
        Ok(())
    }
}
