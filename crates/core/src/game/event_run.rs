//! Event entry and victory acknowledgement.
//! This module exists to move between the roster loop and a finite boss sequence.
//! It does not own per-defeat event advancement; the defeat pipeline does that.

use tracing::info;

use super::*;

impl Game {
    /// Enter an event at cursor 0. The roster position is kept for the return trip.
    pub fn start_event(&mut self, event: &EventId) -> Result<(), EngineError> {
        if self.mode.is_event() {
            return Err(EngineError::EventAlreadyActive);
        }
        let definition = self.content.event(event).ok_or_else(|| EngineError::UnknownEvent(event.clone()))?;
        let first = definition
            .encounters
            .first()
            .map(|spec| spec.resolve(0))
            .ok_or_else(|| EngineError::EmptyEvent(event.clone()))?;

        info!(event = %event, "event started");
        self.mode = BattleMode::EventActive { event: event.clone(), cursor: 0 };
        self.log.push(LogEvent::EventStarted { event: event.clone() });
        self.load_encounter(first);
        Ok(())
    }

    /// Leave `EventWon` and resume the roster at the saved position.
    pub fn acknowledge_victory(&mut self) -> Result<(), EngineError> {
        let BattleMode::EventWon { event } = &self.mode else {
            return Err(EngineError::NoVictoryToAcknowledge);
        };
        let event = event.clone();
        self.mode = BattleMode::Normal;
        self.log.push(LogEvent::EventAcknowledged { event });
        self.load_roster_encounter();
        Ok(())
    }
}
