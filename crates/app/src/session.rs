//! Serialized command queue in front of one engine.
//! This module exists so UI commands and clock ticks reach the engine one at a time, in
//! arrival order. It does not own the journal file; accepted inputs are handed back to
//! the caller for recording.

use std::collections::VecDeque;
use std::mem;
use std::time::Duration;

use battle_core::{EngineError, Game, InputPayload, LogEvent};
use tracing::warn;

use crate::autosave::{Autosave, AutosaveError};
use crate::leaderboard::{ScoreSink, forward_scores};
use crate::save_file::FileStore;

#[derive(Debug, Default)]
pub struct DrainReport {
    pub applied: usize,
    pub rejected: Vec<(InputPayload, EngineError)>,
    pub events: Vec<LogEvent>,
}

pub struct Session<S: ScoreSink> {
    game: Game,
    queue: VecDeque<InputPayload>,
    /// Accepted since the last `take_accepted_inputs`, in application order.
    accepted_inputs: Vec<InputPayload>,
    autosave: Autosave,
    scores: S,
}

impl<S: ScoreSink> Session<S> {
    pub fn new(mut game: Game, scores: S, autosave: Autosave) -> Self {
        // Construction and restore events describe state already on disk.
        game.take_log();
        Self { game, queue: VecDeque::new(), accepted_inputs: Vec::new(), autosave, scores }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn enqueue(&mut self, payload: InputPayload) {
        self.queue.push_back(payload);
    }

    pub fn enqueue_all(&mut self, payloads: impl IntoIterator<Item = InputPayload>) {
        self.queue.extend(payloads);
    }

    /// Queue a clock tick. Sub-millisecond remainders are dropped.
    pub fn enqueue_tick(&mut self, elapsed: Duration) {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if millis > 0 {
            self.queue.push_back(InputPayload::AdvanceClock { millis });
        }
    }

    /// Apply every queued command in order.
    pub fn drain(&mut self) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(payload) = self.queue.pop_front() {
            match self.game.apply_input(&payload) {
                Ok(()) => {
                    report.applied += 1;
                    self.accepted_inputs.push(payload);
                }
                Err(err) => {
                    warn!(?payload, %err, "input rejected");
                    report.rejected.push((payload, err));
                }
            }
            let events = self.game.take_log();
            forward_scores(&events, &mut self.scores);
            self.autosave.observe(&events);
            report.events.extend(events);
        }
        report
    }

    pub fn take_accepted_inputs(&mut self) -> Vec<InputPayload> {
        mem::take(&mut self.accepted_inputs)
    }

    pub fn is_dirty(&self) -> bool {
        self.autosave.is_dirty()
    }

    pub fn flush_if_due(&mut self, elapsed: Duration, store: &mut FileStore) -> Result<bool, AutosaveError> {
        if self.autosave.tick(elapsed) { self.autosave.flush(&self.game, store) } else { Ok(false) }
    }

    pub fn flush_now(&mut self, store: &mut FileStore) -> Result<bool, AutosaveError> {
        self.autosave.flush(&self.game, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::BestScores;
    use battle_core::{ContentPack, CounterKind, EngineConfig, EventId};

    fn session(seed: u64) -> Session<BestScores> {
        let game = Game::new(seed, &ContentPack::default(), EngineConfig::default()).unwrap();
        Session::new(game, BestScores::default(), Autosave::default())
    }

    #[test]
    fn commands_apply_in_arrival_order() {
        let mut session = session(1);
        session.enqueue(InputPayload::AcknowledgeVictory);
        session.enqueue(InputPayload::CompleteQuest);
        assert_eq!(session.pending(), 2);

        let report = session.drain();
        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].1, EngineError::NoVictoryToAcknowledge);
        assert_eq!(session.take_accepted_inputs(), vec![InputPayload::CompleteQuest]);
        assert!(session.take_accepted_inputs().is_empty());
        assert_eq!(session.pending(), 0);
    }

    #[test]
    fn zero_length_tick_is_not_queued() {
        let mut session = session(1);
        session.enqueue_tick(Duration::from_micros(400));
        assert_eq!(session.pending(), 0);
    }

    #[test]
    fn stage_advance_reaches_the_score_sink() {
        let mut session = session(2);
        let stage_before = session.game().counters().stage;
        for _ in 0..200 {
            session.enqueue(InputPayload::Tap);
            session.drain();
            if session.game().counters().stage > stage_before {
                break;
            }
        }
        assert_eq!(session.scores().best(CounterKind::Stage), Some(stage_before + 1));
        assert!(session.is_dirty());
    }

    #[test]
    fn event_progress_submits_no_scores() {
        let mut session = session(3);
        session.enqueue(InputPayload::StartEvent { event: EventId::from("harvest_moon") });
        session.enqueue_all(vec![InputPayload::Tap; 50]);
        let report = session.drain();
        assert!(report.rejected.is_empty());
        assert!(!report.events.iter().any(|event| matches!(event, LogEvent::ScoreSubmitted { .. })));
        assert_eq!(session.scores().submissions(), 0);
    }
}
