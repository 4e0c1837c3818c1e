//! Dirty-flag autosave. Saved state only changes on a handful of log events, so the
//! flag is raised from the drained log and flushed on an interval or on demand.

use std::time::Duration;

use battle_core::{EngineError, Game, LogEvent};
use tracing::debug;

use crate::save_file::{FileStore, SaveFileError};

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum AutosaveError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    File(#[from] SaveFileError),
}

#[derive(Clone, Debug)]
pub struct Autosave {
    interval: Duration,
    since_flush: Duration,
    dirty: bool,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

impl Autosave {
    pub fn new(interval: Duration) -> Self {
        Self { interval, since_flush: Duration::ZERO, dirty: false }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn observe(&mut self, events: &[LogEvent]) {
        if events.iter().any(touches_saved_state) {
            self.dirty = true;
        }
    }

    /// Advance the autosave timer; true once a dirty store is due for a flush.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.since_flush = self.since_flush.saturating_add(elapsed);
        self.dirty && self.since_flush >= self.interval
    }

    /// Write `game` into `store` and flush it to disk if anything changed since the last flush.
    pub fn flush(&mut self, game: &Game, store: &mut FileStore) -> Result<bool, AutosaveError> {
        if !self.dirty {
            return Ok(false);
        }
        game.save_to(store)?;
        store.flush(game.seed(), game.snapshot_hash())?;
        debug!(after = ?self.since_flush, "autosave flushed");
        self.dirty = false;
        self.since_flush = Duration::ZERO;
        Ok(true)
    }
}

/// Encounter HP, auto-battle and event cursors are not persisted. A tap still rolls for a
/// crit, so `DamageDealt` moves the saved stream position.
fn touches_saved_state(event: &LogEvent) -> bool {
    !matches!(
        event,
        LogEvent::EncounterLoaded { .. }
            | LogEvent::ScoreSubmitted { .. }
            | LogEvent::AutoBattleChanged { .. }
            | LogEvent::EventStarted { .. }
            | LogEvent::EventAdvanced { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ContentPack, CounterKind, EngineConfig, KeyValueStore};
    use tempfile::tempdir;

    #[test]
    fn presentation_events_do_not_dirty() {
        let mut autosave = Autosave::new(Duration::from_secs(1));
        autosave.observe(&[
            LogEvent::AutoBattleChanged { enabled: true },
            LogEvent::ScoreSubmitted { counter: CounterKind::Stage, value: 2 },
        ]);
        assert!(!autosave.is_dirty());
        assert!(!autosave.tick(Duration::from_secs(5)));
    }

    #[test]
    fn tap_damage_dirties_for_the_crit_roll() {
        let mut autosave = Autosave::new(Duration::from_secs(1));
        autosave.observe(&[LogEvent::DamageDealt { amount: 1, crit: false, remaining_hp: 4 }]);
        assert!(autosave.is_dirty());
    }

    #[test]
    fn counter_change_becomes_due_after_interval() {
        let mut autosave = Autosave::new(Duration::from_secs(10));
        autosave.observe(&[LogEvent::CounterChanged { counter: CounterKind::Kills, value: 1 }]);
        assert!(autosave.is_dirty());
        assert!(!autosave.tick(Duration::from_secs(4)));
        assert!(autosave.tick(Duration::from_secs(6)));
    }

    #[test]
    fn flush_writes_engine_keys_and_clears_flag() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("save.json")).unwrap();
        let mut game = Game::new(3, &ContentPack::default(), EngineConfig::default()).unwrap();
        game.complete_quest();

        let mut autosave = Autosave::new(Duration::from_secs(1));
        autosave.observe(&game.take_log());
        assert!(autosave.flush(&game, &mut store).unwrap());
        assert!(!autosave.is_dirty());
        assert!(store.get("counters").is_some());
        assert_eq!(store.seed(), Some(3));

        assert!(!autosave.flush(&game, &mut store).unwrap(), "clean flag skips the write");
    }
}
