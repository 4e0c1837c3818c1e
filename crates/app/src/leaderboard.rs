//! Leaderboard submission. The engine only emits `ScoreSubmitted` log events; where
//! they go is up to the sink.

use std::collections::BTreeMap;

use battle_core::{CounterKind, LogEvent};
use tracing::info;

pub trait ScoreSink {
    fn submit(&mut self, counter: CounterKind, value: u64);
}

/// In-process board that keeps the best value seen per counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BestScores {
    best: BTreeMap<CounterKind, u64>,
    submissions: u64,
}

impl BestScores {
    pub fn best(&self, counter: CounterKind) -> Option<u64> {
        self.best.get(&counter).copied()
    }

    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

impl ScoreSink for BestScores {
    fn submit(&mut self, counter: CounterKind, value: u64) {
        self.submissions += 1;
        let best = self.best.entry(counter).or_insert(0);
        if value > *best {
            *best = value;
            info!(counter = counter.key(), value, "new best score");
        }
    }
}

/// Push every score submission in `events` to `sink`, returning how many were sent.
pub fn forward_scores(events: &[LogEvent], sink: &mut dyn ScoreSink) -> usize {
    let mut sent = 0;
    for event in events {
        if let LogEvent::ScoreSubmitted { counter, value } = event {
            sink.submit(*counter, *value);
            sent += 1;
        }
    }
    sent
}
