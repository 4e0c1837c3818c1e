//! One-shot threshold rewards.
//!
//! A threshold pays out the first time its counter is observed at exactly that value.
//! Paid `(counter, threshold)` pairs are remembered forever, so lowering a counter and
//! climbing back never pays twice unless the granted set itself is cleared.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::ThresholdTable;
use crate::reward::RewardResolver;
use crate::types::{CounterKind, RewardReceipt};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedSet {
    granted: BTreeSet<(CounterKind, u64)>,
}

impl GrantedSet {
    pub fn contains(&self, counter: CounterKind, threshold: u64) -> bool {
        self.granted.contains(&(counter, threshold))
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterKind, u64)> + '_ {
        self.granted.iter().copied()
    }

    fn insert(&mut self, counter: CounterKind, threshold: u64) {
        self.granted.insert((counter, threshold));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub counter: CounterKind,
    pub threshold: u64,
    pub receipt: RewardReceipt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievementService {
    granted: GrantedSet,
}

impl AchievementService {
    pub fn new(granted: GrantedSet) -> Self {
        Self { granted }
    }

    pub fn granted(&self) -> &GrantedSet {
        &self.granted
    }

    /// Point check at exactly `value`. The reward is applied before the pair is recorded.
    pub fn check_and_grant(
        &mut self,
        counter: CounterKind,
        value: u64,
        table: &ThresholdTable,
        resolver: &mut RewardResolver<'_>,
    ) -> Option<Grant> {
        let reward = table.get(&value)?;
        if self.granted.contains(counter, value) {
            return None;
        }
        let receipt = resolver.apply(reward);
        self.granted.insert(counter, value);
        debug!(counter = counter.key(), threshold = value, "threshold reward granted");
        Some(Grant { counter, threshold: value, receipt })
    }

    /// Visit every value in `(previous, current]` for counters that moved by more than one.
    /// Values without a table entry are skipped without changing the outcome.
    pub fn check_crossed(
        &mut self,
        counter: CounterKind,
        previous: u64,
        current: u64,
        table: &ThresholdTable,
        resolver: &mut RewardResolver<'_>,
    ) -> Vec<Grant> {
        if current <= previous {
            return Vec::new();
        }
        let thresholds: Vec<u64> = table.range(previous + 1..=current).map(|(t, _)| *t).collect();
        thresholds
            .into_iter()
            .filter_map(|value| self.check_and_grant(counter, value, table, resolver))
            .collect()
    }

    pub fn reset(&mut self) {
        self.granted = GrantedSet::default();
    }
}
