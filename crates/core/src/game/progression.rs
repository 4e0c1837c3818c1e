//! Reward payout, counters and threshold checks.
//! This module exists to route every credit through one path so notifications, counter bumps
//! and HP recomputation stay in step. It does not own the reward tables themselves.

use tracing::debug;

use super::*;
use crate::achievements::Grant;
use crate::reward::{Reward, RewardResolver};

impl Game {
    /// Pay an encounter's reward with the coin and exp bonuses added to the fields it defines.
    pub(super) fn grant_encounter_reward(&mut self, reward: EncounterReward) -> RewardReceipt {
        let bonuses = self.bonuses();
        let mut parts = Vec::new();
        if let Some(coins) = reward.coins {
            parts.push(Reward::Coins(coins.saturating_add(bonuses.coin_gain)));
        }
        if let Some(crystals) = reward.crystals {
            parts.push(Reward::Crystals(crystals));
        }
        if let Some(exp) = reward.exp {
            parts.push(Reward::Exp(exp.saturating_add(bonuses.exp_bonus)));
        }
        self.grant_reward(&Reward::Combine(parts))
    }

    pub(super) fn grant_reward(&mut self, reward: &Reward) -> RewardReceipt {
        let receipt = RewardResolver {
            ledger: &mut self.ledger,
            inventory: &mut self.inventory,
            catalog: &self.content.catalog,
        }
        .apply(reward);
        self.after_reward(&receipt);
        receipt
    }

    /// Notifications and knock-on effects for credits that already landed.
    fn after_reward(&mut self, receipt: &RewardReceipt) {
        if receipt.levels_gained > 0 {
            self.log.push(LogEvent::LevelUp { level: self.ledger.level() });
        }
        if receipt.coins > 0 || receipt.crystals > 0 || receipt.exp > 0 {
            self.emit_balances();
        }
        if receipt.artefacts.is_empty() {
            return;
        }
        for id in &receipt.artefacts {
            let level = self.inventory.get(id).map_or(1, |owned| owned.level);
            self.log.push(LogEvent::ArtefactAcquired { artefact: id.clone(), level });
        }
        self.refresh_max_hp();
        self.bump_counter(CounterKind::Artefacts, receipt.artefacts.len() as u64);
    }

    /// Raise a counter and check every threshold it passed on the way.
    pub(super) fn bump_counter(&mut self, counter: CounterKind, by: u64) {
        if by == 0 {
            return;
        }
        let slot = self.counters.slot_mut(counter);
        let previous = *slot;
        *slot = previous.saturating_add(by);
        let current = *slot;
        self.log.push(LogEvent::CounterChanged { counter, value: current });

        let Some(table) = self.thresholds.get(&counter) else {
            return;
        };
        let mut resolver = RewardResolver {
            ledger: &mut self.ledger,
            inventory: &mut self.inventory,
            catalog: &self.content.catalog,
        };
        let grants = self.achievements.check_crossed(counter, previous, current, table, &mut resolver);
        for grant in grants {
            self.after_grant(grant);
        }
    }

    /// Point check at the counter's current value.
    pub(super) fn check_counter(&mut self, counter: CounterKind) {
        let value = self.counters.get(counter);
        let Some(table) = self.thresholds.get(&counter) else {
            return;
        };
        let mut resolver = RewardResolver {
            ledger: &mut self.ledger,
            inventory: &mut self.inventory,
            catalog: &self.content.catalog,
        };
        if let Some(grant) = self.achievements.check_and_grant(counter, value, table, &mut resolver) {
            self.after_grant(grant);
        }
    }

    fn after_grant(&mut self, grant: Grant) {
        debug!(counter = grant.counter.key(), threshold = grant.threshold, "threshold paid");
        self.log.push(LogEvent::ThresholdGranted { counter: grant.counter, threshold: grant.threshold });
        self.after_reward(&grant.receipt);
    }

    /// Record one finished quest. Quests are tracked here; their content lives with the host.
    pub fn complete_quest(&mut self) {
        self.bump_counter(CounterKind::Quests, 1);
    }
}
