//! Encounter progression state machine.
//!
//! `Game` owns the ledger, the artefact inventory and the granted-threshold set for one run
//! and drives them from taps, clock ticks and event commands. Each call resolves fully
//! before returning, so callers only need to serialize access to a single `&mut Game`.

use std::collections::BTreeMap;
use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementService;
use crate::bonus::Bonuses;
use crate::config::EngineConfig;
use crate::content::{ContentPack, EncounterReward, ThresholdTable};
use crate::error::EngineError;
use crate::inventory::ArtefactInventory;
use crate::ledger::Ledger;
use crate::types::*;

mod auto_battle;
mod bootstrap;
mod combat;
mod defeat;
mod drops;
mod event_run;
mod hash;
mod input;
mod persist;
mod progression;
mod upgrades;
mod view;

#[cfg(test)]
mod test_support;

pub use drops::effective_drop_chance;
pub use view::{ArtefactView, BattleView};

/// The encounter currently taking damage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterState {
    pub id: EncounterId,
    pub name: String,
    pub base_hp: u64,
    pub reward: EncounterReward,
    /// `base_hp + hp_bonus` as of the last recompute, floor 1.
    pub max_hp: u64,
    pub current_hp: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    pub stage: u64,
    pub point: u64,
    pub kills: u64,
    pub quests: u64,
    /// Whole minutes of accrued clock time.
    pub playtime: u64,
    pub artefacts: u64,
    pub playtime_carry_ms: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Self { stage: 1, point: 0, kills: 0, quests: 0, playtime: 0, artefacts: 0, playtime_carry_ms: 0 }
    }
}

impl Counters {
    pub fn get(&self, counter: CounterKind) -> u64 {
        match counter {
            CounterKind::Stage => self.stage,
            CounterKind::Kills => self.kills,
            CounterKind::Quests => self.quests,
            CounterKind::Playtime => self.playtime,
            CounterKind::Artefacts => self.artefacts,
        }
    }

    fn slot_mut(&mut self, counter: CounterKind) -> &mut u64 {
        match counter {
            CounterKind::Stage => &mut self.stage,
            CounterKind::Kills => &mut self.kills,
            CounterKind::Quests => &mut self.quests,
            CounterKind::Playtime => &mut self.playtime,
            CounterKind::Artefacts => &mut self.artefacts,
        }
    }
}

/// Roster position and purchased upgrades; persisted with the counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub roster_index: usize,
    pub tap_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { roster_index: 0, tap_level: 1 }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct AutoBattle {
    enabled: bool,
    carry_secs: f64,
}

pub struct Game {
    seed: u64,
    rng: ChaCha8Rng,
    config: EngineConfig,
    content: ContentPack,
    thresholds: BTreeMap<CounterKind, ThresholdTable>,
    ledger: Ledger,
    inventory: ArtefactInventory,
    achievements: AchievementService,
    counters: Counters,
    progress: Progress,
    mode: BattleMode,
    encounter: EncounterState,
    auto: AutoBattle,
    log: Vec<LogEvent>,
    inputs_applied: u64,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn inventory(&self) -> &ArtefactInventory {
        &self.inventory
    }

    pub fn achievements(&self) -> &AchievementService {
        &self.achievements
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn mode(&self) -> &BattleMode {
        &self.mode
    }

    pub fn encounter(&self) -> &EncounterState {
        &self.encounter
    }

    pub fn inputs_applied(&self) -> u64 {
        self.inputs_applied
    }

    /// Recomputed from the inventory on every call.
    pub fn bonuses(&self) -> Bonuses {
        Bonuses::from_inventory(&self.inventory)
    }

    /// Max HP the current encounter would have under the current bonuses.
    pub fn display_hp(&self) -> u64 {
        self.encounter.base_hp.saturating_add(self.bonuses().hp_bonus).max(1)
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Hand accumulated notifications to a consumer and start a fresh log.
    pub fn take_log(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }

    /// Uniform draw in `[0, 1)` with 53 bits of precision.
    fn unit_draw(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    fn emit_balances(&mut self) {
        self.log.push(LogEvent::BalancesChanged {
            coins: self.ledger.coins(),
            crystals: self.ledger.crystals(),
            level: self.ledger.level(),
            exp: self.ledger.exp(),
        });
    }
}
