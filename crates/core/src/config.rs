use serde::{Deserialize, Serialize};

/// Engine tunables. Every field has a default so partial TOML files load cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Exp needed to leave level `n` is `n * exp_per_level`.
    pub exp_per_level: u64,
    /// Upper bound on a boosted artefact drop chance.
    pub drop_chance_cap: f64,
    pub base_auto_interval_secs: f64,
    pub min_auto_interval_secs: f64,
    /// Bounds the work one clock advance can do when the caller stalls for a long time.
    pub max_auto_taps_per_advance: u32,
    /// Crystals granted when the last encounter of an event falls.
    pub event_completion_crystals: u64,
    pub base_tap_damage: u64,
    pub tap_upgrade_base_cost: u64,
    pub artefact_shard_cost_per_level: u64,
}

impl EngineConfig {
    pub const DEFAULT_EXP_PER_LEVEL: u64 = 200;
    pub const DEFAULT_DROP_CHANCE_CAP: f64 = 0.95;
    pub const DEFAULT_AUTO_INTERVAL_SECS: f64 = 1.0;
    pub const MIN_AUTO_INTERVAL_SECS: f64 = 0.05;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exp_per_level: Self::DEFAULT_EXP_PER_LEVEL,
            drop_chance_cap: Self::DEFAULT_DROP_CHANCE_CAP,
            base_auto_interval_secs: Self::DEFAULT_AUTO_INTERVAL_SECS,
            min_auto_interval_secs: Self::MIN_AUTO_INTERVAL_SECS,
            max_auto_taps_per_advance: 1000,
            event_completion_crystals: 100,
            base_tap_damage: 1,
            tap_upgrade_base_cost: 10,
            artefact_shard_cost_per_level: 1,
        }
    }
}
