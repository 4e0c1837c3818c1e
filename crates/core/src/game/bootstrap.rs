//! Run construction, reset and encounter loading.
//! This module establishes the initial state and swaps encounters in and out.
//! It does not decide when an encounter is replaced; the defeat pipeline does.

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::achievements::GrantedSet;
use crate::content::EncounterConfig;

/// Services a run is built from. Restored games pass in persisted instances.
#[derive(Clone, Debug, Default)]
pub(crate) struct Services {
    pub ledger: Ledger,
    pub inventory: ArtefactInventory,
    pub granted: GrantedSet,
    pub counters: Counters,
    pub progress: Progress,
    pub rng_word_pos: u128,
}

impl Game {
    /// Start a fresh run on Roster[0]. Fails when the roster or catalog is empty.
    pub fn new(seed: u64, content: &ContentPack, config: EngineConfig) -> Result<Self, EngineError> {
        Self::assemble(seed, content, config, Services::default())
    }

    pub(crate) fn assemble(
        seed: u64,
        content: &ContentPack,
        config: EngineConfig,
        services: Services,
    ) -> Result<Self, EngineError> {
        content.validate()?;

        let Services { mut ledger, inventory, granted, counters, mut progress, rng_word_pos } = services;
        ledger.set_exp_per_level(config.exp_per_level);
        progress.roster_index %= content.roster.len();
        progress.tap_level = progress.tap_level.max(1);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_word_pos(rng_word_pos);

        let mut game = Self {
            seed,
            rng,
            thresholds: content.threshold_tables(),
            content: content.clone(),
            config,
            ledger,
            inventory,
            achievements: AchievementService::new(granted),
            counters,
            progress,
            mode: BattleMode::Idle,
            encounter: EncounterState {
                id: EncounterId::new(""),
                name: String::new(),
                base_hp: 0,
                reward: EncounterReward::default(),
                max_hp: 0,
                current_hp: 0,
            },
            auto: AutoBattle::default(),
            log: Vec::new(),
            inputs_applied: 0,
        };
        game.mode = BattleMode::Normal;
        game.load_roster_encounter();
        Ok(game)
    }

    /// Wipe balances, inventory, counters, upgrades and granted thresholds, then restart on Roster[0].
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.inventory.clear();
        self.achievements.reset();
        self.counters = Counters::default();
        self.progress = Progress::default();
        self.mode = BattleMode::Normal;
        self.auto = AutoBattle::default();
        self.log.push(LogEvent::ProgressReset);
        self.emit_balances();
        self.load_roster_encounter();
    }

    pub(super) fn load_roster_encounter(&mut self) {
        let config = self.content.roster[self.progress.roster_index].clone();
        self.load_encounter(config);
    }

    pub(super) fn load_encounter(&mut self, config: EncounterConfig) {
        let max_hp = config.base_hp.saturating_add(self.bonuses().hp_bonus).max(1);
        self.encounter = EncounterState {
            id: config.id,
            name: config.name,
            base_hp: config.base_hp,
            reward: config.reward,
            max_hp,
            current_hp: max_hp,
        };
        self.log.push(LogEvent::EncounterLoaded { encounter: self.encounter.id.clone(), max_hp });
    }
}
