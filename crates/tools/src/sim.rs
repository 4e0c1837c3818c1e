//! Scripted offline player used for balance runs. Every accepted command is journaled,
//! so a simulation can be replayed and hashed like a live session.

use battle_core::{ArtefactId, BattleMode, EventId, Game, InputJournal, InputPayload, LogEvent};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct SimPlan {
    pub minutes: u64,
    pub taps_per_second: u32,
    pub auto_battle: bool,
    pub buy_upgrades: bool,
    pub upgrade_artefacts: bool,
    /// Started whenever the run is in normal mode; acknowledged once won.
    pub event: Option<EventId>,
}

impl Default for SimPlan {
    fn default() -> Self {
        Self {
            minutes: 10,
            taps_per_second: 3,
            auto_battle: true,
            buy_upgrades: true,
            upgrade_artefacts: true,
            event: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimSummary {
    pub seed: u64,
    pub minutes: u64,
    pub inputs: u64,
    pub stage: u64,
    pub kills: u64,
    pub playtime: u64,
    pub level: u32,
    pub tap_level: u32,
    pub coins: u64,
    pub crystals: u64,
    pub artefacts_owned: usize,
    pub drops: u64,
    pub thresholds_granted: u64,
    pub events_won: u64,
    pub snapshot_hash: String,
}

/// Drive `game` through `plan`, recording every accepted command into `journal`.
pub fn simulate(game: &mut Game, plan: &SimPlan, journal: &mut InputJournal) -> SimSummary {
    let mut summary = SimSummary { seed: game.seed(), minutes: plan.minutes, ..SimSummary::default() };

    for _ in 0..plan.minutes.saturating_mul(60) {
        if plan.auto_battle && !game.auto_battle_enabled() {
            submit(game, journal, InputPayload::SetAutoBattle { enabled: true }, &mut summary);
        }
        if let Some(event) = &plan.event {
            let step = match game.mode() {
                BattleMode::Normal => Some(InputPayload::StartEvent { event: event.clone() }),
                BattleMode::EventWon { .. } => Some(InputPayload::AcknowledgeVictory),
                BattleMode::Idle | BattleMode::EventActive { .. } => None,
            };
            if let Some(payload) = step {
                submit(game, journal, payload, &mut summary);
            }
        }
        for _ in 0..plan.taps_per_second {
            submit(game, journal, InputPayload::Tap, &mut summary);
        }
        submit(game, journal, InputPayload::AdvanceClock { millis: 1_000 }, &mut summary);

        if plan.buy_upgrades && game.ledger().coins() >= game.tap_upgrade_cost() {
            submit(game, journal, InputPayload::BuyTapUpgrade, &mut summary);
        }
        if plan.upgrade_artefacts {
            for artefact in upgradeable(game) {
                submit(game, journal, InputPayload::UpgradeArtefact { artefact }, &mut summary);
            }
        }
    }

    let counters = game.counters();
    summary.inputs = game.inputs_applied();
    summary.stage = counters.stage;
    summary.kills = counters.kills;
    summary.playtime = counters.playtime;
    summary.level = game.ledger().level();
    summary.tap_level = game.progress().tap_level;
    summary.coins = game.ledger().coins();
    summary.crystals = game.ledger().crystals();
    summary.artefacts_owned = game.inventory().len();
    summary.snapshot_hash = format!("0x{:016x}", game.snapshot_hash());
    summary
}

fn upgradeable(game: &Game) -> Vec<ArtefactId> {
    let cost = game.config().artefact_shard_cost_per_level;
    game.inventory()
        .iter()
        .filter(|owned| owned.shards >= cost.saturating_mul(u64::from(owned.level)))
        .map(|owned| owned.id.clone())
        .collect()
}

fn submit(game: &mut Game, journal: &mut InputJournal, payload: InputPayload, summary: &mut SimSummary) {
    match game.apply_input(&payload) {
        Ok(()) => {
            journal.append(payload);
        }
        Err(err) => debug!(?payload, %err, "sim input rejected"),
    }
    for event in game.take_log() {
        match event {
            LogEvent::ArtefactDropped { .. } => summary.drops += 1,
            LogEvent::ThresholdGranted { .. } => summary.thresholds_granted += 1,
            LogEvent::EventWon { .. } => summary.events_won += 1,
            _ => {}
        }
    }
}
