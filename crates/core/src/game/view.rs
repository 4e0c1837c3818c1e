//! Read-only projection for presentation sinks.

use super::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtefactView {
    pub id: ArtefactId,
    pub name: String,
    pub rarity: Rarity,
    pub level: u32,
    pub shards: u64,
    pub total_power: u64,
    pub effects: Vec<EffectTag>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BattleView {
    pub mode: BattleMode,
    pub encounter: EncounterId,
    pub encounter_name: String,
    pub current_hp: u64,
    pub max_hp: u64,
    pub stage: u64,
    pub point: u64,
    pub kills: u64,
    pub coins: u64,
    pub crystals: u64,
    pub level: u32,
    pub exp: u64,
    pub exp_to_next_level: u64,
    pub tap_level: u32,
    pub tap_damage: u64,
    pub tap_upgrade_cost: u64,
    pub auto_battle: bool,
    pub artefacts: Vec<ArtefactView>,
}

impl Game {
    pub fn view(&self) -> BattleView {
        BattleView {
            mode: self.mode.clone(),
            encounter: self.encounter.id.clone(),
            encounter_name: self.encounter.name.clone(),
            current_hp: self.encounter.current_hp,
            max_hp: self.encounter.max_hp,
            stage: self.counters.stage,
            point: self.counters.point,
            kills: self.counters.kills,
            coins: self.ledger.coins(),
            crystals: self.ledger.crystals(),
            level: self.ledger.level(),
            exp: self.ledger.exp(),
            exp_to_next_level: self.ledger.exp_to_next_level(),
            tap_level: self.progress.tap_level,
            tap_damage: self.tap_damage(),
            tap_upgrade_cost: self.tap_upgrade_cost(),
            auto_battle: self.auto.enabled,
            artefacts: self
                .inventory
                .iter()
                .map(|owned| ArtefactView {
                    id: owned.id.clone(),
                    name: owned.name.clone(),
                    rarity: owned.rarity,
                    level: owned.level,
                    shards: owned.shards,
                    total_power: owned.total_power(),
                    effects: owned.effects.clone(),
                })
                .collect(),
        }
    }
}
