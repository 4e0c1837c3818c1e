//! Artefact drop resolution after a defeat.
//! This module exists to keep the first-match catalog walk in one place.
//! It does not own inventory growth; a drop is granted through the reward pipeline.

use super::*;
use crate::reward::Reward;

impl Game {
    /// Walk the catalog in authored order with one draw per entry; the first success drops.
    pub(super) fn roll_artefact_drop(&mut self) -> Option<ArtefactId> {
        let loot_boost = self.bonuses().loot_boost;
        let cap = self.config.drop_chance_cap;
        let mut dropped = None;
        for index in 0..self.content.catalog.len() {
            let chance = effective_drop_chance(self.content.catalog[index].drop_chance, loot_boost, cap);
            if self.unit_draw() < chance {
                dropped = Some(self.content.catalog[index].id.clone());
                break;
            }
        }
        let id = dropped?;
        self.log.push(LogEvent::ArtefactDropped { artefact: id.clone() });
        self.grant_reward(&Reward::Artefact(id.clone()));
        Some(id)
    }
}

/// Boosted chance, capped at `cap`. An authored chance already at or above the cap is used as
/// authored so a certain drop stays certain.
pub fn effective_drop_chance(base: f64, loot_boost: f64, cap: f64) -> f64 {
    let base = if base.is_nan() { 0.0 } else { base.clamp(0.0, 1.0) };
    if base >= cap {
        return base;
    }
    (base + loot_boost / 100.0).clamp(0.0, cap)
}
