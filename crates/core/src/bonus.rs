//! Combat and economy bonuses derived from owned artefacts.
//!
//! Flat categories sum `total_power` as integers; percentage categories sum it as a
//! percent. Nothing is clamped here; callers clamp at the point of use.

use crate::inventory::{ArtefactInventory, OwnedArtefact};
use crate::types::EffectTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bonuses {
    pub tap_damage: u64,
    pub hp_bonus: u64,
    pub exp_bonus: u64,
    pub coin_gain: u64,
    pub attack_speed: f64,
    pub loot_boost: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
}

impl Bonuses {
    pub fn from_artefacts<'a>(artefacts: impl IntoIterator<Item = &'a OwnedArtefact>) -> Self {
        let mut bonuses = Self::default();
        for artefact in artefacts {
            let power = artefact.total_power();
            for tag in &artefact.effects {
                bonuses.add(*tag, power);
            }
        }
        bonuses
    }

    pub fn from_inventory(inventory: &ArtefactInventory) -> Self {
        Self::from_artefacts(inventory.iter())
    }

    fn add(&mut self, tag: EffectTag, power: u64) {
        match tag {
            EffectTag::TapDamage => self.tap_damage += power,
            EffectTag::HpBonus => self.hp_bonus += power,
            EffectTag::ExpBonus => self.exp_bonus += power,
            EffectTag::CoinGain => self.coin_gain += power,
            EffectTag::AttackSpeed => self.attack_speed += power as f64,
            EffectTag::LootBoost => self.loot_boost += power as f64,
            EffectTag::CritChance => self.crit_chance += power as f64,
            EffectTag::CritDamage => self.crit_damage += power as f64,
        }
    }
}
