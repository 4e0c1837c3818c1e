//! Owned artefacts keyed by identity.
//! A duplicate acquisition levels the existing entry instead of adding a second one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::ArtefactDef;
use crate::error::UpgradeError;
use crate::types::{ArtefactId, EffectTag, Rarity};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnedArtefact {
    pub id: ArtefactId,
    pub name: String,
    pub rarity: Rarity,
    pub effects: Vec<EffectTag>,
    pub power: u32,
    pub level: u32,
    /// Accumulated upgrade resource for manual level-ups.
    pub shards: u64,
}

impl OwnedArtefact {
    fn from_def(def: &ArtefactDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            rarity: def.rarity,
            effects: def.effects.clone(),
            power: def.power,
            level: 1,
            shards: 0,
        }
    }

    pub fn total_power(&self) -> u64 {
        u64::from(self.power) * u64::from(self.level)
    }

    pub fn has_effect(&self, tag: EffectTag) -> bool {
        self.effects.contains(&tag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Acquired {
    pub level: u32,
    pub newly_owned: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtefactInventory {
    owned: BTreeMap<ArtefactId, OwnedArtefact>,
}

impl ArtefactInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `def`: first copy owns it at level 1, later copies level it up.
    /// Every unit also credits one shard.
    pub fn acquire(&mut self, def: &ArtefactDef) -> Acquired {
        let mut newly_owned = false;
        let entry = self.owned.entry(def.id.clone()).or_insert_with(|| {
            newly_owned = true;
            OwnedArtefact::from_def(def)
        });
        if !newly_owned {
            entry.level += 1;
        }
        entry.shards += 1;
        Acquired { level: entry.level, newly_owned }
    }

    /// Spend `cost_per_level * level` shards to raise the artefact one level.
    pub fn upgrade(&mut self, id: &ArtefactId, cost_per_level: u64) -> Result<u32, UpgradeError> {
        let artefact =
            self.owned.get_mut(id).ok_or_else(|| UpgradeError::NotOwned(id.clone()))?;
        let needed = cost_per_level.saturating_mul(u64::from(artefact.level));
        if artefact.shards < needed {
            return Err(UpgradeError::InsufficientShards { needed, available: artefact.shards });
        }
        artefact.shards -= needed;
        artefact.level += 1;
        Ok(artefact.level)
    }

    pub fn get(&self, id: &ArtefactId) -> Option<&OwnedArtefact> {
        self.owned.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedArtefact> {
        self.owned.values()
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn clear(&mut self) {
        self.owned.clear();
    }
}
