//! Composite rewards and the single routine that pays them out.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::content::ArtefactDef;
use crate::inventory::ArtefactInventory;
use crate::ledger::Ledger;
use crate::types::{ArtefactId, RewardReceipt};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    Coins(u64),
    Crystals(u64),
    Exp(u64),
    Artefact(ArtefactId),
    Combine(Vec<Reward>),
}

impl Reward {
    /// Every non-`Combine` leaf, depth first.
    pub fn leaves(&self) -> Vec<&Reward> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Reward>) {
        match self {
            Reward::Combine(parts) => {
                for part in parts {
                    part.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

/// Fans a reward out to the ledger and the artefact inventory.
pub struct RewardResolver<'a> {
    pub ledger: &'a mut Ledger,
    pub inventory: &'a mut ArtefactInventory,
    pub catalog: &'a [ArtefactDef],
}

impl RewardResolver<'_> {
    /// Apply every leaf. An artefact id missing from the catalog skips only that leaf.
    pub fn apply(&mut self, reward: &Reward) -> RewardReceipt {
        let mut receipt = RewardReceipt::default();
        for leaf in reward.leaves() {
            match leaf {
                Reward::Coins(n) => {
                    self.ledger.add_coins(*n);
                    receipt.coins += n;
                }
                Reward::Crystals(n) => {
                    self.ledger.add_crystals(*n);
                    receipt.crystals += n;
                }
                Reward::Exp(n) => {
                    receipt.levels_gained += self.ledger.add_exp(*n);
                    receipt.exp += n;
                }
                Reward::Artefact(id) => match self.catalog.iter().find(|def| &def.id == id) {
                    Some(def) => {
                        let acquired = self.inventory.acquire(def);
                        debug!(artefact = %id, level = acquired.level, "artefact rewarded");
                        receipt.artefacts.push(id.clone());
                    }
                    None => {
                        warn!(artefact = %id, "reward references unknown catalog entry; skipped");
                        receipt.skipped.push(id.clone());
                    }
                },
                Reward::Combine(_) => {}
            }
        }
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EffectTag, Rarity};

    fn catalog() -> Vec<ArtefactDef> {
        vec![ArtefactDef {
            id: ArtefactId::from("whetstone"),
            name: "Whetstone".to_string(),
            rarity: Rarity::Common,
            drop_chance: 0.1,
            effects: vec![EffectTag::TapDamage],
            power: 1,
        }]
    }

    #[test]
    fn nested_combine_applies_every_leaf() {
        let mut ledger = Ledger::default();
        let mut inventory = ArtefactInventory::new();
        let catalog = catalog();
        let reward = Reward::Combine(vec![
            Reward::Coins(10),
            Reward::Combine(vec![Reward::Exp(250), Reward::Crystals(3), Reward::Coins(5)]),
            Reward::Artefact(ArtefactId::from("whetstone")),
        ]);

        let receipt = RewardResolver {
            ledger: &mut ledger,
            inventory: &mut inventory,
            catalog: &catalog,
        }
        .apply(&reward);

        assert_eq!(ledger.coins(), 15);
        assert_eq!(ledger.crystals(), 3);
        assert_eq!((ledger.level(), ledger.exp()), (2, 50));
        assert_eq!(receipt.levels_gained, 1);
        assert_eq!(receipt.artefacts, vec![ArtefactId::from("whetstone")]);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn unknown_artefact_skips_only_that_leaf() {
        let mut ledger = Ledger::default();
        let mut inventory = ArtefactInventory::new();
        let catalog = catalog();
        let reward =
            Reward::Combine(vec![Reward::Artefact(ArtefactId::from("missing")), Reward::Coins(7)]);

        let receipt = RewardResolver {
            ledger: &mut ledger,
            inventory: &mut inventory,
            catalog: &catalog,
        }
        .apply(&reward);

        assert_eq!(ledger.coins(), 7);
        assert!(inventory.is_empty());
        assert_eq!(receipt.skipped, vec![ArtefactId::from("missing")]);
    }

    #[test]
    fn empty_combine_is_a_no_op() {
        assert!(Reward::Combine(Vec::new()).leaves().is_empty());
    }
}
