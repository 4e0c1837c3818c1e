//! Static content consumed by the engine: roster, artefact catalog, events and threshold tables.
//! Content is immutable once loaded. Parsing file formats is left to the caller; every type
//! here derives `Deserialize` so hosts can feed it from whatever source they own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::EngineError;
use crate::reward::Reward;
use crate::types::{ArtefactId, CounterKind, EffectTag, EncounterId, EventId, Facing, Rarity};

pub mod keys {
    pub const ENCOUNTER_SLIME: &str = "slime";
    pub const ENCOUNTER_GOBLIN: &str = "goblin";
    pub const ENCOUNTER_BAT_SWARM: &str = "bat_swarm";
    pub const ENCOUNTER_SKELETON: &str = "skeleton";
    pub const ENCOUNTER_ORC_BRUTE: &str = "orc_brute";
    pub const ENCOUNTER_STONE_GOLEM: &str = "stone_golem";

    pub const ARTEFACT_WHETSTONE: &str = "whetstone";
    pub const ARTEFACT_OAK_HEART: &str = "oak_heart";
    pub const ARTEFACT_SCHOLAR_QUILL: &str = "scholar_quill";
    pub const ARTEFACT_LUCKY_COIN: &str = "lucky_coin";
    pub const ARTEFACT_FEATHER_CHARM: &str = "feather_charm";
    pub const ARTEFACT_MAGPIE_EYE: &str = "magpie_eye";
    pub const ARTEFACT_HAWK_LENS: &str = "hawk_lens";
    pub const ARTEFACT_EXECUTIONER_RING: &str = "executioner_ring";

    pub const EVENT_HARVEST_MOON: &str = "harvest_moon";
    pub const BOSS_SCARECROW: &str = "scarecrow_king";
    pub const BOSS_PUMPKIN: &str = "pumpkin_lord";
}

/// Reward triple of a roster encounter. `None` means the encounter pays nothing in that field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterReward {
    pub coins: Option<u64>,
    pub crystals: Option<u64>,
    pub exp: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub id: EncounterId,
    pub name: String,
    pub base_hp: u64,
    #[serde(default)]
    pub reward: EncounterReward,
    #[serde(default)]
    pub facing: Facing,
}

/// A value authored either once for every position or per position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerIndex<T> {
    One(T),
    Each(Vec<T>),
}

impl<T: Copy + Default> PerIndex<T> {
    /// Reads past the end repeat the last authored value; an empty list reads as default.
    pub fn resolve(&self, index: usize) -> T {
        match self {
            PerIndex::One(value) => *value,
            PerIndex::Each(values) => match values.get(index).or_else(|| values.last()) {
                Some(value) => *value,
                None => T::default(),
            },
        }
    }
}

impl<T> From<T> for PerIndex<T> {
    fn from(value: T) -> Self {
        PerIndex::One(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEncounterSpec {
    pub id: EncounterId,
    pub name: String,
    pub hp: PerIndex<u64>,
    #[serde(default)]
    pub coins: Option<PerIndex<u64>>,
    #[serde(default)]
    pub crystals: Option<PerIndex<u64>>,
    #[serde(default)]
    pub exp: Option<PerIndex<u64>>,
    #[serde(default)]
    pub facing: Facing,
}

impl EventEncounterSpec {
    /// Materialise this entry as a plain encounter for sequence position `index`.
    pub fn resolve(&self, index: usize) -> EncounterConfig {
        EncounterConfig {
            id: self.id.clone(),
            name: self.name.clone(),
            base_hp: self.hp.resolve(index),
            reward: EncounterReward {
                coins: self.coins.as_ref().map(|v| v.resolve(index)),
                crystals: self.crystals.as_ref().map(|v| v.resolve(index)),
                exp: self.exp.as_ref().map(|v| v.resolve(index)),
            },
            facing: self.facing,
        }
    }
}

/// A finite boss sequence. Callers must not author an empty `encounters` list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: EventId,
    pub name: String,
    pub encounters: Vec<EventEncounterSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtefactDef {
    pub id: ArtefactId,
    pub name: String,
    pub rarity: Rarity,
    pub drop_chance: f64,
    pub effects: Vec<EffectTag>,
    pub power: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub counter: CounterKind,
    pub threshold: u64,
    pub reward: Reward,
}

/// Point-checked reward table for one counter.
pub type ThresholdTable = BTreeMap<u64, Reward>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    pub roster: Vec<EncounterConfig>,
    /// Drop resolution walks this list in authored order.
    pub catalog: Vec<ArtefactDef>,
    #[serde(default)]
    pub events: Vec<EventDefinition>,
    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
}

impl ContentPack {
    /// Roster and catalog are the baseline; without them no initial state exists.
    /// Catalog entries must carry at least one effect tag.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.roster.is_empty() {
            return Err(EngineError::MissingBaselineContent { what: "roster" });
        }
        if self.catalog.is_empty() {
            return Err(EngineError::MissingBaselineContent { what: "artefact catalog" });
        }
        if let Some(def) = self.catalog.iter().find(|def| def.effects.is_empty()) {
            return Err(EngineError::ArtefactWithoutEffects(def.id.clone()));
        }
        Ok(())
    }

    /// Fingerprint recorded in journals so a replay can refuse mismatched content.
    pub fn content_hash(&self) -> u64 {
        serde_json::to_vec(self).map_or(0, |bytes| xxh3_64(&bytes))
    }

    pub fn artefact(&self, id: &ArtefactId) -> Option<&ArtefactDef> {
        self.catalog.iter().find(|def| &def.id == id)
    }

    pub fn event(&self, id: &EventId) -> Option<&EventDefinition> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Group achievement rows into one table per counter. Later rows win on duplicate thresholds.
    pub fn threshold_tables(&self) -> BTreeMap<CounterKind, ThresholdTable> {
        let mut tables: BTreeMap<CounterKind, ThresholdTable> = BTreeMap::new();
        for row in &self.achievements {
            tables.entry(row.counter).or_default().insert(row.threshold, row.reward.clone());
        }
        tables
    }

    pub fn build_default() -> Self {
        Self {
            roster: vec![
                encounter(keys::ENCOUNTER_SLIME, "Slime", 10, Some(5), None, Some(3)),
                encounter(keys::ENCOUNTER_GOBLIN, "Goblin", 18, Some(8), None, Some(5)),
                encounter(keys::ENCOUNTER_BAT_SWARM, "Bat Swarm", 25, Some(10), Some(1), Some(6)),
                encounter(keys::ENCOUNTER_SKELETON, "Skeleton", 40, Some(15), None, Some(9)),
                encounter(keys::ENCOUNTER_ORC_BRUTE, "Orc Brute", 60, Some(22), Some(1), Some(14)),
                encounter(keys::ENCOUNTER_STONE_GOLEM, "Stone Golem", 90, Some(35), Some(3), Some(20)),
            ],
            catalog: vec![
                artefact(
                    keys::ARTEFACT_WHETSTONE,
                    "Whetstone",
                    Rarity::Common,
                    0.08,
                    &[EffectTag::TapDamage],
                    1,
                ),
                artefact(
                    keys::ARTEFACT_OAK_HEART,
                    "Oak Heart",
                    Rarity::Common,
                    0.06,
                    &[EffectTag::HpBonus],
                    5,
                ),
                artefact(
                    keys::ARTEFACT_SCHOLAR_QUILL,
                    "Scholar's Quill",
                    Rarity::Common,
                    0.05,
                    &[EffectTag::ExpBonus],
                    1,
                ),
                artefact(
                    keys::ARTEFACT_LUCKY_COIN,
                    "Lucky Coin",
                    Rarity::Rare,
                    0.04,
                    &[EffectTag::CoinGain],
                    2,
                ),
                artefact(
                    keys::ARTEFACT_FEATHER_CHARM,
                    "Feather Charm",
                    Rarity::Rare,
                    0.03,
                    &[EffectTag::AttackSpeed],
                    5,
                ),
                artefact(
                    keys::ARTEFACT_MAGPIE_EYE,
                    "Magpie Eye",
                    Rarity::Epic,
                    0.02,
                    &[EffectTag::LootBoost],
                    2,
                ),
                artefact(
                    keys::ARTEFACT_HAWK_LENS,
                    "Hawk Lens",
                    Rarity::Epic,
                    0.015,
                    &[EffectTag::CritChance],
                    5,
                ),
                artefact(
                    keys::ARTEFACT_EXECUTIONER_RING,
                    "Executioner's Ring",
                    Rarity::Legendary,
                    0.005,
                    &[EffectTag::CritDamage, EffectTag::TapDamage],
                    25,
                ),
            ],
            events: vec![EventDefinition {
                id: EventId::from(keys::EVENT_HARVEST_MOON),
                name: "Harvest Moon".to_string(),
                encounters: vec![
                    EventEncounterSpec {
                        id: EncounterId::from(keys::BOSS_SCARECROW),
                        name: "Scarecrow King".to_string(),
                        hp: PerIndex::Each(vec![120, 200]),
                        coins: Some(PerIndex::One(40)),
                        crystals: None,
                        exp: Some(PerIndex::Each(vec![20, 30])),
                        facing: Facing::Right,
                    },
                    EventEncounterSpec {
                        id: EncounterId::from(keys::BOSS_SCARECROW),
                        name: "Scarecrow King".to_string(),
                        hp: PerIndex::Each(vec![120, 200]),
                        coins: Some(PerIndex::One(40)),
                        crystals: None,
                        exp: Some(PerIndex::Each(vec![20, 30])),
                        facing: Facing::Left,
                    },
                    EventEncounterSpec {
                        id: EncounterId::from(keys::BOSS_PUMPKIN),
                        name: "Pumpkin Lord".to_string(),
                        hp: PerIndex::Each(vec![150, 250, 400]),
                        coins: Some(PerIndex::One(80)),
                        crystals: Some(PerIndex::One(5)),
                        exp: Some(PerIndex::One(60)),
                        facing: Facing::Left,
                    },
                ],
            }],
            achievements: vec![
                achievement(CounterKind::Stage, 5, Reward::Coins(50)),
                achievement(CounterKind::Stage, 10, Reward::Crystals(10)),
                achievement(
                    CounterKind::Stage,
                    25,
                    Reward::Combine(vec![
                        Reward::Crystals(25),
                        Reward::Artefact(ArtefactId::from(keys::ARTEFACT_WHETSTONE)),
                    ]),
                ),
                achievement(CounterKind::Kills, 10, Reward::Exp(25)),
                achievement(CounterKind::Kills, 100, Reward::Exp(250)),
                achievement(CounterKind::Quests, 1, Reward::Coins(25)),
                achievement(CounterKind::Playtime, 10, Reward::Crystals(5)),
                achievement(CounterKind::Playtime, 60, Reward::Crystals(30)),
                achievement(CounterKind::Artefacts, 5, Reward::Coins(100)),
            ],
        }
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

fn encounter(
    id: &str,
    name: &str,
    base_hp: u64,
    coins: Option<u64>,
    crystals: Option<u64>,
    exp: Option<u64>,
) -> EncounterConfig {
    EncounterConfig {
        id: EncounterId::from(id),
        name: name.to_string(),
        base_hp,
        reward: EncounterReward { coins, crystals, exp },
        facing: Facing::Left,
    }
}

fn artefact(
    id: &str,
    name: &str,
    rarity: Rarity,
    drop_chance: f64,
    effects: &[EffectTag],
    power: u32,
) -> ArtefactDef {
    ArtefactDef {
        id: ArtefactId::from(id),
        name: name.to_string(),
        rarity,
        drop_chance,
        effects: effects.to_vec(),
        power,
    }
}

fn achievement(counter: CounterKind, threshold: u64, reward: Reward) -> AchievementDef {
    AchievementDef { counter, threshold, reward }
}
