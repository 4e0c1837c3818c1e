//! Shared fixtures for the `game` test suites.
//! This module exists to avoid repeating content setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::content::{AchievementDef, ArtefactDef, EncounterConfig, EventDefinition, EventEncounterSpec, PerIndex};
use crate::reward::Reward;

pub(super) const SEED: u64 = 7;

pub(super) const RAT: &str = "rat";
pub(super) const WOLF: &str = "wolf";
pub(super) const BEAR: &str = "bear";

pub(super) const BLADE: &str = "blade";
pub(super) const WARD: &str = "ward";
pub(super) const PURSE: &str = "purse";
pub(super) const TOME: &str = "tome";
pub(super) const FEATHER: &str = "feather";

pub(super) const TRIAL: &str = "trial";

pub(super) fn encounter(id: &str, base_hp: u64, coins: Option<u64>, crystals: Option<u64>, exp: Option<u64>) -> EncounterConfig {
    EncounterConfig {
        id: EncounterId::from(id),
        name: id.to_string(),
        base_hp,
        reward: EncounterReward { coins, crystals, exp },
        facing: Facing::Left,
    }
}

pub(super) fn artefact(id: &str, drop_chance: f64, effect: EffectTag, power: u32) -> ArtefactDef {
    ArtefactDef {
        id: ArtefactId::from(id),
        name: id.to_string(),
        rarity: Rarity::Common,
        drop_chance,
        effects: vec![effect],
        power,
    }
}

/// Three roster encounters, a catalog that never drops and a three-step event whose
/// bosses all author `hp = [100, 200]`.
pub(super) fn quiet_pack() -> ContentPack {
    let boss = |id: &str| EventEncounterSpec {
        id: EncounterId::from(id),
        name: id.to_string(),
        hp: PerIndex::Each(vec![100, 200]),
        coins: Some(PerIndex::One(500)),
        crystals: None,
        exp: None,
        facing: Facing::Right,
    };
    ContentPack {
        roster: vec![
            encounter(RAT, 5, Some(10), Some(0), Some(5)),
            encounter(WOLF, 8, Some(20), Some(1), Some(10)),
            encounter(BEAR, 12, None, None, Some(7)),
        ],
        catalog: vec![
            artefact(BLADE, 0.0, EffectTag::TapDamage, 2),
            artefact(WARD, 0.0, EffectTag::HpBonus, 5),
            artefact(PURSE, 0.0, EffectTag::CoinGain, 2),
            artefact(TOME, 0.0, EffectTag::ExpBonus, 1),
            artefact(FEATHER, 0.0, EffectTag::AttackSpeed, 50),
        ],
        events: vec![EventDefinition {
            id: EventId::from(TRIAL),
            name: "Trial".to_string(),
            encounters: vec![boss("first"), boss("second"), boss("third")],
        }],
        achievements: Vec::new(),
    }
}

pub(super) fn with_achievements(mut pack: ContentPack, rows: &[(CounterKind, u64, Reward)]) -> ContentPack {
    pack.achievements = rows
        .iter()
        .map(|(counter, threshold, reward)| AchievementDef {
            counter: *counter,
            threshold: *threshold,
            reward: reward.clone(),
        })
        .collect();
    pack
}

pub(super) fn new_game(pack: &ContentPack) -> Game {
    Game::new(SEED, pack, EngineConfig::default()).expect("fixture content is valid")
}

/// Hand an artefact to the player through the normal reward path.
pub(super) fn give(game: &mut Game, id: &str) {
    game.grant_reward(&Reward::Artefact(ArtefactId::from(id)));
}

pub(super) fn kill_current(game: &mut Game) -> DefeatReport {
    game.apply_damage(u64::MAX).expect("a living encounter falls to unbounded damage")
}
