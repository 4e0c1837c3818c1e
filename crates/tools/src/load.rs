use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use battle_core::{ContentPack, EngineConfig};
use tracing::info;

/// Load a content pack from TOML, or the built-in pack when no path is given.
pub fn load_content(path: Option<&Path>) -> Result<ContentPack> {
    let Some(path) = path else {
        return Ok(ContentPack::build_default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read content file: {}", path.display()))?;
    let content: ContentPack =
        toml::from_str(&text).with_context(|| format!("failed to parse content file: {}", path.display()))?;
    content.validate().with_context(|| format!("content file is unusable: {}", path.display()))?;
    info!(
        path = %path.display(),
        roster = content.roster.len(),
        catalog = content.catalog.len(),
        events = content.events.len(),
        "content loaded"
    );
    Ok(content)
}

/// Load engine tunables from TOML. Missing fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ArtefactId, CounterKind, Reward};

    const SMALL_PACK: &str = r#"
[[roster]]
id = "rat"
name = "Rat"
base_hp = 5
reward = { coins = 10, exp = 5 }

[[roster]]
id = "boar"
name = "Boar"
base_hp = 9
facing = "right"

[[catalog]]
id = "fang"
name = "Fang"
rarity = "rare"
drop_chance = 0.1
effects = ["tap_damage", "crit_chance"]
power = 3

[[events]]
id = "night_hunt"
name = "Night Hunt"

[[events.encounters]]
id = "werewolf"
name = "Werewolf"
hp = [50, 80]
coins = 200

[[achievements]]
counter = "kills"
threshold = 10
reward = { combine = [{ coins = 25 }, { artefact = "fang" }] }
"#;

    #[test]
    fn no_path_means_built_in_content() {
        assert_eq!(load_content(None).unwrap(), ContentPack::build_default());
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn authored_pack_loads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.toml");
        fs::write(&path, SMALL_PACK).unwrap();

        let content = load_content(Some(&path)).unwrap();
        assert_eq!(content.roster.len(), 2);
        assert_eq!(content.roster[1].reward.coins, None);
        assert_eq!(content.events[0].encounters[0].resolve(1).base_hp, 80);
        assert_eq!(content.events[0].encounters[0].resolve(1).reward.coins, Some(200));

        let tables = content.threshold_tables();
        let reward = &tables[&CounterKind::Kills][&10];
        assert_eq!(
            reward,
            &Reward::Combine(vec![Reward::Coins(25), Reward::Artefact(ArtefactId::from("fang"))])
        );
    }

    #[test]
    fn pack_without_roster_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "roster = []\ncatalog = []\n").unwrap();
        let err = load_content(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("unusable"), "got {err:#}");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "exp_per_level = 50\ndrop_chance_cap = 0.5\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.exp_per_level, 50);
        assert_eq!(config.drop_chance_cap, 0.5);
        assert_eq!(config.tap_upgrade_base_cost, EngineConfig::default().tap_upgrade_base_cost);
    }
}
