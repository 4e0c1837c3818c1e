//! Tests for normal-mode taps, defeats and the bookkeeping that follows them.

use super::support::*;

#[test]
fn new_run_starts_on_first_roster_entry_at_full_hp() {
    let game = new_game(&quiet_pack());
    assert_eq!(game.mode(), &BattleMode::Normal);
    assert_eq!(game.encounter().id, EncounterId::from(RAT));
    assert_eq!((game.encounter().current_hp, game.encounter().max_hp), (5, 5));
    assert_eq!((game.counters().stage, game.counters().point), (1, 0));
    assert_eq!(game.ledger().level(), 1);
}

#[test]
fn empty_roster_or_catalog_is_fatal() {
    let mut pack = quiet_pack();
    pack.roster.clear();
    assert!(matches!(
        Game::new(SEED, &pack, EngineConfig::default()),
        Err(EngineError::MissingBaselineContent { what: "roster" })
    ));

    let mut pack = quiet_pack();
    pack.catalog.clear();
    assert!(matches!(
        Game::new(SEED, &pack, EngineConfig::default()),
        Err(EngineError::MissingBaselineContent { .. })
    ));
}

#[test]
fn bonuses_add_on_top_of_base_reward() {
    let mut game = new_game(&quiet_pack());
    give(&mut game, PURSE);
    give(&mut game, TOME);
    assert_eq!(game.bonuses().coin_gain, 2);
    assert_eq!(game.bonuses().exp_bonus, 1);

    let report = kill_current(&mut game);

    assert_eq!(game.ledger().coins(), 12);
    assert_eq!(game.ledger().exp(), 6);
    assert_eq!((game.counters().stage, game.counters().point), (2, 1));
    assert_eq!(game.progress().roster_index, 1);
    assert_eq!(report.dropped, None);
    match report.progression {
        DefeatProgression::StageCleared { reward, next_stage } => {
            assert_eq!((reward.coins, reward.exp), (12, 6));
            assert_eq!(next_stage, 2);
        }
        other => panic!("expected a cleared stage, got {other:?}"),
    }
}

#[test]
fn roster_wraps_after_last_entry() {
    let mut game = new_game(&quiet_pack());
    for _ in 0..3 {
        kill_current(&mut game);
    }

    assert_eq!(game.encounter().id, EncounterId::from(RAT));
    assert_eq!(game.progress().roster_index, 0);
    assert_eq!((game.counters().stage, game.counters().point), (4, 3));
    assert_eq!(game.counters().kills, 3);
    assert_eq!(game.ledger().coins(), 30);
    assert_eq!(game.ledger().crystals(), 1);
    assert_eq!(game.ledger().exp(), 22);
}

#[test]
fn coin_bonus_skips_encounters_without_a_coin_reward() {
    let mut game = new_game(&quiet_pack());
    give(&mut game, PURSE);
    for _ in 0..3 {
        kill_current(&mut game);
    }
    assert_eq!(game.ledger().coins(), 12 + 22);
}

#[test]
fn zero_hp_encounter_falls_to_the_next_tap() {
    let mut pack = quiet_pack();
    pack.roster[0] = encounter("ghost", 0, Some(1), None, None);
    let mut game = new_game(&pack);
    assert_eq!(game.encounter().max_hp, 1);

    let outcome = game.tap_attack().expect("encounter is alive");
    assert!(outcome.defeat.is_some());
    assert_eq!(game.ledger().coins(), 1);
}

#[test]
fn hp_bonus_change_keeps_damage_taken() {
    let mut game = new_game(&quiet_pack());
    assert!(game.apply_damage(2).is_none());
    assert_eq!(game.encounter().current_hp, 3);

    give(&mut game, WARD);
    assert_eq!(game.encounter().max_hp, 10);
    assert_eq!(game.encounter().current_hp, 8);
    assert_eq!(game.display_hp(), 10);

    kill_current(&mut game);
    assert_eq!(game.encounter().max_hp, 13);
}

#[test]
fn tap_damage_stacks_upgrade_and_artefact_bonus() {
    let mut game = new_game(&quiet_pack());
    assert_eq!(game.tap_damage(), 1);

    let err = game.buy_tap_upgrade().unwrap_err();
    assert_eq!(
        err,
        EngineError::Ledger(LedgerError::InsufficientFunds {
            currency: Currency::Coins,
            requested: 10,
            available: 0,
        })
    );
    assert_eq!(game.progress().tap_level, 1);

    kill_current(&mut game);
    assert_eq!(game.buy_tap_upgrade(), Ok(2));
    assert_eq!(game.ledger().coins(), 0);
    assert_eq!(game.tap_upgrade_cost(), 20);

    give(&mut game, BLADE);
    assert_eq!(game.tap_damage(), 4);
}

#[test]
fn crit_multiplies_tap_damage() {
    let mut pack = quiet_pack();
    pack.catalog.push(artefact("hawk", 0.0, EffectTag::CritChance, 100));
    pack.catalog.push(artefact("axe", 0.0, EffectTag::CritDamage, 100));
    let mut game = new_game(&pack);
    give(&mut game, "hawk");
    give(&mut game, "axe");

    let outcome = game.tap_attack().expect("encounter is alive");
    assert!(outcome.crit);
    assert_eq!(outcome.damage, 2);
    assert_eq!(game.encounter().current_hp, 3);
}

#[test]
fn shard_upgrade_costs_scale_with_level() {
    let mut game = new_game(&quiet_pack());
    let blade = ArtefactId::from(BLADE);
    assert_eq!(
        game.upgrade_artefact(&blade),
        Err(EngineError::Upgrade(UpgradeError::NotOwned(blade.clone())))
    );

    give(&mut game, BLADE);
    assert_eq!(game.upgrade_artefact(&blade), Ok(2));
    assert_eq!(
        game.upgrade_artefact(&blade),
        Err(EngineError::Upgrade(UpgradeError::InsufficientShards { needed: 2, available: 0 }))
    );

    give(&mut game, BLADE);
    let owned = game.inventory().get(&blade).expect("owned");
    assert_eq!((owned.level, owned.shards), (3, 1));
}

#[test]
fn defeat_notifications_reach_the_log() {
    let mut game = new_game(&quiet_pack());
    game.take_log();
    kill_current(&mut game);

    let log = game.take_log();
    assert!(log.contains(&LogEvent::EncounterDefeated { encounter: EncounterId::from(RAT), in_event: false }));
    assert!(log.iter().any(|event| matches!(event, LogEvent::BalancesChanged { coins: 10, .. })));
    let loaded = log.iter().position(|event| matches!(event, LogEvent::EncounterLoaded { .. }));
    let submitted = log.iter().position(|event| matches!(event, LogEvent::ScoreSubmitted { .. }));
    assert!(loaded < submitted, "scores are submitted after the next encounter loads");
    assert!(game.log().is_empty());
}

#[test]
fn reset_returns_to_a_fresh_run() {
    let mut game = new_game(&quiet_pack());
    give(&mut game, BLADE);
    kill_current(&mut game);
    game.complete_quest();

    game.reset();

    assert_eq!(game.ledger(), &Ledger::default());
    assert!(game.inventory().is_empty());
    assert_eq!(game.counters(), &Counters::default());
    assert_eq!(game.progress(), &Progress::default());
    assert_eq!(game.encounter().id, EncounterId::from(RAT));
    assert!(game.log().contains(&LogEvent::ProgressReset));
}

#[test]
fn view_mirrors_engine_state() {
    let mut game = new_game(&quiet_pack());
    give(&mut game, WARD);
    kill_current(&mut game);

    let view = game.view();
    assert_eq!(view.encounter, EncounterId::from(WOLF));
    assert_eq!((view.current_hp, view.max_hp), (13, 13));
    assert_eq!((view.stage, view.point, view.kills), (2, 1, 1));
    assert_eq!(view.coins, 10);
    assert_eq!(view.exp_to_next_level, 200);
    assert_eq!(view.artefacts.len(), 1);
    assert_eq!(view.artefacts[0].total_power, 5);
}
