use std::collections::BTreeSet;

use anyhow::{Result, bail, ensure};
use battle_core::replay::replay_to_end;
use battle_core::{
    BattleMode, ContentPack, CounterKind, EngineConfig, EventId, Game, InputJournal, InputPayload, LogEvent,
};
use battle_tools::init_tracing;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_input(rng: &mut ChaCha8Rng, game: &Game) -> InputPayload {
    let events: Vec<EventId> = game.content().events.iter().map(|event| event.id.clone()).collect();
    let owned: Vec<_> = game.inventory().iter().map(|owned| owned.id.clone()).collect();
    match rng.next_u64() % 100 {
        0..=54 => InputPayload::Tap,
        55..=69 => InputPayload::AdvanceClock { millis: rng.next_u64() % 20_000 },
        70..=77 => InputPayload::SetAutoBattle { enabled: rng.next_u64() % 4 != 0 },
        78..=82 if !events.is_empty() => InputPayload::StartEvent { event: choose(rng, &events) },
        83..=86 => InputPayload::AcknowledgeVictory,
        87..=91 => InputPayload::BuyTapUpgrade,
        92..=95 if !owned.is_empty() => InputPayload::UpgradeArtefact { artefact: choose(rng, &owned) },
        96..=98 => InputPayload::CompleteQuest,
        99 => InputPayload::Reset,
        _ => InputPayload::Tap,
    }
}

fn check_invariants(game: &Game, paid: &mut BTreeSet<(CounterKind, u64)>, events: &[LogEvent]) -> Result<()> {
    let encounter = game.encounter();
    ensure!(encounter.max_hp >= 1, "max hp fell to zero");
    ensure!(encounter.current_hp <= encounter.max_hp, "hp above max hp");
    ensure!(game.tap_damage() >= 1, "tap damage below one");
    ensure!(game.counters().stage >= 1, "stage below one");
    ensure!(game.ledger().exp() < game.ledger().exp_to_next_level(), "exp left un-cascaded");
    if let BattleMode::EventActive { event, cursor } = game.mode() {
        let Some(definition) = game.content().event(event) else {
            bail!("active event {event} is not in content");
        };
        ensure!(*cursor < definition.encounters.len(), "event cursor past the sequence");
    }

    for event in events {
        match event {
            LogEvent::ThresholdGranted { counter, threshold } => {
                ensure!(paid.insert((*counter, *threshold)), "threshold {counter:?}@{threshold} paid twice");
            }
            LogEvent::ProgressReset => paid.clear(),
            _ => {}
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} steps...", args.seed, args.steps);
    let content = ContentPack::default();
    let mut game = Game::new(args.seed, &content, EngineConfig::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut journal = InputJournal::new(args.seed).with_content_hash(content.content_hash());
    let mut paid = BTreeSet::new();
    let mut rejected = 0_u32;

    game.take_log();
    for _ in 0..args.steps {
        let payload = random_input(&mut rng, &game);
        let before = game.snapshot_hash();
        match game.apply_input(&payload) {
            Ok(()) => {
                journal.append(payload);
            }
            Err(_) => {
                rejected += 1;
                ensure!(game.snapshot_hash() == before, "rejected {payload:?} changed the run");
            }
        }
        let events = game.take_log();
        check_invariants(&game, &mut paid, &events)?;
    }

    let replayed = replay_to_end(&content, &EngineConfig::default(), &journal)?;
    ensure!(replayed.final_snapshot_hash == game.snapshot_hash(), "journal replay diverged from the live run");

    println!(
        "Fuzzing completed successfully: {} accepted, {} rejected, stage {}.",
        journal.inputs.len(),
        rejected,
        game.counters().stage
    );
    Ok(())
}
