//! Headless stdin front end: one engine, one command queue, file-backed saves.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use battle_app::autosave::Autosave;
use battle_app::console::{ConsoleCommand, HELP, parse_command};
use battle_app::leaderboard::BestScores;
use battle_app::save_file::FileStore;
use battle_app::seed::{choose_seed, generate_runtime_seed};
use battle_app::session::Session;
use battle_app::{format_seed, format_snapshot_hash, status_line};
use battle_core::{ContentPack, CounterKind, EngineConfig, Game, JournalWriter, LogEvent};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; defaults to the saved seed, then a generated one
    #[arg(long)]
    seed: Option<u64>,

    /// Save file path; defaults to the per-user data directory
    #[arg(long)]
    save: Option<PathBuf>,

    /// Ignore any existing save and start from stage 1
    #[arg(long)]
    fresh: bool,

    /// Record accepted inputs to a JSONL journal for replay
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Seconds between autosave flushes
    #[arg(long, default_value_t = 30)]
    autosave_secs: u64,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let save_path = match args.save {
        Some(path) => path,
        None => FileStore::default_path().context("no per-user data directory available")?,
    };
    let mut store = FileStore::open(&save_path)
        .with_context(|| format!("failed to open save file: {}", save_path.display()))?;

    let content = ContentPack::build_default();
    let config = EngineConfig::default();
    let seed = choose_seed(args.seed, store.seed(), generate_runtime_seed());
    info!(seed = seed.value(), source = seed.source(), save = %save_path.display(), "starting run");

    let resume = !args.fresh && !store.is_empty();
    let game = if resume {
        Game::restore(seed.value(), &content, config, &store).context("save file could not be restored")?
    } else {
        Game::new(seed.value(), &content, config).context("built-in content is invalid")?
    };

    let mut journal = match &args.journal {
        Some(path) => {
            ensure!(!resume, "--journal records from stage 1; pass --fresh to start a new run");
            let writer =
                JournalWriter::create(path, seed.value(), env!("CARGO_PKG_VERSION"), content.content_hash())
                    .with_context(|| format!("failed to create journal: {}", path.display()))?;
            Some(writer)
        }
        None => None,
    };

    let autosave = Autosave::new(Duration::from_secs(args.autosave_secs));
    let mut session = Session::new(game, BestScores::default(), autosave);

    println!("seed {} ({})", format_seed(seed.value()), seed.source());
    println!("{}", status_line(&session.game().view()));

    let stdin = io::stdin();
    let mut last_line = Instant::now();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let elapsed = last_line.elapsed();
        last_line = Instant::now();

        // Wall time passes for the battle clock before the command lands.
        session.enqueue_tick(elapsed);

        let command = match parse_command(&line) {
            Ok(ConsoleCommand::Inputs(inputs)) => {
                session.enqueue_all(inputs);
                None
            }
            Ok(command) => Some(command),
            Err(err) => {
                println!("{err}");
                None
            }
        };

        let report = session.drain();
        for event in &report.events {
            if let Some(text) = describe_event(event) {
                println!("  {text}");
            }
        }
        for (payload, err) in &report.rejected {
            println!("  rejected {payload:?}: {err}");
        }
        if let Some(writer) = journal.as_mut() {
            for payload in session.take_accepted_inputs() {
                writer.append(&payload).context("failed to append to journal")?;
            }
        }

        match command {
            Some(ConsoleCommand::Quit) => break,
            Some(ConsoleCommand::Help) => println!("{HELP}"),
            Some(ConsoleCommand::Artefacts) => print_artefacts(session.game()),
            Some(ConsoleCommand::Scores) => print_scores(session.scores()),
            Some(ConsoleCommand::Hash) => {
                println!("snapshot {}", format_snapshot_hash(session.game().snapshot_hash()));
            }
            Some(ConsoleCommand::Save) => {
                if session.flush_now(&mut store).context("save failed")? {
                    println!("saved to {}", store.path().display());
                } else {
                    println!("nothing changed since the last save");
                }
            }
            Some(ConsoleCommand::Status | ConsoleCommand::Inputs(_)) | None => {}
        }

        println!("{}", status_line(&session.game().view()));
        session.flush_if_due(elapsed, &mut store).context("autosave failed")?;
        io::stdout().flush()?;
    }

    session.flush_now(&mut store).context("final save failed")?;
    info!(inputs = session.game().inputs_applied(), "session closed");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(io::stderr).init();
}

fn describe_event(event: &LogEvent) -> Option<String> {
    match event {
        LogEvent::EncounterDefeated { encounter, .. } => Some(format!("{encounter} defeated")),
        LogEvent::ArtefactDropped { artefact } => Some(format!("drop: {artefact}")),
        LogEvent::ArtefactAcquired { artefact, level } => Some(format!("{artefact} is now level {level}")),
        LogEvent::ArtefactUpgraded { artefact, level } => Some(format!("{artefact} upgraded to level {level}")),
        LogEvent::LevelUp { level } => Some(format!("level up! now level {level}")),
        LogEvent::ThresholdGranted { counter, threshold } => {
            Some(format!("achievement: {} {threshold}", counter.key()))
        }
        LogEvent::EventStarted { event } => Some(format!("event {event} started")),
        LogEvent::EventWon { event, bonus_crystals } => {
            Some(format!("event {event} won, +{bonus_crystals} crystals (ack to return)"))
        }
        LogEvent::TapUpgraded { level } => Some(format!("tap level {level}")),
        LogEvent::ProgressReset => Some("progress reset".to_string()),
        _ => None,
    }
}

fn print_artefacts(game: &Game) {
    let view = game.view();
    if view.artefacts.is_empty() {
        println!("no artefacts yet");
    }
    for artefact in &view.artefacts {
        println!(
            "  {} ({:?}) lv {} shards {} power {}",
            artefact.name, artefact.rarity, artefact.level, artefact.shards, artefact.total_power
        );
    }
}

fn print_scores(scores: &BestScores) {
    for counter in CounterKind::SUBMITTED {
        match scores.best(counter) {
            Some(value) => println!("  {}: {value}", counter.key()),
            None => println!("  {}: -", counter.key()),
        }
    }
}
