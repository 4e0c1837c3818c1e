use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::replay::replay_to_end;
use battle_core::{EventId, Game, InputJournal, JournalWriter, ReplayResult, load_journal_from_file};
use battle_tools::load::{load_config, load_content};
use battle_tools::sim::{SimPlan, simulate};
use battle_tools::init_tracing;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Content pack TOML; the built-in pack when omitted
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Engine config TOML; defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a scripted run and print a JSON summary
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 10)]
        minutes: u64,
        #[arg(long, default_value_t = 3)]
        taps_per_second: u32,
        #[arg(long)]
        no_auto: bool,
        #[arg(long)]
        no_upgrades: bool,
        /// Keep running this event whenever the roster is active
        #[arg(long)]
        event: Option<String>,
        /// Write the accepted inputs as a JSONL journal
        #[arg(long)]
        journal: Option<PathBuf>,
    },
    /// Replay a JSONL journal and print the final state
    Replay {
        /// Path to the journal JSONL file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    let content = load_content(args.content.as_deref())?;
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Simulate { seed, minutes, taps_per_second, no_auto, no_upgrades, event, journal } => {
            let plan = SimPlan {
                minutes,
                taps_per_second,
                auto_battle: !no_auto,
                buy_upgrades: !no_upgrades,
                upgrade_artefacts: !no_upgrades,
                event: event.map(EventId::new),
            };
            let mut game = Game::new(seed, &content, config).context("content cannot start a run")?;
            let mut recorded = InputJournal::new(seed).with_content_hash(content.content_hash());
            let summary = simulate(&mut game, &plan, &mut recorded);

            if let Some(path) = journal {
                let mut writer = JournalWriter::create(&path, seed, env!("CARGO_PKG_VERSION"), recorded.content_hash)
                    .with_context(|| format!("Failed to create journal file: {}", path.display()))?;
                for record in &recorded.inputs {
                    writer.append(&record.payload).context("Failed to write journal record")?;
                }
            }

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Replay { journal } => {
            let loaded = load_journal_from_file(&journal)
                .with_context(|| format!("Failed to load journal file: {}", journal.display()))?;
            let result: ReplayResult =
                replay_to_end(&content, &config, &loaded.journal).context("Replay failed during execution")?;

            println!("Replay complete.");
            println!("Inputs applied: {}", result.inputs_applied);
            println!("Mode: {:?}", result.final_mode);
            println!("Stage: {}", result.stage);
            println!("Coins: {}", result.coins);
            println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);
        }
    }

    Ok(())
}
