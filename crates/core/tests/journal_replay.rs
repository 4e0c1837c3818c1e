use std::fs;
use std::path::Path;

use battle_core::replay::{ReplayError, replay_journal_inputs, replay_to_end};
use battle_core::{ContentPack, EngineConfig, Game, InputPayload, JournalWriter, load_journal_from_file};

/// Play a fixed command script live, writing every accepted command to `path`.
fn record_session(path: &Path, seed: u64, content: &ContentPack, commands: usize) -> Game {
    let mut game = Game::new(seed, content, EngineConfig::default()).unwrap();
    let mut writer = JournalWriter::create(path, seed, "test", content.content_hash()).unwrap();
    let script = [
        InputPayload::SetAutoBattle { enabled: true },
        InputPayload::Tap,
        InputPayload::Tap,
        InputPayload::AdvanceClock { millis: 4_000 },
        InputPayload::BuyTapUpgrade,
        InputPayload::Tap,
        InputPayload::CompleteQuest,
    ];

    for payload in script.iter().cycle().take(commands) {
        if game.apply_input(payload).is_ok() {
            writer.append(payload).unwrap();
        }
    }
    game
}

#[test]
fn test_file_journal_replay_equivalence() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("replay_equiv.jsonl");
    let content = ContentPack::default();

    let game = record_session(&journal_path, 12345, &content, 700);

    let loaded = load_journal_from_file(&journal_path).unwrap();
    let replay_result = replay_to_end(&content, &EngineConfig::default(), &loaded.journal).unwrap();
    assert_eq!(
        game.snapshot_hash(),
        replay_result.final_snapshot_hash,
        "file-journal replay must produce the same snapshot hash"
    );
    assert_eq!(replay_result.inputs_applied, game.inputs_applied());
}

#[test]
fn test_file_journal_corruption_stops_at_bad_line() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("corrupt.jsonl");
    let content = ContentPack::default();
    record_session(&journal_path, 42, &content, 6);

    let text = fs::read_to_string(&journal_path).unwrap();
    let mut lines: Vec<String> = text.lines().map(String::from).collect();
    assert!(lines.len() >= 4, "expected header + 3 records");
    lines[3] = lines[3].replace("tap", "reset");
    fs::write(&journal_path, lines.join("\n") + "\n").unwrap();

    assert!(load_journal_from_file(&journal_path).is_err(), "corrupted journal should fail to load");
}

#[test]
fn test_replay_journal_inputs_reconstructs_game_state() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("partial.jsonl");
    let content = ContentPack::default();

    let game = record_session(&journal_path, 777, &content, 40);

    let loaded = load_journal_from_file(&journal_path).unwrap();
    assert_eq!(loaded.journal.inputs.len() as u64, game.inputs_applied());

    let reconstructed = replay_journal_inputs(&content, &EngineConfig::default(), &loaded.journal).unwrap();
    assert_eq!(
        game.snapshot_hash(),
        reconstructed.snapshot_hash(),
        "reconstructed game should have the same hash as the original at that point"
    );
    assert_eq!(reconstructed.ledger(), game.ledger());
}

#[test]
fn test_replay_refuses_journal_from_other_content() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("other_content.jsonl");
    let content = ContentPack::default();
    record_session(&journal_path, 9, &content, 10);

    let mut edited = content.clone();
    edited.catalog.reverse();
    let loaded = load_journal_from_file(&journal_path).unwrap();
    let err = replay_to_end(&edited, &EngineConfig::default(), &loaded.journal).unwrap_err();
    assert!(matches!(err, ReplayError::ContentMismatch { .. }), "got {err:?}");
}
