pub mod autosave;
pub mod console;
pub mod leaderboard;
pub mod save_file;
pub mod seed;
pub mod session;

use battle_core::{BattleMode, BattleView};

/// Directory name used for the per-user data directory.
pub const APP_NAME: &str = "TapBattler";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Short status code for the current battle mode.
pub fn mode_code(mode: &BattleMode) -> String {
    match mode {
        BattleMode::Idle => "IDLE".to_string(),
        BattleMode::Normal => "NORMAL".to_string(),
        BattleMode::EventActive { event, cursor } => format!("EVENT:{event}#{cursor}"),
        BattleMode::EventWon { event } => format!("EVENT_WON:{event}"),
    }
}

/// One-line status for the stdin front end.
pub fn status_line(view: &BattleView) -> String {
    format!(
        "[{}] stage {} | {} {}/{} hp | coins {} crystals {} | lv {} ({}/{} exp) | tap {} dmg{}",
        mode_code(&view.mode),
        view.stage,
        view.encounter_name,
        view.current_hp,
        view.max_hp,
        view.coins,
        view.crystals,
        view.level,
        view.exp,
        view.exp_to_next_level,
        view.tap_damage,
        if view.auto_battle { " | auto" } else { "" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::EventId;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(255), "0x00000000000000ff");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
    }

    #[test]
    fn mode_codes_name_the_event_and_cursor() {
        assert_eq!(mode_code(&BattleMode::Normal), "NORMAL");
        let event = EventId::from("harvest_moon");
        assert_eq!(
            mode_code(&BattleMode::EventActive { event: event.clone(), cursor: 2 }),
            "EVENT:harvest_moon#2"
        );
        assert_eq!(mode_code(&BattleMode::EventWon { event }), "EVENT_WON:harvest_moon");
    }
}
