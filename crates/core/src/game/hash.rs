//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from battle control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    /// Digest of every value that a replay must reproduce. Floats enter as raw bits.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u128(self.rng.get_word_pos());
        hasher.write_u64(self.inputs_applied);

        hasher.write_u64(self.ledger.coins());
        hasher.write_u64(self.ledger.crystals());
        hasher.write_u32(self.ledger.level());
        hasher.write_u64(self.ledger.exp());

        for counter in CounterKind::ALL {
            hasher.write_u64(self.counters.get(counter));
        }
        hasher.write_u64(self.counters.point);
        hasher.write_u64(self.counters.playtime_carry_ms);
        hasher.write_usize(self.progress.roster_index);
        hasher.write_u32(self.progress.tap_level);

        for owned in self.inventory.iter() {
            hasher.write(owned.id.as_str().as_bytes());
            hasher.write_u32(owned.level);
            hasher.write_u64(owned.shards);
        }
        for (counter, threshold) in self.achievements.granted().iter() {
            hasher.write(counter.key().as_bytes());
            hasher.write_u64(threshold);
        }

        match &self.mode {
            BattleMode::Idle => hasher.write_u8(0),
            BattleMode::Normal => hasher.write_u8(1),
            BattleMode::EventActive { event, cursor } => {
                hasher.write_u8(2);
                hasher.write(event.as_str().as_bytes());
                hasher.write_usize(*cursor);
            }
            BattleMode::EventWon { event } => {
                hasher.write_u8(3);
                hasher.write(event.as_str().as_bytes());
            }
        }
        hasher.write(self.encounter.id.as_str().as_bytes());
        hasher.write_u64(self.encounter.max_hp);
        hasher.write_u64(self.encounter.current_hp);
        hasher.write_u8(u8::from(self.auto.enabled));
        hasher.write_u64(self.auto.carry_secs.to_bits());
        hasher.finish()
    }
}
