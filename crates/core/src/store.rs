//! Narrow key/value persistence seam.
//! The engine only reads and writes whole JSON blobs by key; durability, batching and
//! flush timing belong to whoever implements the trait.

use std::collections::BTreeMap;

pub mod keys {
    pub const LEDGER: &str = "ledger";
    pub const INVENTORY: &str = "inventory";
    pub const GRANTED: &str = "achievements.granted";
    pub const COUNTERS: &str = "counters";
    pub const PROGRESS: &str = "progress";
    /// Word position of the drop/crit stream, so a restart continues it instead of rewinding.
    pub const RNG: &str = "rng";

    pub const ALL: [&str; 6] = [LEDGER, INVENTORY, GRANTED, COUNTERS, PROGRESS, RNG];
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}
