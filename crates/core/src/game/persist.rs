//! Save and restore through the key/value store seam.
//! This module exists to map run state onto a handful of JSON blobs. Keys are independent;
//! a store that loses one write still yields a loadable run. It does not own flush timing.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::bootstrap::Services;
use super::*;
use crate::store::{KeyValueStore, keys};

impl Game {
    /// Write every persisted key. The encounter in flight is not saved; a restored run starts
    /// the saved roster position at full HP.
    pub fn save_to(&self, store: &mut dyn KeyValueStore) -> Result<(), EngineError> {
        put(store, keys::LEDGER, &self.ledger)?;
        put(store, keys::INVENTORY, &self.inventory)?;
        put(store, keys::GRANTED, self.achievements.granted())?;
        put(store, keys::COUNTERS, &self.counters)?;
        put(store, keys::PROGRESS, &self.progress)?;
        put(store, keys::RNG, &self.rng.get_word_pos())?;
        debug!(coins = self.ledger.coins(), stage = self.counters.stage, "run saved");
        Ok(())
    }

    /// Rebuild a run from `store`. Missing keys fall back to a fresh value; malformed ones fail.
    pub fn restore(
        seed: u64,
        content: &ContentPack,
        config: EngineConfig,
        store: &dyn KeyValueStore,
    ) -> Result<Self, EngineError> {
        let services = Services {
            ledger: get(store, keys::LEDGER)?.unwrap_or_default(),
            inventory: get(store, keys::INVENTORY)?.unwrap_or_default(),
            granted: get(store, keys::GRANTED)?.unwrap_or_default(),
            counters: get(store, keys::COUNTERS)?.unwrap_or_default(),
            progress: get(store, keys::PROGRESS)?.unwrap_or_default(),
            rng_word_pos: get(store, keys::RNG)?.unwrap_or_default(),
        };
        Self::assemble(seed, content, config, services)
    }
}

fn put<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &'static str, value: &T) -> Result<(), EngineError> {
    let blob = serde_json::to_string(value).map_err(|err| EngineError::Save { key, message: err.to_string() })?;
    store.set(key, blob);
    Ok(())
}

fn get<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &'static str) -> Result<Option<T>, EngineError> {
    let Some(blob) = store.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&blob)
        .map(Some)
        .map_err(|err| EngineError::Restore { key, message: err.to_string() })
}
