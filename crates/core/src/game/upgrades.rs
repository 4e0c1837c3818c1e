//! Purchased upgrades: tap damage bought with coins, artefact levels bought with shards.

use super::*;

impl Game {
    /// Coins needed to buy the next tap level.
    pub fn tap_upgrade_cost(&self) -> u64 {
        self.config.tap_upgrade_base_cost.saturating_mul(u64::from(self.progress.tap_level))
    }

    /// Returns the new tap level. A failed purchase changes nothing.
    pub fn buy_tap_upgrade(&mut self) -> Result<u32, EngineError> {
        self.ledger.spend_coins(self.tap_upgrade_cost())?;
        self.progress.tap_level += 1;
        self.log.push(LogEvent::TapUpgraded { level: self.progress.tap_level });
        self.emit_balances();
        Ok(self.progress.tap_level)
    }

    /// Spend shards to raise an owned artefact one level. Returns the new level.
    pub fn upgrade_artefact(&mut self, id: &ArtefactId) -> Result<u32, EngineError> {
        let level = self.inventory.upgrade(id, self.config.artefact_shard_cost_per_level)?;
        self.log.push(LogEvent::ArtefactUpgraded { artefact: id.clone(), level });
        self.refresh_max_hp();
        Ok(level)
    }
}
