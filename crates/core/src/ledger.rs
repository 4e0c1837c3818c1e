//! Economy ledger: coins, crystals and account level/exp.
//! Balances never go negative; a failed spend leaves every balance untouched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::LedgerError;
use crate::types::Currency;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    coins: u64,
    crystals: u64,
    level: u32,
    exp: u64,
    #[serde(skip, default = "default_exp_per_level")]
    exp_per_level: u64,
}

fn default_exp_per_level() -> u64 {
    EngineConfig::DEFAULT_EXP_PER_LEVEL
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT_EXP_PER_LEVEL)
    }
}

impl Ledger {
    pub fn new(exp_per_level: u64) -> Self {
        Self { coins: 0, crystals: 0, level: 1, exp: 0, exp_per_level: exp_per_level.max(1) }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn crystals(&self) -> u64 {
        self.crystals
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u64 {
        self.exp
    }

    /// Exp required to leave the current level.
    pub fn exp_to_next_level(&self) -> u64 {
        u64::from(self.level).saturating_mul(self.exp_per_level)
    }

    pub(crate) fn set_exp_per_level(&mut self, exp_per_level: u64) {
        self.exp_per_level = exp_per_level.max(1);
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn spend_coins(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.coins = debit(Currency::Coins, self.coins, amount)?;
        Ok(())
    }

    pub fn add_crystals(&mut self, amount: u64) {
        self.crystals = self.crystals.saturating_add(amount);
    }

    /// Spending zero always succeeds.
    pub fn spend_crystals(&mut self, amount: u64) -> Result<(), LedgerError> {
        self.crystals = debit(Currency::Crystals, self.crystals, amount)?;
        Ok(())
    }

    /// Credit exp and roll over as many levels as the grant covers. Returns levels gained.
    /// Level saturates at `u32::MAX`; exp past that point stays banked.
    pub fn add_exp(&mut self, amount: u64) -> u32 {
        if amount == 0 {
            return 0;
        }
        self.exp = self.exp.saturating_add(amount);
        let gained = levels_covered(self.level, self.exp_per_level, self.exp);
        if gained > 0 {
            let cost = cost_of_levels(self.level, self.exp_per_level, gained);
            self.exp = (u128::from(self.exp) - cost) as u64;
            self.level += gained;
            info!(level = self.level, exp = self.exp, gained, "account level up");
        }
        gained
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.exp_per_level);
    }
}

/// Exp needed to climb `count` levels starting at `level`: `per_level * (level + .. + level + count - 1)`.
fn cost_of_levels(level: u32, per_level: u64, count: u32) -> u128 {
    let (level, count) = (u128::from(level), u128::from(count));
    let steps = count * level + count * count.saturating_sub(1) / 2;
    u128::from(per_level).saturating_mul(steps)
}

/// Largest level count whose cost fits in `exp`, bounded by the level ceiling.
fn levels_covered(level: u32, per_level: u64, exp: u64) -> u32 {
    let (mut low, mut high) = (0_u32, u32::MAX - level);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if cost_of_levels(level, per_level, mid) <= u128::from(exp) {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

fn debit(currency: Currency, balance: u64, amount: u64) -> Result<u64, LedgerError> {
    balance.checked_sub(amount).ok_or(LedgerError::InsufficientFunds {
        currency,
        requested: amount,
        available: balance,
    })
}
