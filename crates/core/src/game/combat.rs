//! Tap resolution and damage application.
//! This module exists to turn a tap into a damage number and route HP changes.
//! It does not own defeat consequences; those live in the defeat pipeline.

use super::*;

impl Game {
    /// Upgrade damage plus the artefact tap bonus, never below 1.
    pub fn tap_damage(&self) -> u64 {
        self.config
            .base_tap_damage
            .saturating_mul(u64::from(self.progress.tap_level))
            .saturating_add(self.bonuses().tap_damage)
            .max(1)
    }

    /// Resolve one tap. Returns `None` without consuming randomness when the encounter is
    /// already down or an event victory is waiting for acknowledgement.
    pub fn tap_attack(&mut self) -> Option<TapOutcome> {
        if !self.accepts_damage() {
            return None;
        }
        let bonuses = self.bonuses();
        let base = self.tap_damage();
        let roll = self.unit_draw() * 100.0;
        let crit = roll <= bonuses.crit_chance;
        let damage = if crit {
            let multiplier = 1.0 + bonuses.crit_damage / 100.0;
            ((base as f64) * multiplier).floor().max(0.0) as u64
        } else {
            base
        };
        let defeat = self.deal_damage(damage, crit);
        Some(TapOutcome { damage, crit, defeat })
    }

    /// Apply raw damage to the current encounter. Ignored when HP is already 0.
    pub fn apply_damage(&mut self, amount: u64) -> Option<DefeatReport> {
        if !self.accepts_damage() {
            return None;
        }
        self.deal_damage(amount, false)
    }

    pub(super) fn accepts_damage(&self) -> bool {
        self.encounter.current_hp > 0 && !matches!(self.mode, BattleMode::EventWon { .. } | BattleMode::Idle)
    }

    fn deal_damage(&mut self, amount: u64, crit: bool) -> Option<DefeatReport> {
        self.encounter.current_hp = self.encounter.current_hp.saturating_sub(amount);
        self.log.push(LogEvent::DamageDealt {
            amount,
            crit,
            remaining_hp: self.encounter.current_hp,
        });
        if self.encounter.current_hp == 0 { Some(self.on_defeat()) } else { None }
    }

    /// Re-derive max HP after the HP bonus changed. Damage already taken carries over, and a
    /// living encounter never drops to 0 this way.
    pub(super) fn refresh_max_hp(&mut self) {
        if self.encounter.current_hp == 0 {
            return;
        }
        let max_hp = self.display_hp();
        if max_hp == self.encounter.max_hp {
            return;
        }
        let taken = self.encounter.max_hp.saturating_sub(self.encounter.current_hp);
        self.encounter.max_hp = max_hp;
        self.encounter.current_hp = max_hp.saturating_sub(taken).clamp(1, max_hp);
    }
}
