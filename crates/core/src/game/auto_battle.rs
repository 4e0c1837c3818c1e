//! Clock-driven auto-battle and playtime accrual.
//! This module exists to turn elapsed wall time into serialized taps on the same `&mut Game`
//! UI taps use. It does not own a timer; the host decides when to call `advance_clock`.

use std::time::Duration;

use tracing::debug;

use super::*;

const MILLIS_PER_MINUTE: u64 = 60_000;

impl Game {
    pub fn auto_battle_enabled(&self) -> bool {
        self.auto.enabled
    }

    /// Toggling on starts a fresh cadence; toggling to the current state is a no-op.
    pub fn set_auto_battle(&mut self, enabled: bool) {
        if self.auto.enabled == enabled {
            return;
        }
        self.auto = AutoBattle { enabled, carry_secs: 0.0 };
        self.log.push(LogEvent::AutoBattleChanged { enabled });
    }

    /// Seconds between auto taps under the current attack-speed bonus.
    pub fn auto_interval_secs(&self) -> f64 {
        let attack_speed = self.bonuses().attack_speed;
        let scaled = self.config.base_auto_interval_secs * (1.0 - attack_speed / 100.0);
        let floor = if self.config.min_auto_interval_secs > 0.0 {
            self.config.min_auto_interval_secs
        } else {
            EngineConfig::MIN_AUTO_INTERVAL_SECS
        };
        if scaled.is_nan() { floor } else { scaled.max(floor) }
    }

    /// Accrue playtime and run any auto taps that fell due. Liveness is re-checked before
    /// every tap and the first defeat switches auto-battle off.
    pub fn advance_clock(&mut self, elapsed: Duration) -> ClockReport {
        let mut report = ClockReport { playtime_minutes: self.accrue_playtime(elapsed), ..ClockReport::default() };
        if !self.auto.enabled {
            return report;
        }

        self.auto.carry_secs += elapsed.as_secs_f64();
        loop {
            let interval = self.auto_interval_secs();
            if self.auto.carry_secs < interval {
                break;
            }
            if report.taps >= self.config.max_auto_taps_per_advance {
                debug!(taps = report.taps, "auto-battle backlog dropped");
                self.auto.carry_secs = 0.0;
                break;
            }
            self.auto.carry_secs -= interval;

            if !self.accepts_damage() {
                self.set_auto_battle(false);
                report.auto_disabled = true;
                break;
            }
            let Some(outcome) = self.tap_attack() else {
                break;
            };
            report.taps += 1;
            if outcome.defeat.is_some() {
                report.defeats += 1;
                self.set_auto_battle(false);
                report.auto_disabled = true;
                break;
            }
        }
        report
    }

    /// Whole minutes credited by this advance; sub-minute remainders carry over.
    fn accrue_playtime(&mut self, elapsed: Duration) -> u64 {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let carry = self.counters.playtime_carry_ms.saturating_add(millis);
        let minutes = carry / MILLIS_PER_MINUTE;
        self.counters.playtime_carry_ms = carry % MILLIS_PER_MINUTE;
        self.bump_counter(CounterKind::Playtime, minutes);
        minutes
    }
}
