//! Defeat pipeline.
//! This module exists to run everything that follows an encounter reaching 0 HP, exactly once
//! per death and in a fixed order. It does not own damage resolution or reward tables.

use tracing::{debug, info};

use super::*;

impl Game {
    pub(super) fn on_defeat(&mut self) -> DefeatReport {
        let encounter = self.encounter.id.clone();
        let in_event = self.mode.is_event();
        debug!(encounter = %encounter, in_event, "encounter defeated");
        self.log.push(LogEvent::EncounterDefeated { encounter: encounter.clone(), in_event });

        let dropped = self.roll_artefact_drop();
        self.bump_counter(CounterKind::Kills, 1);

        let progression = match self.mode.clone() {
            BattleMode::EventActive { event, cursor } => self.advance_event(event, cursor),
            _ => self.advance_stage(),
        };
        DefeatReport { encounter, dropped, progression }
    }

    fn advance_stage(&mut self) -> DefeatProgression {
        let reward = self.grant_encounter_reward(self.encounter.reward);

        self.progress.roster_index = (self.progress.roster_index + 1) % self.content.roster.len();
        self.counters.stage = self.counters.stage.saturating_add(1);
        self.counters.point = self.counters.point.saturating_add(1);
        self.log.push(LogEvent::CounterChanged { counter: CounterKind::Stage, value: self.counters.stage });

        for counter in CounterKind::SUBMITTED {
            self.check_counter(counter);
        }
        self.load_roster_encounter();
        for counter in CounterKind::SUBMITTED {
            let value = self.counters.get(counter);
            self.log.push(LogEvent::ScoreSubmitted { counter, value });
        }

        DefeatProgression::StageCleared { reward, next_stage: self.counters.stage }
    }

    fn advance_event(&mut self, event: EventId, cursor: usize) -> DefeatProgression {
        let next = cursor + 1;
        let spec = self
            .content
            .event(&event)
            .and_then(|definition| definition.encounters.get(next))
            .map(|spec| spec.resolve(next));

        if let Some(config) = spec {
            self.mode = BattleMode::EventActive { event: event.clone(), cursor: next };
            self.log.push(LogEvent::EventAdvanced { event, cursor: next });
            self.load_encounter(config);
            return DefeatProgression::EventAdvanced { cursor: next };
        }

        let bonus_crystals = self.config.event_completion_crystals;
        self.ledger.add_crystals(bonus_crystals);
        info!(event = %event, bonus_crystals, "event won");
        self.mode = BattleMode::EventWon { event: event.clone() };
        self.log.push(LogEvent::EventWon { event, bonus_crystals });
        self.emit_balances();
        DefeatProgression::EventWon { bonus_crystals }
    }
}
