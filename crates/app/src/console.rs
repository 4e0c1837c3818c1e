//! Line commands for the stdin front end.

use std::str::FromStr;

use battle_core::{ArtefactId, EventId, InputPayload};

/// Most taps one `tap N` line may queue.
pub const MAX_TAPS_PER_LINE: u32 = 1_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Inputs(Vec<InputPayload>),
    Status,
    Artefacts,
    Scores,
    Save,
    Hash,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument { command: &'static str, what: &'static str },

    #[error("'{value}' is not a valid {what}")]
    InvalidArgument { value: String, what: &'static str },
}

pub const HELP: &str = "\
tap [n]            attack the current encounter n times
wait <secs>        let the battle clock run
auto on|off        toggle auto-battle
event <id>         start a timed event
ack                acknowledge an event victory
upgrade            buy a tap-damage upgrade
artefact <id>      level an owned artefact with shards
quest              record a finished quest
reset              wipe all progress
status | artefacts | scores | hash | save | quit";

pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ConsoleCommand::Status);
    };
    let arg = words.next();

    let input = |payload: InputPayload| -> Result<ConsoleCommand, ParseError> {
        Ok(ConsoleCommand::Inputs(vec![payload]))
    };
    match command {
        "tap" | "t" => {
            let count = match arg {
                Some(raw) => parse_number::<u32>(raw, "tap count")?,
                None => 1,
            };
            Ok(ConsoleCommand::Inputs(vec![InputPayload::Tap; count.min(MAX_TAPS_PER_LINE) as usize]))
        }
        "wait" => {
            let raw = arg.ok_or(ParseError::MissingArgument { command: "wait", what: "seconds" })?;
            let secs = raw
                .parse::<f64>()
                .ok()
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .ok_or_else(|| ParseError::InvalidArgument { value: raw.to_string(), what: "duration" })?;
            input(InputPayload::AdvanceClock { millis: (secs * 1_000.0) as u64 })
        }
        "auto" => match arg {
            Some("on") => input(InputPayload::SetAutoBattle { enabled: true }),
            Some("off") => input(InputPayload::SetAutoBattle { enabled: false }),
            Some(other) => Err(ParseError::InvalidArgument { value: other.to_string(), what: "auto setting" }),
            None => Err(ParseError::MissingArgument { command: "auto", what: "on or off" }),
        },
        "event" => {
            let id = arg.ok_or(ParseError::MissingArgument { command: "event", what: "an event id" })?;
            input(InputPayload::StartEvent { event: EventId::from(id) })
        }
        "ack" => input(InputPayload::AcknowledgeVictory),
        "upgrade" => input(InputPayload::BuyTapUpgrade),
        "artefact" => {
            let id = arg.ok_or(ParseError::MissingArgument { command: "artefact", what: "an artefact id" })?;
            input(InputPayload::UpgradeArtefact { artefact: ArtefactId::from(id) })
        }
        "quest" => input(InputPayload::CompleteQuest),
        "reset" => input(InputPayload::Reset),
        "status" => Ok(ConsoleCommand::Status),
        "artefacts" => Ok(ConsoleCommand::Artefacts),
        "scores" => Ok(ConsoleCommand::Scores),
        "save" => Ok(ConsoleCommand::Save),
        "hash" => Ok(ConsoleCommand::Hash),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn parse_number<T: FromStr>(raw: &str, what: &'static str) -> Result<T, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidArgument { value: raw.to_string(), what })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_shows_status() {
        assert_eq!(parse_command("   "), Ok(ConsoleCommand::Status));
    }

    #[test]
    fn tap_count_is_capped() {
        let Ok(ConsoleCommand::Inputs(inputs)) = parse_command("tap 5000") else {
            panic!("tap should parse");
        };
        assert_eq!(inputs.len(), MAX_TAPS_PER_LINE as usize);
    }

    #[test]
    fn wait_converts_seconds_to_millis() {
        assert_eq!(
            parse_command("wait 2.5"),
            Ok(ConsoleCommand::Inputs(vec![InputPayload::AdvanceClock { millis: 2_500 }]))
        );
        assert!(matches!(parse_command("wait -1"), Err(ParseError::InvalidArgument { .. })));
    }

    #[test]
    fn event_requires_an_id() {
        assert_eq!(
            parse_command("event"),
            Err(ParseError::MissingArgument { command: "event", what: "an event id" })
        );
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert_eq!(parse_command("dance"), Err(ParseError::Unknown("dance".to_string())));
    }
}
