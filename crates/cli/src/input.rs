//! Parsing of typed player commands.
use combat_core::{AbilityId, ItemId, Position};
use combat_runtime::CombatCommand;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Parses one line such as `move 3 4`, `attack`, `target 5 4` or `confirm`.
pub fn parse_command(line: &str) -> Result<CombatCommand, ParseCommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(ParseCommandError::Empty)?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match verb.as_str() {
        "move" | "m" => CombatCommand::Move(position("move", &args)?),
        "attack" | "a" => CombatCommand::Attack,
        "ability" => CombatCommand::SelectAbility(AbilityId(number("ability", &args)?)),
        "item" => CombatCommand::SelectItem(ItemId(number("item", &args)?)),
        "target" | "t" => CombatCommand::SelectTarget(position("target", &args)?),
        "confirm" | "c" => CombatCommand::Confirm,
        "cancel" => CombatCommand::Cancel,
        "defend" | "d" => CombatCommand::Defend,
        "end" | "wait" => CombatCommand::EndTurn,
        "quit" | "abort" => CombatCommand::Abort,
        _ => return Err(ParseCommandError::Unknown(verb)),
    };
    Ok(command)
}

fn parse<T: std::str::FromStr>(word: &str) -> Result<T, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::InvalidNumber(word.to_owned()))
}

fn position(command: &'static str, args: &[&str]) -> Result<Position, ParseCommandError> {
    match args {
        [x, z, ..] => Ok(Position::new(parse(x)?, parse(z)?)),
        _ => Err(ParseCommandError::MissingArgument {
            command,
            expected: "x z",
        }),
    }
}

fn number(command: &'static str, args: &[&str]) -> Result<u16, ParseCommandError> {
    match args.first() {
        Some(id) => parse(id),
        None => Err(ParseCommandError::MissingArgument {
            command,
            expected: "an id",
        }),
    }
}
