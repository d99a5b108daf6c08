use std::{error::Error, fmt};

use block_world_core::{BlockKind, Command, Direction};

/// Separates commands within a script.
const COMMAND_DELIMITER: char = ',';
/// Separates a command from its argument.
const ARGUMENT_DELIMITER: char = ':';

/// Parses a comma-separated command script such as
/// `north,east,dig,place:wood,block:south`.
///
/// Blank entries are skipped, so an empty script yields no commands.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .split(COMMAND_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_command)
        .collect()
}

fn parse_command(token: &str) -> Result<Command, ScriptError> {
    let lowered = token.to_ascii_lowercase();
    let (name, argument) = match lowered.split_once(ARGUMENT_DELIMITER) {
        Some((name, argument)) => (name.trim(), Some(argument.trim())),
        None => (lowered.as_str(), None),
    };

    match (name, argument) {
        ("dig", None) => Ok(Command::Dig),
        ("place", Some(kind)) => Ok(Command::PlaceBlock {
            kind: parse_kind(kind)?,
        }),
        ("block", Some(direction)) => Ok(Command::MoveBlock {
            direction: parse_direction(direction)?,
        }),
        ("place" | "block", None) => Err(ScriptError::MissingArgument(name.to_owned())),
        (_, None) => parse_direction(name)
            .map(|direction| Command::MoveBuilder { direction })
            .map_err(|_| ScriptError::UnknownCommand(token.to_owned())),
        (_, Some(_)) => Err(ScriptError::UnknownCommand(token.to_owned())),
    }
}

fn parse_direction(name: &str) -> Result<Direction, ScriptError> {
    Direction::ALL
        .into_iter()
        .find(|direction| direction.name() == name)
        .ok_or_else(|| ScriptError::UnknownDirection(name.to_owned()))
}

fn parse_kind(name: &str) -> Result<BlockKind, ScriptError> {
    BlockKind::ALL
        .into_iter()
        .find(|kind| kind.name() == name)
        .ok_or_else(|| ScriptError::UnknownBlock(name.to_owned()))
}

/// Errors that can occur while parsing a command script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The token names no known command.
    UnknownCommand(String),
    /// The command requires an argument after `:`.
    MissingArgument(String),
    /// The argument is not a direction name.
    UnknownDirection(String),
    /// The argument is not a block kind name.
    UnknownBlock(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(token) => write!(f, "unknown command '{token}'"),
            Self::MissingArgument(name) => {
                write!(f, "command '{name}' needs an argument, as in '{name}:<value>'")
            }
            Self::UnknownDirection(name) => write!(f, "'{name}' is not a direction"),
            Self::UnknownBlock(name) => write!(f, "'{name}' is not a block kind"),
        }
    }
}

impl Error for ScriptError {}
