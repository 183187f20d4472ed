//! Parsing of interactive player input.

use maze_chase_core::{Direction, DirectionError, Position};
use thiserror::Error;

/// Action requested by one line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Move(Direction),
    Restart,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("enter a direction, a neighbouring cell as `row column`, `restart` or `quit`")]
    Empty,
    #[error("`{0}` is not a valid cell")]
    InvalidCell(String),
    #[error(transparent)]
    Direction(#[from] DirectionError),
}

/// Interprets a line as a direction name, a target cell next to `player`,
/// or a session command.
pub(crate) fn parse_input(line: &str, player: Position) -> Result<Input, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "restart" | "r" => return Ok(Input::Restart),
        _ => {}
    }

    let mut parts = trimmed.split_whitespace();
    if let (Some(row), Some(column), None) = (parts.next(), parts.next(), parts.next()) {
        let row_change = offset(row, player.row(), trimmed)?;
        let column_change = offset(column, player.column(), trimmed)?;
        return Ok(Input::Move(Direction::from_delta(row_change, column_change)?));
    }

    Ok(Input::Move(trimmed.parse()?))
}

fn offset(target: &str, current: u32, line: &str) -> Result<i32, InputError> {
    let invalid = || InputError::InvalidCell(line.to_owned());
    let target: u32 = target.parse().map_err(|_| invalid())?;
    i32::try_from(i64::from(target) - i64::from(current)).map_err(|_| invalid())
}
