//! Textual commands: `start`, `end`, `status`, `move <from> <to>`

use std::str::FromStr;

use crate::domain::Position;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    End,
    Status,
    Move { from: Position, to: Position },
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();

        match words.as_slice() {
            ["start"] => Ok(Command::Start),
            ["end"] => Ok(Command::End),
            ["status"] => Ok(Command::Status),
            ["move", from, to] => Ok(Command::Move {
                from: from.parse()?,
                to: to.parse()?,
            }),
            ["move", ..] => Err(Error::InvalidCommand("usage: move <from> <to>, e.g. move b2 b3".into())),
            [] => Err(Error::InvalidCommand("empty command".into())),
            [verb, ..] => Err(Error::InvalidCommand(format!("unknown command '{}'", verb))),
        }
    }
}
