//! Flat, serializable form of a game state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::state::GameState;
use crate::domain::{Board, Color, Squares};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Ready,
    WhiteTurn,
    BlackTurn,
    End,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::WhiteTurn => "white_turn",
            Phase::BlackTurn => "black_turn",
            Phase::End => "end",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Ready => "Ready",
            Phase::WhiteTurn => "White to move",
            Phase::BlackTurn => "Black to move",
            Phase::End => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ready" => Ok(Phase::Ready),
            "white_turn" => Ok(Phase::WhiteTurn),
            "black_turn" => Ok(Phase::BlackTurn),
            "end" => Ok(Phase::End),
            other => Err(Error::InvalidState(format!("unknown phase '{}'", other))),
        }
    }
}

/// Board occupancy plus whose turn it is; enough to rebuild a `GameState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub squares: Squares,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        match self {
            GameState::Ready => Phase::Ready,
            GameState::WhiteTurn(_) => Phase::WhiteTurn,
            GameState::BlackTurn(_) => Phase::BlackTurn,
            GameState::End => Phase::End,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase(),
            squares: self.board().map(|board| board.squares().clone()).unwrap_or_default(),
        }
    }

    /// Rebuilds a state. Squares are ignored for `Ready` and `End`.
    pub fn restore(snapshot: GameSnapshot) -> Self {
        match snapshot.phase {
            Phase::Ready => GameState::Ready,
            Phase::WhiteTurn => GameState::turn(Color::White, Board::from_squares(snapshot.squares)),
            Phase::BlackTurn => GameState::turn(Color::Black, Board::from_squares(snapshot.squares)),
            Phase::End => GameState::End,
        }
    }
}
