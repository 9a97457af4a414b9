//! Error types for chess-game-core

use thiserror::Error;

use crate::domain::{Color, Position};

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("no piece at {0}")]
    NoPieceAtPosition(Position),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("path is blocked at {0}")]
    PathBlocked(Position),

    #[error("it is {color}'s turn")]
    WrongTurnOwner { color: Color },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("game {0} not found")]
    GameNotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by the player's input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPosition(_)
                | Error::NoPieceAtPosition(_)
                | Error::IllegalMove(_)
                | Error::PathBlocked(_)
                | Error::WrongTurnOwner { .. }
                | Error::InvalidState(_)
                | Error::InvalidCommand(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
