//! Chess Game Core Library
//!
//! Board and move validation, the turn state machine, and the collaborators
//! around them: command parsing, text rendering and SQLite persistence.

pub mod command;
pub mod domain;
pub mod error;
pub mod game;
pub mod session;
pub mod storage;
pub mod view;

pub use command::Command;
pub use domain::{Board, Color, Piece, PieceKind, Position, Status};
pub use error::{Error, Result};
pub use game::{GameSnapshot, GameState, MoveOutcome, Phase};
pub use session::{Event, GameSession};
pub use storage::Database;
