//! A stored game advanced one command at a time

use tracing::debug;

use crate::command::Command;
use crate::domain::{Position, Status};
use crate::error::Result;
use crate::game::{GameState, MoveOutcome};
use crate::storage::Database;

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started,
    Moved {
        from: Position,
        to: Position,
        outcome: MoveOutcome,
    },
    Status(Status),
    Ended,
}

/// A game loaded from the database. Every accepted command is written back
/// before the in-memory state changes, so a failed command leaves both the
/// stored and the loaded game as they were.
pub struct GameSession<'db> {
    db: &'db Database,
    id: i64,
    state: GameState,
}

impl<'db> GameSession<'db> {
    /// Stores a new game in `Ready`.
    pub fn create(db: &'db Database) -> Result<Self> {
        let state = GameState::new();
        let id = db.create_game(&state)?;
        Ok(Self { db, id, state })
    }

    pub fn load(db: &'db Database, id: i64) -> Result<Self> {
        let state = db.load_game(id)?;
        Ok(Self { db, id, state })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn execute(&mut self, command: Command) -> Result<Event> {
        let mut next = self.state.clone();

        let event = match command {
            Command::Start => {
                next.start()?;
                self.db.save_game(self.id, &next)?;
                Event::Started
            }
            Command::End => {
                next.end();
                self.db.save_game(self.id, &next)?;
                Event::Ended
            }
            Command::Status => return Ok(Event::Status(self.state.status()?)),
            Command::Move { from, to } => {
                let outcome = next.move_piece(from, to)?;
                self.db.save_move(self.id, &next, from, to)?;
                Event::Moved { from, to, outcome }
            }
        };

        debug!(game_id = self.id, ?command, phase = %next.phase(), "command applied");
        self.state = next;
        Ok(event)
    }
}
