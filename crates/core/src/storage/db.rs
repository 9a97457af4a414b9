//! Database operations

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use super::models::*;
use crate::domain::{Position, Squares};
use crate::error::{Error, Result};
use crate::game::{GameSnapshot, GameState, Phase};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                phase TEXT NOT NULL,
                board_json TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS moves (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL,
                from_pos TEXT NOT NULL,
                to_pos TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (game_id) REFERENCES games(id)
            );

            CREATE INDEX IF NOT EXISTS idx_moves_game_id ON moves(game_id);
            "#,
        )?;
        Ok(())
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }

    pub fn create_game(&self, state: &GameState) -> Result<i64> {
        let board_json = serde_json::to_string(&state.snapshot().squares)?;
        let now = Self::now();

        self.conn.execute(
            r#"
            INSERT INTO games (phase, board_json, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![state.phase().as_str(), board_json, now, now],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(game_id = id, "game created");
        Ok(id)
    }

    pub fn save_game(&self, id: i64, state: &GameState) -> Result<()> {
        let board_json = serde_json::to_string(&state.snapshot().squares)?;

        let updated = self.conn.execute(
            "UPDATE games SET phase = ?1, board_json = ?2, updated_at = ?3 WHERE id = ?4",
            params![state.phase().as_str(), board_json, Self::now(), id],
        )?;
        if updated == 0 {
            return Err(Error::GameNotFound(id));
        }

        debug!(game_id = id, phase = %state.phase(), "game saved");
        Ok(())
    }

    pub fn find_game(&self, id: i64) -> Result<Option<StoredGame>> {
        let game = self
            .conn
            .query_row(
                "SELECT id, phase, board_json, created_at, updated_at FROM games WHERE id = ?1",
                params![id],
                Self::stored_game,
            )
            .optional()?;
        Ok(game)
    }

    /// Rebuilds the state of game `id` from its stored snapshot.
    pub fn load_game(&self, id: i64) -> Result<GameState> {
        let game = self.find_game(id)?.ok_or(Error::GameNotFound(id))?;

        let phase: Phase = game.phase.parse().inspect_err(|e| {
            warn!(game_id = id, error = %e, "stored game has an unreadable phase");
        })?;
        let squares: Squares = serde_json::from_str(&game.board_json).inspect_err(|e| {
            warn!(game_id = id, error = %e, "stored game has an unreadable board");
        })?;

        Ok(GameState::restore(GameSnapshot { phase, squares }))
    }

    pub fn record_move(&self, game_id: i64, from: Position, to: Position) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO moves (game_id, from_pos, to_pos, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![game_id, from.to_string(), to.to_string(), Self::now()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Saves `state` and appends the move that produced it in one transaction.
    pub fn save_move(&self, id: i64, state: &GameState, from: Position, to: Position) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.save_game(id, state)?;
        self.record_move(id, from, to)?;
        tx.commit()?;
        Ok(())
    }

    pub fn moves(&self, game_id: i64) -> Result<Vec<StoredMove>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, game_id, from_pos, to_pos, created_at FROM moves WHERE game_id = ?1 ORDER BY id",
        )?;

        let rows = stmt
            .query_map(params![game_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, game_id, from, to, created_at)| -> Result<StoredMove> {
                Ok(StoredMove {
                    id,
                    game_id,
                    from: from.parse()?,
                    to: to.parse()?,
                    created_at,
                })
            })
            .collect()
    }

    pub fn recent_games(&self, limit: u32) -> Result<Vec<StoredGame>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, phase, board_json, created_at, updated_at FROM games ORDER BY updated_at DESC, id DESC LIMIT ?1",
        )?;

        let games = stmt
            .query_map(params![limit], Self::stored_game)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(games)
    }

    pub fn count_games(&self) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM games",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn stored_game(row: &Row<'_>) -> rusqlite::Result<StoredGame> {
        Ok(StoredGame {
            id: row.get(0)?,
            phase: row.get(1)?,
            board_json: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}
