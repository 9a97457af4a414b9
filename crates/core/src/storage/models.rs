//! Database models

use serde::{Deserialize, Serialize};

use crate::domain::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: i64,
    pub phase: String,
    pub board_json: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMove {
    pub id: i64,
    pub game_id: i64,
    pub from: Position,
    pub to: Position,
    pub created_at: i64,
}
