//! Server settings from the environment

use std::env;

const DEFAULT_DB_PATH: &str = "chess_game.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub bind_addr: String,
}

impl Config {
    /// Reads `CHESS_DB_PATH` and `CHESS_BIND_ADDR`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_path: lookup("CHESS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            bind_addr: lookup("CHESS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}
