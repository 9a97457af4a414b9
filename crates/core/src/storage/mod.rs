//! SQLite storage for games and their move logs

mod db;
mod models;

pub use db::Database;
pub use models::*;
