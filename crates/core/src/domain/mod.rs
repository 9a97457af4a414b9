//! Board, pieces and coordinates

mod board;
mod initializer;
mod piece;
mod position;

pub use board::{Board, Squares, Status};
pub use initializer::standard_squares;
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
