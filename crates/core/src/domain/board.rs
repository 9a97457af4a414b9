//! The board: who stands where, path queries and material score

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::initializer::standard_squares;
use super::piece::{Color, Piece};
use super::position::Position;
use crate::error::{Error, Result};

/// Occupied squares. Squares not present are empty.
pub type Squares = BTreeMap<Position, Piece>;

/// Material score of both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub white: f64,
    pub black: f64,
}

impl Status {
    pub fn score(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: Squares,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting arrangement.
    pub fn standard() -> Self {
        Self::from_squares(standard_squares())
    }

    pub fn from_squares(squares: impl IntoIterator<Item = (Position, Piece)>) -> Self {
        Self {
            squares: squares.into_iter().collect(),
        }
    }

    /// True iff the occupancy is exactly the starting arrangement.
    pub fn is_initial(&self) -> bool {
        self.squares == standard_squares()
    }

    /// Moves the piece at `from` to `to`, capturing whatever stood there.
    ///
    /// The board is left untouched when the move is rejected.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>> {
        let piece = *self.piece(from)?;
        piece.check_move_legality(self, from, to)?;

        self.squares.remove(&from);
        Ok(self.squares.insert(to, piece))
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.squares.get(&position)
    }

    pub fn piece(&self, position: Position) -> Result<&Piece> {
        self.piece_at(position)
            .ok_or(Error::NoPieceAtPosition(position))
    }

    pub fn has_piece(&self, position: Position) -> bool {
        self.squares.contains_key(&position)
    }

    pub fn is_matched_color(&self, position: Position, color: Color) -> Result<bool> {
        Ok(self.piece(position)?.is_same_color(color))
    }

    /// True iff a piece stands on `from`'s file strictly between the two ranks.
    pub fn has_piece_in_file(&self, from: Position, to: Position) -> bool {
        self.piece_in_file(from, to).is_some()
    }

    /// True iff a piece stands on `from`'s rank strictly between the two files.
    pub fn has_piece_in_rank(&self, from: Position, to: Position) -> bool {
        self.piece_in_rank(from, to).is_some()
    }

    pub(crate) fn piece_in_file(&self, from: Position, to: Position) -> Option<Position> {
        let (min_rank, max_rank) = from.rank_span(&to);
        self.squares
            .keys()
            .find(|p| p.file() == from.file() && p.rank() > min_rank && p.rank() < max_rank)
            .copied()
    }

    pub(crate) fn piece_in_rank(&self, from: Position, to: Position) -> Option<Position> {
        let (min_file, max_file) = from.file_span(&to);
        self.squares
            .keys()
            .find(|p| p.rank() == from.rank() && p.file() > min_file && p.file() < max_file)
            .copied()
    }

    /// Fails with `PathBlocked` if any square strictly between `from` and `to`
    /// on their shared diagonal is occupied.
    pub fn check_piece_in_diagonal(&self, from: Position, to: Position) -> Result<()> {
        let file_delta = from.file_delta(&to);
        let rank_delta = from.rank_delta(&to);
        if file_delta == 0 || file_delta.abs() != rank_delta.abs() {
            return Err(Error::IllegalMove(format!("{} and {} are not on a diagonal", from, to)));
        }

        let (file_step, rank_step) = (file_delta.signum(), rank_delta.signum());
        for distance in 1..file_delta.abs() {
            if let Some(square) = from.offset(file_step * distance, rank_step * distance) {
                self.check_has_piece(square)?;
            }
        }
        Ok(())
    }

    pub fn check_has_piece(&self, position: Position) -> Result<()> {
        if self.has_piece(position) {
            return Err(Error::PathBlocked(position));
        }
        Ok(())
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.squares
            .values()
            .any(|piece| piece.is_same_color(color) && piece.is_king())
    }

    /// Material score for `color`. Pawns sharing a file with another pawn of
    /// the same colour count half.
    pub fn compute_score(&self, color: Color) -> f64 {
        self.squares
            .iter()
            .filter(|(_, piece)| piece.is_same_color(color))
            .map(|(position, piece)| {
                if piece.is_pawn() && self.pawns_in_file(position.file(), color) > 1 {
                    piece.score() / 2.0
                } else {
                    piece.score()
                }
            })
            .sum()
    }

    pub fn status(&self) -> Status {
        Status {
            white: self.compute_score(Color::White),
            black: self.compute_score(Color::Black),
        }
    }

    /// Read-only view of the occupied squares.
    pub fn squares(&self) -> &Squares {
        &self.squares
    }

    pub fn piece_count(&self) -> usize {
        self.squares.len()
    }

    fn pawns_in_file(&self, file: u8, color: Color) -> usize {
        self.squares
            .iter()
            .filter(|(position, piece)| {
                position.file() == file && piece.is_pawn() && piece.is_same_color(color)
            })
            .count()
    }
}
