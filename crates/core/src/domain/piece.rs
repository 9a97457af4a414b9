//! Pieces and their movement rules

use serde::{Deserialize, Serialize};
use std::fmt;

use super::board::Board;
use super::position::Position;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Direction pawns of this colour advance in, as a rank delta.
    fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pawns of this colour start on.
    fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Material value. The king is never counted.
    pub fn score(&self) -> f64 {
        match self {
            PieceKind::Pawn => 1.0,
            PieceKind::Rook => 5.0,
            PieceKind::Knight => 2.5,
            PieceKind::Bishop => 3.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// A piece on the board.
///
/// Pieces are plain values: two pieces of the same colour and kind are
/// interchangeable, and moving one replaces the occupant of a square
/// rather than mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn is_same_color(&self, color: Color) -> bool {
        self.color == color
    }

    pub fn is_pawn(&self) -> bool {
        self.kind == PieceKind::Pawn
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    pub fn score(&self) -> f64 {
        self.kind.score()
    }

    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }

    /// Checks that moving this piece from `from` to `to` obeys its movement
    /// rules on `board`. Does not touch the board.
    pub fn check_move_legality(&self, board: &Board, from: Position, to: Position) -> Result<()> {
        if let Some(target) = board.piece_at(to) {
            if target.is_same_color(self.color) {
                return Err(Error::IllegalMove("destination occupied by own piece".into()));
            }
        }

        match self.kind {
            PieceKind::Pawn => self.check_pawn(board, from, to),
            PieceKind::Rook => check_rook(board, from, to),
            PieceKind::Knight => check_knight(from, to),
            PieceKind::Bishop => check_bishop(board, from, to),
            PieceKind::Queen => check_queen(board, from, to),
            PieceKind::King => check_king(from, to),
        }
    }

    fn check_pawn(&self, board: &Board, from: Position, to: Position) -> Result<()> {
        let forward = self.color.forward();
        let file_delta = from.file_delta(&to);
        let rank_delta = from.rank_delta(&to);
        let capturing = board.has_piece(to);

        let advances = file_delta == 0
            && !capturing
            && (rank_delta == forward
                || (rank_delta == 2 * forward && from.rank() == self.color.pawn_rank()));
        let captures = file_delta.abs() == 1 && rank_delta == forward && capturing;

        if advances || captures {
            return Ok(());
        }
        Err(Error::IllegalMove(
            "pawns move forward, two squares from their start, and capture diagonally".into(),
        ))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind.as_str())
    }
}

fn is_straight(from: Position, to: Position) -> bool {
    from != to && (from.file() == to.file() || from.rank() == to.rank())
}

fn is_diagonal(from: Position, to: Position) -> bool {
    let file_delta = from.file_delta(&to);
    file_delta != 0 && file_delta.abs() == from.rank_delta(&to).abs()
}

fn check_straight_path(board: &Board, from: Position, to: Position) -> Result<()> {
    let blocker = if from.file() == to.file() {
        board.piece_in_file(from, to)
    } else {
        board.piece_in_rank(from, to)
    };
    match blocker {
        Some(position) => Err(Error::PathBlocked(position)),
        None => Ok(()),
    }
}

fn check_rook(board: &Board, from: Position, to: Position) -> Result<()> {
    if !is_straight(from, to) {
        return Err(Error::IllegalMove("rooks move along files and ranks only".into()));
    }
    check_straight_path(board, from, to)
}

fn check_bishop(board: &Board, from: Position, to: Position) -> Result<()> {
    if !is_diagonal(from, to) {
        return Err(Error::IllegalMove("bishops move diagonally only".into()));
    }
    board.check_piece_in_diagonal(from, to)
}

fn check_queen(board: &Board, from: Position, to: Position) -> Result<()> {
    if is_straight(from, to) {
        return check_straight_path(board, from, to);
    }
    if is_diagonal(from, to) {
        return board.check_piece_in_diagonal(from, to);
    }
    Err(Error::IllegalMove("queens move along files, ranks and diagonals".into()))
}

fn check_knight(from: Position, to: Position) -> Result<()> {
    match (from.file_delta(&to).abs(), from.rank_delta(&to).abs()) {
        (1, 2) | (2, 1) => Ok(()),
        _ => Err(Error::IllegalMove("knights move in an L shape".into())),
    }
}

fn check_king(from: Position, to: Position) -> Result<()> {
    let file_distance = from.file_delta(&to).abs();
    let rank_distance = from.rank_delta(&to).abs();
    if file_distance <= 1 && rank_distance <= 1 && (file_distance, rank_distance) != (0, 0) {
        return Ok(());
    }
    Err(Error::IllegalMove("kings move one square in any direction".into()))
}
