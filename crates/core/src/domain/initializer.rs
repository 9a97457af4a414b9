//! Standard starting arrangement

use super::board::Squares;
use super::piece::{Color, Piece, PieceKind};
use super::position::Position;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 16 pieces per side: pawns on ranks 2 and 7, the back row on ranks 1 and 8.
pub fn standard_squares() -> Squares {
    Position::all()
        .filter_map(|position| {
            let back_row = BACK_RANK[usize::from(position.file() - 1)];
            let piece = match position.rank() {
                1 => Piece::new(Color::White, back_row),
                2 => Piece::new(Color::White, PieceKind::Pawn),
                7 => Piece::new(Color::Black, PieceKind::Pawn),
                8 => Piece::new(Color::Black, back_row),
                _ => return None,
            };
            Some((position, piece))
        })
        .collect()
}
