//! Text rendering of boards, scores and help

use std::io::Write;

use crate::domain::{Board, Color, Position, Status};
use crate::error::Result;

const EMPTY_SQUARE: char = '.';

/// One string per rank, rank 8 first, files a to h.
pub fn board_rows(board: &Board) -> Vec<String> {
    (Position::MIN_INDEX..=Position::MAX_INDEX)
        .rev()
        .map(|rank| {
            (Position::MIN_INDEX..=Position::MAX_INDEX)
                .map(|file| {
                    Position::new(file, rank)
                        .ok()
                        .and_then(|position| board.piece_at(position))
                        .map_or(EMPTY_SQUARE, |piece| piece.symbol())
                })
                .collect()
        })
        .collect()
}

pub fn write_board<W: Write>(board: &Board, out: &mut W) -> Result<()> {
    for row in board_rows(board) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

/// `"White: 38.0"`
pub fn format_score(color: Color, score: f64) -> String {
    format!("{}: {:.1}", color, score)
}

pub fn write_status<W: Write>(status: &Status, out: &mut W) -> Result<()> {
    for color in Color::ALL {
        writeln!(out, "{}", format_score(color, status.score(color)))?;
    }
    Ok(())
}

pub fn write_guide<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "> Chess")?;
    writeln!(out, "> start a game : start")?;
    writeln!(out, "> end the game : end")?;
    writeln!(out, "> show scores  : status")?;
    writeln!(out, "> move a piece : move <from> <to>, e.g. move b2 b3")?;
    Ok(())
}
