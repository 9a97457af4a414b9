//! Board coordinates in algebraic notation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A square on the board, `a1` through `h8`.
///
/// Files and ranks are both stored as indices in `1..=8`. Ordering is by
/// file first, then rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    pub const MIN_INDEX: u8 = 1;
    pub const MAX_INDEX: u8 = 8;

    /// Builds a position from file and rank indices in `1..=8`.
    pub fn new(file: u8, rank: u8) -> Result<Self> {
        if !Self::in_range(file) || !Self::in_range(rank) {
            return Err(Error::InvalidPosition(format!("({}, {}) is off the board", file, rank)));
        }
        Ok(Self { file, rank })
    }

    /// Parses exactly two characters: a file letter `a`-`h` and a rank digit `1`-`8`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidPosition(format!("'{}'", text));

        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        Ok(Self {
            file: file as u8 - b'a' + 1,
            rank: rank as u8 - b'0',
        })
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.file - 1) as char
    }

    /// Offsets this position, returning `None` when the result leaves the board.
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        Self::new(u8::try_from(file).ok()?, u8::try_from(rank).ok()?).ok()
    }

    /// `(min, max)` of the two files.
    pub fn file_span(&self, other: &Position) -> (u8, u8) {
        (self.file.min(other.file), self.file.max(other.file))
    }

    /// `(min, max)` of the two ranks.
    pub fn rank_span(&self, other: &Position) -> (u8, u8) {
        (self.rank.min(other.rank), self.rank.max(other.rank))
    }

    /// Signed file distance from `self` to `to`.
    pub fn file_delta(&self, to: &Position) -> i8 {
        to.file as i8 - self.file as i8
    }

    /// Signed rank distance from `self` to `to`.
    pub fn rank_delta(&self, to: &Position) -> i8 {
        to.rank as i8 - self.rank as i8
    }

    /// All 64 squares, file-major.
    pub fn all() -> impl Iterator<Item = Position> {
        (Self::MIN_INDEX..=Self::MAX_INDEX).flat_map(|file| {
            (Self::MIN_INDEX..=Self::MAX_INDEX).map(move |rank| Position { file, rank })
        })
    }

    fn in_range(index: u8) -> bool {
        (Self::MIN_INDEX..=Self::MAX_INDEX).contains(&index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Position {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_square() {
        for file in 'a'..='h' {
            for rank in '1'..='8' {
                let text = format!("{}{}", file, rank);
                let position = Position::parse(&text).unwrap();
                assert_eq!(position.to_string(), text);
            }
        }
    }

    #[test]
    fn test_parse_indices() {
        let position: Position = "c7".parse().unwrap();
        assert_eq!(position.file(), 3);
        assert_eq!(position.rank(), 7);
        assert_eq!(position.file_char(), 'c');
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "a", "a9", "i1", "a0", "A1", "a10", "1a", " a1"] {
            assert!(
                matches!(Position::parse(text), Err(Error::InvalidPosition(_))),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Position::new(0, 1).is_err());
        assert!(Position::new(1, 9).is_err());
        assert!(Position::new(8, 8).is_ok());
    }

    #[test]
    fn test_ordering_is_file_then_rank() {
        let a8 = Position::parse("a8").unwrap();
        let b1 = Position::parse("b1").unwrap();
        let b2 = Position::parse("b2").unwrap();
        assert!(a8 < b1);
        assert!(b1 < b2);
    }

    #[test]
    fn test_spans_and_deltas() {
        let from = Position::parse("f2").unwrap();
        let to = Position::parse("b6").unwrap();
        assert_eq!(from.file_span(&to), (2, 6));
        assert_eq!(from.rank_span(&to), (2, 6));
        assert_eq!(from.file_delta(&to), -4);
        assert_eq!(from.rank_delta(&to), 4);
    }

    #[test]
    fn test_offset_stays_on_board() {
        let h8 = Position::parse("h8").unwrap();
        assert_eq!(h8.offset(-1, -1), Some(Position::parse("g7").unwrap()));
        assert_eq!(h8.offset(1, 0), None);
    }

    #[test]
    fn test_all_covers_board() {
        assert_eq!(Position::all().count(), 64);
    }

    #[test]
    fn test_serde_uses_algebraic_text() {
        let position = Position::parse("e4").unwrap();
        assert_eq!(serde_json::to_string(&position).unwrap(), "\"e4\"");
        let back: Position = serde_json::from_str("\"e4\"").unwrap();
        assert_eq!(back, position);
        assert!(serde_json::from_str::<Position>("\"z9\"").is_err());
    }
}
