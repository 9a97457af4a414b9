//! Turn state machine

use tracing::{debug, info};

use crate::domain::{Board, Color, Position, Status};
use crate::error::{Error, Result};

/// Where a game stands. Turn states own the board; `Ready` and `End` hold none.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GameState {
    #[default]
    Ready,
    WhiteTurn(Board),
    BlackTurn(Board),
    End,
}

/// What an accepted move led to.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The game goes on with `next` to move.
    Continue { next: Color },
    /// `winner` captured the opposing king. The game is back in `Ready` and
    /// the final board is handed to the caller.
    RoundOver { winner: Color, board: Board },
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn state for `color`, taking ownership of `board`.
    pub fn turn(color: Color, board: Board) -> Self {
        match color {
            Color::White => GameState::WhiteTurn(board),
            Color::Black => GameState::BlackTurn(board),
        }
    }

    /// Deals a fresh board and gives White the first move.
    pub fn start(&mut self) -> Result<()> {
        match self {
            GameState::Ready => {
                *self = GameState::WhiteTurn(Board::standard());
                info!("game started");
                Ok(())
            }
            GameState::WhiteTurn(_) | GameState::BlackTurn(_) => {
                Err(Error::InvalidState("the game is already running".into()))
            }
            GameState::End => Err(Error::InvalidState("the game has ended".into())),
        }
    }

    /// Moves a piece of the colour to play.
    ///
    /// On any error both the board and the active turn are left as they were.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<MoveOutcome> {
        let (board, color) = match self {
            GameState::WhiteTurn(board) => (board, Color::White),
            GameState::BlackTurn(board) => (board, Color::Black),
            GameState::Ready => return Err(Error::InvalidState("start the game first".into())),
            GameState::End => return Err(Error::InvalidState("the game has ended".into())),
        };

        if !board.is_matched_color(from, color)? {
            return Err(Error::WrongTurnOwner { color });
        }
        board.move_piece(from, to)?;
        debug!(%color, %from, %to, "move accepted");

        let opponent = color.opposite();
        let king_captured = !board.has_king(opponent);
        let board = self.take_board();

        if king_captured {
            info!(winner = %color, "king captured, round over");
            return Ok(MoveOutcome::RoundOver { winner: color, board });
        }
        *self = GameState::turn(opponent, board);
        Ok(MoveOutcome::Continue { next: opponent })
    }

    /// Ends the game from any state.
    pub fn end(&mut self) {
        *self = GameState::End;
        info!("game ended");
    }

    /// Scores of both sides on the board in play.
    pub fn status(&self) -> Result<Status> {
        self.board()
            .map(Board::status)
            .ok_or_else(|| Error::InvalidState("no game is in progress".into()))
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            GameState::WhiteTurn(board) | GameState::BlackTurn(board) => Some(board),
            GameState::Ready | GameState::End => None,
        }
    }

    pub fn active_color(&self) -> Option<Color> {
        match self {
            GameState::WhiteTurn(_) => Some(Color::White),
            GameState::BlackTurn(_) => Some(Color::Black),
            GameState::Ready | GameState::End => None,
        }
    }

    /// False once the game has been ended.
    pub fn is_running(&self) -> bool {
        !matches!(self, GameState::End)
    }

    /// Takes the board out, leaving `Ready` behind.
    fn take_board(&mut self) -> Board {
        match std::mem::take(self) {
            GameState::WhiteTurn(board) | GameState::BlackTurn(board) => board,
            GameState::Ready | GameState::End => Board::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Piece, PieceKind};

    fn pos(text: &str) -> Position {
        Position::parse(text).unwrap()
    }

    fn started() -> GameState {
        let mut state = GameState::new();
        state.start().unwrap();
        state
    }

    /// White rook on a1, kings on e1 and a8.
    fn rook_endgame(color: Color) -> GameState {
        let board = Board::from_squares([
            (pos("a1"), Piece::new(Color::White, PieceKind::Rook)),
            (pos("e1"), Piece::new(Color::White, PieceKind::King)),
            (pos("a8"), Piece::new(Color::Black, PieceKind::King)),
            (pos("h8"), Piece::new(Color::Black, PieceKind::Rook)),
        ]);
        GameState::turn(color, board)
    }

    #[test]
    fn test_start_gives_white_the_first_move() {
        let state = started();
        assert_eq!(state.active_color(), Some(Color::White));
        assert!(state.board().unwrap().is_initial());
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = started();
        let outcome = state.move_piece(pos("b2"), pos("b3")).unwrap();
        assert_eq!(outcome, MoveOutcome::Continue { next: Color::Black });
        assert_eq!(state.active_color(), Some(Color::Black));

        state.move_piece(pos("g7"), pos("g5")).unwrap();
        assert_eq!(state.active_color(), Some(Color::White));
        let board = state.board().unwrap();
        assert!(board.has_piece(pos("b3")));
        assert!(board.has_piece(pos("g5")));
    }

    #[test]
    fn test_moving_opponent_piece_fails_and_changes_nothing() {
        let mut state = started();
        let before = state.clone();
        let result = state.move_piece(pos("b7"), pos("b6"));
        assert!(matches!(result, Err(Error::WrongTurnOwner { color: Color::White })));
        assert_eq!(state, before);

        state.move_piece(pos("e2"), pos("e4")).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.move_piece(pos("d2"), pos("d4")),
            Err(Error::WrongTurnOwner { color: Color::Black })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_failed_moves_are_idempotent() {
        let mut state = started();
        let before = state.clone();

        assert!(matches!(state.move_piece(pos("e4"), pos("e5")), Err(Error::NoPieceAtPosition(_))));
        assert!(matches!(state.move_piece(pos("a1"), pos("a3")), Err(Error::PathBlocked(_))));
        assert!(matches!(state.move_piece(pos("b1"), pos("b3")), Err(Error::IllegalMove(_))));
        assert!(matches!(state.move_piece(pos("d1"), pos("d2")), Err(Error::IllegalMove(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_capturing_king_returns_to_ready() {
        let mut state = rook_endgame(Color::White);
        let outcome = state.move_piece(pos("a1"), pos("a8")).unwrap();

        let MoveOutcome::RoundOver { winner, board } = outcome else {
            panic!("expected the round to end, got {:?}", outcome);
        };
        assert_eq!(winner, Color::White);
        assert!(!board.has_king(Color::Black));
        assert_eq!(board.compute_score(Color::White), 5.0);
        assert_eq!(state, GameState::Ready);
    }

    #[test]
    fn test_black_can_win_too() {
        let mut state = rook_endgame(Color::Black);
        state.move_piece(pos("h8"), pos("h1")).unwrap();
        assert_eq!(state.active_color(), Some(Color::White));

        state.move_piece(pos("a1"), pos("a2")).unwrap();
        let outcome = state.move_piece(pos("h1"), pos("e1")).unwrap();
        assert!(matches!(outcome, MoveOutcome::RoundOver { winner: Color::Black, .. }));
        assert_eq!(state, GameState::Ready);
    }

    #[test]
    fn test_ready_rejects_moves() {
        let mut state = GameState::new();
        assert!(matches!(state.move_piece(pos("b2"), pos("b3")), Err(Error::InvalidState(_))));
        assert!(state.status().is_err());
        assert_eq!(state, GameState::Ready);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut state = started();
        assert!(matches!(state.start(), Err(Error::InvalidState(_))));
        assert_eq!(state.active_color(), Some(Color::White));
    }

    #[test]
    fn test_end_is_terminal() {
        for mut state in [GameState::new(), started()] {
            state.end();
            assert_eq!(state, GameState::End);
            assert!(!state.is_running());
            assert!(matches!(state.start(), Err(Error::InvalidState(_))));
            assert!(matches!(state.move_piece(pos("b2"), pos("b3")), Err(Error::InvalidState(_))));
        }
    }

    #[test]
    fn test_status_scores_current_board() {
        let mut state = started();
        state.move_piece(pos("e2"), pos("e4")).unwrap();
        state.move_piece(pos("d7"), pos("d5")).unwrap();
        state.move_piece(pos("e4"), pos("d5")).unwrap();

        let status = state.status().unwrap();
        assert_eq!(status.black, 37.0);
        // d2 and d5 now share a file
        assert_eq!(status.white, 37.0);
    }
}
