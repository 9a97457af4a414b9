use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;

use chess_game_core::{
    view, Board, Color, Command, Event, GameSession, GameState, MoveOutcome, Phase, Position, Result,
    Status,
};

use crate::error::AppError;
use crate::AppState;

pub mod api;

/// A game as shown to clients: the board, whose turn it is and the scores.
///
/// After a king capture the game is back in `Ready`; the view then carries
/// the final board, its scores and the winner.
#[derive(Debug, Serialize)]
pub struct GameView {
    pub id: i64,
    pub phase: Phase,
    pub rows: Vec<String>,
    pub status: Option<Status>,
    pub winner: Option<Color>,
}

impl GameView {
    pub fn new(session: &GameSession<'_>, event: Option<&Event>) -> Self {
        match event {
            Some(Event::Moved { outcome: MoveOutcome::RoundOver { winner, board }, .. }) => {
                Self::build(session.id(), session.state(), Some(board), Some(*winner))
            }
            _ => Self::build(session.id(), session.state(), session.state().board(), None),
        }
    }

    fn build(id: i64, state: &GameState, board: Option<&Board>, winner: Option<Color>) -> Self {
        Self {
            id,
            phase: state.phase(),
            rows: board.map(view::board_rows).unwrap_or_default(),
            status: board.map(Board::status),
            winner,
        }
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[derive(Template)]
#[template(path = "games.html")]
pub struct GamesTemplate {
    pub title: String,
    pub games: Vec<GameRow>,
}

pub struct GameRow {
    pub id: i64,
    pub phase: String,
    pub updated: String,
}

#[derive(Template)]
#[template(path = "game.html")]
pub struct GameTemplate {
    pub title: String,
    pub id: i64,
    pub phase: String,
    pub running: bool,
    pub rows: Vec<BoardRow>,
    pub scores: Vec<String>,
    pub message: String,
    pub error: String,
}

pub struct BoardRow {
    pub rank: usize,
    pub squares: Vec<char>,
}

impl GameTemplate {
    fn new(game: GameView, message: String, error: String) -> Self {
        let rows = game
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| BoardRow {
                rank: 8 - index,
                squares: row.chars().collect(),
            })
            .collect();

        let scores = game
            .status
            .map(|status| {
                Color::ALL
                    .iter()
                    .map(|color| view::format_score(*color, status.score(*color)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: format!("Game #{}", game.id),
            id: game.id,
            phase: game.phase.display_name().to_string(),
            running: game.phase != Phase::End,
            rows,
            scores,
            message,
            error,
        }
    }
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(serde::Deserialize)]
pub struct MoveForm {
    pub from: String,
    pub to: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn index() -> Redirect {
    Redirect::to("/games")
}

pub async fn games_list(State(state): State<Arc<AppState>>) -> Response {
    let stored_games = match state.db().recent_games(50) {
        Ok(games) => games,
        Err(e) => return AppError(e).into_response(),
    };

    let games = stored_games
        .iter()
        .map(|g| {
            let updated = chrono::DateTime::from_timestamp(g.updated_at, 0)
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let phase = g
                .phase
                .parse::<Phase>()
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|_| g.phase.clone());

            GameRow { id: g.id, phase, updated }
        })
        .collect();

    render(&GamesTemplate {
        title: "Games".to_string(),
        games,
    })
}

pub async fn new_game(State(state): State<Arc<AppState>>) -> Response {
    let db = state.db();
    match GameSession::create(&db) {
        Ok(session) => Redirect::to(&format!("/games/{}", session.id())).into_response(),
        Err(e) => AppError(e).into_response(),
    }
}

pub async fn game_page(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let db = state.db();
    match GameSession::load(&db, id) {
        Ok(session) => render(&GameTemplate::new(
            GameView::new(&session, None),
            String::new(),
            String::new(),
        )),
        Err(e) => AppError(e).into_response(),
    }
}

pub async fn start_form(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    submit(&state, id, Ok(Command::Start))
}

pub async fn end_form(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    submit(&state, id, Ok(Command::End))
}

pub async fn move_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<MoveForm>,
) -> Response {
    submit(&state, id, parse_move(&form.from, &form.to))
}

pub async fn health() -> &'static str {
    "OK"
}

pub(crate) fn parse_move(from: &str, to: &str) -> Result<Command> {
    Ok(Command::Move {
        from: from.trim().parse::<Position>()?,
        to: to.trim().parse::<Position>()?,
    })
}

/// Applies a form command and re-renders the game page, showing rule
/// violations inline.
fn submit(state: &AppState, id: i64, command: Result<Command>) -> Response {
    let db = state.db();
    let mut session = match GameSession::load(&db, id) {
        Ok(session) => session,
        Err(e) => return AppError(e).into_response(),
    };

    let (status, page) = match command.and_then(|command| session.execute(command)) {
        Ok(event) => {
            let message = describe(&event);
            let game = GameView::new(&session, Some(&event));
            (StatusCode::OK, GameTemplate::new(game, message, String::new()))
        }
        Err(e) if e.is_user_error() => {
            let game = GameView::new(&session, None);
            (StatusCode::BAD_REQUEST, GameTemplate::new(game, String::new(), e.to_string()))
        }
        Err(e) => return AppError(e).into_response(),
    };

    (status, render(&page)).into_response()
}

fn describe(event: &Event) -> String {
    match event {
        Event::Started => "Game started. White to move.".to_string(),
        Event::Moved { from, to, outcome: MoveOutcome::Continue { next } } => {
            format!("{} to {}. {} to move.", from, to, next)
        }
        Event::Moved { from, to, outcome: MoveOutcome::RoundOver { winner, .. } } => {
            format!("{} to {}. {} captured the king!", from, to, winner)
        }
        Event::Status(_) => String::new(),
        Event::Ended => "Game over.".to_string(),
    }
}
