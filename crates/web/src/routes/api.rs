//! JSON API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_game_core::{storage::StoredMove, Command, GameSession, Result};

use super::{parse_move, GameView};
use crate::error::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct CreatedGame {
    pub id: i64,
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<(StatusCode, Json<CreatedGame>), AppError> {
    let db = state.db();
    let session = GameSession::create(&db)?;
    Ok((StatusCode::CREATED, Json(CreatedGame { id: session.id() })))
}

pub async fn show_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> std::result::Result<Json<GameView>, AppError> {
    let db = state.db();
    let session = GameSession::load(&db, id)?;
    Ok(Json(GameView::new(&session, None)))
}

pub async fn start_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> std::result::Result<Json<GameView>, AppError> {
    apply(&state, id, Ok(Command::Start))
}

pub async fn end_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> std::result::Result<Json<GameView>, AppError> {
    apply(&state, id, Ok(Command::End))
}

pub async fn move_piece(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<MoveRequest>,
) -> std::result::Result<Json<GameView>, AppError> {
    apply(&state, id, parse_move(&request.from, &request.to))
}

pub async fn list_moves(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> std::result::Result<Json<Vec<StoredMove>>, AppError> {
    let db = state.db();
    db.load_game(id)?;
    Ok(Json(db.moves(id)?))
}

fn apply(state: &AppState, id: i64, command: Result<Command>) -> std::result::Result<Json<GameView>, AppError> {
    let db = state.db();
    let mut session = GameSession::load(&db, id)?;
    let event = session.execute(command?)?;
    Ok(Json(GameView::new(&session, Some(&event))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let db = chess_game_core::Database::open_in_memory().unwrap();
        crate::app(Arc::new(AppState::new(db)))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn new_started_game(app: &Router) -> i64 {
        let (status, created) = call(app, Method::POST, "/api/games", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, game) = call(app, Method::POST, &format!("/api/games/{}/start", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(game["phase"], "white_turn");
        id
    }

    #[tokio::test]
    async fn test_new_game_is_ready_without_board() {
        let app = test_app();
        let (_, created) = call(&app, Method::POST, "/api/games", None).await;
        let id = created["id"].as_i64().unwrap();

        let (status, game) = call(&app, Method::GET, &format!("/api/games/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(game["phase"], "ready");
        assert_eq!(game["rows"], json!([]));
        assert!(game["status"].is_null());
    }

    #[tokio::test]
    async fn test_moves_alternate_and_are_logged() {
        let app = test_app();
        let id = new_started_game(&app).await;
        let uri = format!("/api/games/{}/move", id);

        let (status, game) = call(&app, Method::POST, &uri, Some(json!({"from": "b2", "to": "b3"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(game["phase"], "black_turn");
        assert_eq!(game["rows"][5], ".♙......");
        assert_eq!(game["status"]["white"], 38.0);

        let (status, error) = call(&app, Method::POST, &uri, Some(json!({"from": "c2", "to": "c3"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "it is Black's turn");

        let (_, moves) = call(&app, Method::GET, &format!("/api/games/{}/moves", id), None).await;
        assert_eq!(moves.as_array().unwrap().len(), 1);
        assert_eq!(moves[0]["from"], "b2");
        assert_eq!(moves[0]["to"], "b3");
    }

    #[tokio::test]
    async fn test_rule_violations_are_bad_requests() {
        let app = test_app();
        let id = new_started_game(&app).await;
        let uri = format!("/api/games/{}/move", id);

        for (from, to) in [("a1", "a3"), ("e4", "e5"), ("b1", "b3"), ("z1", "a1")] {
            let (status, body) = call(&app, Method::POST, &uri, Some(json!({"from": from, "to": to}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", from, to);
            assert!(body["error"].is_string());
        }

        let (_, game) = call(&app, Method::GET, &format!("/api/games/{}", id), None).await;
        assert_eq!(game["phase"], "white_turn");
        assert_eq!(game["rows"][6], "♙♙♙♙♙♙♙♙");
    }

    #[tokio::test]
    async fn test_end_is_terminal() {
        let app = test_app();
        let id = new_started_game(&app).await;

        let (status, game) = call(&app, Method::POST, &format!("/api/games/{}/end", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(game["phase"], "end");

        let (status, _) = call(&app, Method::POST, &format!("/api/games/{}/start", id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let app = test_app();
        let (status, body) = call(&app, Method::GET, "/api/games/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "game 5 not found");

        let (status, _) = call(&app, Method::GET, "/api/games/5/moves", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
