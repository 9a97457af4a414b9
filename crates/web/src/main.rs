use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::{services::ServeDir, trace::TraceLayer};

use chess_game_core::Database;

mod config;
mod error;
mod routes;

use config::Config;

pub struct AppState {
    db: Mutex<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Exclusive access to the store. Holding the guard for a whole
    /// load-apply-save cycle keeps concurrent requests for the same game
    /// from interleaving.
    pub fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/games", get(routes::games_list).post(routes::new_game))
        .route("/games/:id", get(routes::game_page))
        .route("/games/:id/start", post(routes::start_form))
        .route("/games/:id/end", post(routes::end_form))
        .route("/games/:id/move", post(routes::move_form))
        .route("/api/games", post(routes::api::create_game))
        .route("/api/games/:id", get(routes::api::show_game))
        .route("/api/games/:id/start", post(routes::api::start_game))
        .route("/api/games/:id/end", post(routes::api::end_game))
        .route("/api/games/:id/move", post(routes::api::move_piece))
        .route("/api/games/:id/moves", get(routes::api::list_moves))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let db = Database::open(&config.db_path).expect("Failed to open database");
    let state = Arc::new(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app(state)).await.expect("Server error");
}
