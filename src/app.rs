use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/options", get(handlers::get_options))
        .route("/api/figures", post(handlers::figures))
        .route("/api/indicators", post(handlers::indicators))
        .with_state(state)
}
