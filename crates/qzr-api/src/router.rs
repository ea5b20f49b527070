use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{flashcard, progress, quiz, settings, state::ApiState};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(quiz::routes())
        .merge(flashcard::routes())
        .merge(progress::routes())
        .merge(settings::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
