use axum::{Json, Router, extract::State, routing::post};
use qzr_progress::{Difficulty, Flashcard};
use serde::Deserialize;
use validator::Validate;

use crate::{
    ApiState, error::ApiError, generation::DEFAULT_FLASHCARDS, validation::validate_topic,
};

/// Create the flashcard routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/flashcards", post(generate_flashcards))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct FlashcardRequest {
    #[validate(custom(function = "validate_topic"))]
    topic: String,
    difficulty: Difficulty,
    #[validate(range(min = 1, max = 50))]
    card_count: Option<u32>,
}

/// Flashcards are generated on demand and not stored
async fn generate_flashcards(
    State(state): State<ApiState>,
    Json(payload): Json<FlashcardRequest>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    payload.validate()?;

    let cards = state
        .generator
        .generate_flashcards(
            payload.topic.trim(),
            payload.difficulty,
            payload.card_count.unwrap_or(DEFAULT_FLASHCARDS),
        )
        .await?;

    tracing::info!(topic = %payload.topic.trim(), count = cards.len(), "Flashcards generated");
    Ok(Json(cards))
}
