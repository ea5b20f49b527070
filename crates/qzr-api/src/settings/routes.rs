use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use qzr_db::{
    models::ThemeSettings,
    records::{clear_quiz_data, settings},
};

use crate::{ApiState, error::ApiError};

/// Create the settings and data management routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/settings/theme", get(get_theme).put(put_theme))
        .route("/data", delete(clear_data))
}

async fn get_theme(State(state): State<ApiState>) -> Result<Json<ThemeSettings>, ApiError> {
    Ok(Json(settings::load_theme_settings(&*state.store).await?))
}

async fn put_theme(
    State(state): State<ApiState>,
    Json(payload): Json<ThemeSettings>,
) -> Result<Json<ThemeSettings>, ApiError> {
    settings::save_theme_settings(&*state.store, &payload).await?;
    tracing::debug!(?payload, "Theme settings saved");
    Ok(Json(payload))
}

/// Wipe quiz history, results, stats and the review log
async fn clear_data(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    let _guard = state.store_lock.lock().await;
    clear_quiz_data(&*state.store).await?;
    tracing::info!("Quiz data cleared");
    Ok(StatusCode::NO_CONTENT)
}
