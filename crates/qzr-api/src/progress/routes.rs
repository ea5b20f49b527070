use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use qzr_db::records::stats;
use qzr_progress::{DEFAULT_REVIEW_BATCH, ReviewItem, badges::BADGE_RULES};
use validator::Validate;

use super::{
    model::{BadgeStatus, ReviewQuery, StatsView},
    service,
};
use crate::{ApiState, error::ApiError};

/// Create the stats, badge and review routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/badges", get(list_badges))
        .route("/review", get(get_review_batch))
}

async fn get_stats(State(state): State<ApiState>) -> Result<Json<StatsView>, ApiError> {
    let stats = stats::load_stats(&*state.store).await?;
    Ok(Json(StatsView::from(stats)))
}

async fn list_badges(State(state): State<ApiState>) -> Result<Json<Vec<BadgeStatus>>, ApiError> {
    let stats = stats::load_stats(&*state.store).await?;
    Ok(Json(
        BADGE_RULES
            .iter()
            .map(|rule| BadgeStatus::new(rule, &stats))
            .collect(),
    ))
}

async fn get_review_batch(
    State(state): State<ApiState>,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Vec<ReviewItem>>, ApiError> {
    query.validate()?;

    let items = service::review_batch(
        &*state.store,
        Utc::now(),
        query.limit.unwrap_or(DEFAULT_REVIEW_BATCH),
    )
    .await?;
    Ok(Json(items))
}
