use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use qzr_api::{
    config::ApiConfig,
    metrics::{init_metrics, metrics_handler, track_metrics},
    notifications::schedule_daily_reminder,
    state::ApiState,
};
use qzr_db::SqliteStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    qzr_api::tracing::init_tracing(&config.app_env);
    let metrics_handle = init_metrics()?;

    let pool = qzr_db::create_pool(&config.database_url, config.database_max_connections).await?;
    qzr_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!(database_url = %config.database_url, "Database ready");

    let state = ApiState::new(&config, Arc::new(SqliteStore::new(pool)));
    schedule_daily_reminder(state.notifier.as_ref(), config.reminder_hour).await;

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = qzr_api::router::router()
        .merge(metrics_routes)
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
