//! Logging setup.
//!
//! Development builds print readable multi-line events; production emits one
//! JSON object per event for log shippers.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,qzr_api=debug,qzr_db=debug,tower_http=debug,sqlx=warn";
const PRODUCTION_FILTER: &str = "info,tower_http=info,sqlx=warn,reqwest=warn";

/// Install the global subscriber for `env`.
///
/// `RUST_LOG` overrides the default filter, e.g. `RUST_LOG=debug,tower_http=trace`.
/// Calling this twice is a no-op, so tests and binaries can share it.
pub fn init_tracing(env: &Environment) {
    let installed = if env.is_development() {
        init_development_tracing()
    } else {
        init_production_tracing()
    };

    if installed {
        tracing::info!(environment = ?env, "Tracing initialized");
    }
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init_development_tracing() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(filter_or(DEVELOPMENT_FILTER)),
        )
        .try_init()
        .is_ok()
}

fn init_production_tracing() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(filter_or(PRODUCTION_FILTER)),
        )
        .try_init()
        .is_ok()
}
