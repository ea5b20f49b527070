use std::sync::Arc;

use qzr_db::KeyValueStore;
use tokio::sync::Mutex;

use crate::{
    ApiConfig,
    config::Environment,
    generation::{AiQuizGenerator, GeminiClient, QuizGenerator},
    notifications::{LogNotifier, Notifier},
};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn KeyValueStore>,
    pub generator: Arc<dyn QuizGenerator>,
    pub notifier: Arc<dyn Notifier>,
    /// Held across every read-modify-write of a stored collection
    pub store_lock: Arc<Mutex<()>>,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let gemini = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
        );
        tracing::debug!(?gemini, "Generation client configured");

        Self::with_services(
            store,
            Arc::new(AiQuizGenerator::new(gemini)),
            Arc::new(LogNotifier),
            config.app_env,
        )
    }

    pub fn with_services(
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn QuizGenerator>,
        notifier: Arc<dyn Notifier>,
        environment: Environment,
    ) -> Self {
        Self {
            store,
            generator,
            notifier,
            store_lock: Arc::new(Mutex::new(())),
            environment,
        }
    }
}
