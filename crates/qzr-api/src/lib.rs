//! HTTP service for Quizzer: AI-generated quizzes, grading, progress tracking
//! and spaced review, over a key-value document store.

pub mod config;
pub mod error;
pub mod flashcard;
pub mod generation;
pub mod metrics;
pub mod notifications;
pub mod progress;
pub mod quiz;
pub mod router;
pub mod settings;
pub mod state;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::ApiState;
