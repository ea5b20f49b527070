use qzr_progress::{Badge, Difficulty, QuizResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{progress::model::StatsView, validation::validate_topic};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(custom(function = "validate_topic"))]
    pub topic: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 1, max = 50))]
    pub question_count: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateExamRequest {
    #[validate(custom(function = "validate_topic"))]
    pub topic: String,
    pub difficulty: Difficulty,
    #[validate(range(min = 1, max = 50))]
    pub question_count: Option<u32>,
    #[validate(range(min = 1, max = 240))]
    pub time_limit_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuizRequest {
    /// Chosen option per question, in question order
    pub answers: Vec<usize>,
    /// Measured time on the attempt; the speed bonus depends on it, so it is required
    pub time_spent_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub result: QuizResult,
    pub stats: StatsView,
    pub new_badges: Vec<Badge>,
}
