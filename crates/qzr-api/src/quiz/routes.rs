use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Local;
use qzr_db::records::{quizzes, results};
use qzr_progress::{Quiz, QuizResult, ResultsSummary, summarize_results};
use validator::Validate;

use super::{
    model::{CompleteQuizRequest, CompletionResponse, GenerateExamRequest, GenerateQuizRequest},
    service,
};
use crate::{
    ApiState,
    error::ApiError,
    generation::{DEFAULT_EXAM_MINUTES, DEFAULT_EXAM_QUESTIONS, DEFAULT_QUIZ_QUESTIONS, generate_exam},
    progress::model::StatsView,
};

/// Create the quiz and result routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/quizzes", get(list_quizzes).post(create_quiz))
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}/complete", post(complete_quiz))
        .route("/quizzes/{id}/result", get(get_quiz_result))
        .route("/exams", post(create_exam))
        .route("/results", get(list_results))
        .route("/results/summary", get(results_summary))
}

async fn create_quiz(
    State(state): State<ApiState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<(StatusCode, Json<Quiz>), ApiError> {
    payload.validate()?;

    let quiz = state
        .generator
        .generate_quiz(
            payload.topic.trim(),
            payload.difficulty,
            payload.question_count.unwrap_or(DEFAULT_QUIZ_QUESTIONS),
        )
        .await?;
    {
        let _guard = state.store_lock.lock().await;
        quizzes::save_quiz(&*state.store, &quiz).await?;
    }

    tracing::info!(quiz_id = %quiz.id, topic = %quiz.topic, "Quiz generated");
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn create_exam(
    State(state): State<ApiState>,
    Json(payload): Json<GenerateExamRequest>,
) -> Result<(StatusCode, Json<Quiz>), ApiError> {
    payload.validate()?;

    let exam = generate_exam(
        &*state.generator,
        payload.topic.trim(),
        payload.difficulty,
        payload.question_count.unwrap_or(DEFAULT_EXAM_QUESTIONS),
        payload.time_limit_minutes.unwrap_or(DEFAULT_EXAM_MINUTES),
    )
    .await?;
    {
        let _guard = state.store_lock.lock().await;
        quizzes::save_quiz(&*state.store, &exam).await?;
    }

    tracing::info!(quiz_id = %exam.id, topic = %exam.topic, "Exam generated");
    Ok((StatusCode::CREATED, Json(exam)))
}

async fn list_quizzes(State(state): State<ApiState>) -> Result<Json<Vec<Quiz>>, ApiError> {
    Ok(Json(quizzes::list_quizzes(&*state.store).await?))
}

async fn get_quiz(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, ApiError> {
    quizzes::find_quiz_by_id(&*state.store, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Quiz {id}")))
}

async fn complete_quiz(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<CompleteQuizRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let time_spent_ms = payload
        .time_spent_ms
        .ok_or_else(|| ApiError::Validation("timeSpentMs is required".to_string()))?;

    let completion = service::complete_quiz(
        &state,
        &id,
        payload.answers,
        time_spent_ms,
        Local::now(),
    )
    .await?;

    Ok(Json(CompletionResponse {
        result: completion.result,
        stats: StatsView::from(completion.progress.stats),
        new_badges: completion.progress.new_badges,
    }))
}

async fn get_quiz_result(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<QuizResult>, ApiError> {
    results::find_result_by_quiz_id(&*state.store, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Result for quiz {id}")))
}

async fn list_results(State(state): State<ApiState>) -> Result<Json<Vec<QuizResult>>, ApiError> {
    Ok(Json(results::list_results(&*state.store).await?))
}

async fn results_summary(
    State(state): State<ApiState>,
) -> Result<Json<ResultsSummary>, ApiError> {
    let results = results::list_results(&*state.store).await?;
    Ok(Json(summarize_results(&results)))
}
