use chrono::{DateTime, TimeZone, Utc};
use qzr_db::records::{quizzes, results};
use qzr_progress::{QuizResult, grading::grade};

use crate::{
    ApiState,
    error::ApiError,
    generation::analyze_or_fallback,
    metrics, notifications,
    progress::{ProgressUpdate, update_stats},
    validation::validate_answers,
};

#[derive(Debug)]
pub struct Completion {
    pub result: QuizResult,
    pub progress: ProgressUpdate,
}

/// Grade a submitted attempt and fold it into the user's progress.
///
/// The result is stored before stats are touched, so a failed stats update
/// still leaves the attempt in the history.
pub async fn complete_quiz<Tz: TimeZone>(
    state: &ApiState,
    quiz_id: &str,
    answers: Vec<usize>,
    time_spent_ms: u64,
    now: DateTime<Tz>,
) -> Result<Completion, ApiError> {
    let quiz = quizzes::find_quiz_by_id(&*state.store, quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Quiz {quiz_id}")))?;
    validate_answers(&quiz, &answers)?;

    let analysis = analyze_or_fallback(&*state.generator, &quiz, &answers, time_spent_ms).await;
    let result = grade(&quiz, answers, time_spent_ms, analysis, now.with_timezone(&Utc));
    let progress = {
        let _guard = state.store_lock.lock().await;
        results::save_result(&*state.store, &result).await?;
        update_stats(&*state.store, &quiz, &result, &now).await?
    };

    metrics::record_quiz_completed(quiz.difficulty, progress.new_badges.len());
    notifications::announce_badges(&*state.notifier, &progress.new_badges).await;
    notifications::schedule_streak_reminder(&*state.notifier).await;

    Ok(Completion { result, progress })
}
