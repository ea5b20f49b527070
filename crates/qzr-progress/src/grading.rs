//! Scoring a finished quiz.

use chrono::{DateTime, Utc};

use crate::model::{Quiz, QuizResult};

/// Count the answers that match the correct option of their question.
///
/// Questions without an answer count as wrong; extra answers are ignored.
pub fn score_answers(quiz: &Quiz, answers: &[usize]) -> u32 {
    let correct = quiz
        .questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_answer == **answer)
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

/// Whether `time_spent_ms` went past the quiz's time limit, if it has one
pub fn time_limit_exceeded(quiz: &Quiz, time_spent_ms: u64) -> bool {
    quiz.time_limit
        .is_some_and(|minutes| time_spent_ms > u64::from(minutes) * 60_000)
}

/// Build the result of a finished quiz.
pub fn grade(
    quiz: &Quiz,
    answers: Vec<usize>,
    time_spent_ms: u64,
    analysis: String,
    completed_at: DateTime<Utc>,
) -> QuizResult {
    QuizResult {
        quiz_id: quiz.id.clone(),
        score: score_answers(quiz, &answers),
        total_questions: u32::try_from(quiz.questions.len()).unwrap_or(u32::MAX),
        time_limit_exceeded: time_limit_exceeded(quiz, time_spent_ms),
        answers,
        time_spent_ms,
        analysis,
        completed_at,
        mode: quiz.mode,
    }
}
