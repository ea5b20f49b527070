//! Review log of missed questions and spaced-review batch selection.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Quiz, QuizResult, ReviewItem};

/// Default size of a review batch
pub const DEFAULT_REVIEW_BATCH: usize = 20;

/// Items missed at least this often always qualify for review
pub const REPEAT_MISS_THRESHOLD: u32 = 2;

/// Items not missed for longer than this qualify for review
pub const STALE_AFTER_DAYS: i64 = 7;

/// Fold the wrong answers of `result` into the review log.
///
/// A question that is already in the log has its miss count bumped and its
/// `last_reviewed` set to `now`; otherwise a new entry is appended. Correct
/// answers never touch the log. Unanswered questions count as missed.
///
/// Returns the number of questions missed in this result.
pub fn record_misses(
    log: &mut Vec<ReviewItem>,
    quiz: &Quiz,
    result: &QuizResult,
    now: DateTime<Utc>,
) -> usize {
    let mut missed = 0;

    for (index, question) in quiz.questions.iter().enumerate() {
        let answer = result.answers.get(index).copied();
        if answer == Some(question.correct_answer) {
            continue;
        }
        missed += 1;

        if let Some(item) = log.iter_mut().find(|item| item.is_for(&quiz.id, index)) {
            item.wrong_count += 1;
            item.last_reviewed = now;
            continue;
        }

        log.push(ReviewItem {
            quiz_id: quiz.id.clone(),
            question_index: index,
            question: question.question.clone(),
            correct_answer: question.correct_text().to_string(),
            user_answer: answer
                .and_then(|index| question.option_text(index))
                .map(str::to_string),
            explanation: question.explanation.clone(),
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty,
            wrong_count: 1,
            last_reviewed: now,
        });
    }

    missed
}

/// Whether an item is due for review at `now`
pub fn needs_review(item: &ReviewItem, now: DateTime<Utc>) -> bool {
    item.wrong_count >= REPEAT_MISS_THRESHOLD
        || item.last_reviewed < now - Duration::days(STALE_AFTER_DAYS)
}

/// Select the next batch of questions to re-study.
///
/// An item qualifies if it was missed at least twice or was last missed more
/// than seven days ago. Qualifying items are ordered most-missed first, then
/// stalest first, and the list is cut at `max_items`. The log is not modified.
pub fn select_review_batch(
    log: &[ReviewItem],
    now: DateTime<Utc>,
    max_items: usize,
) -> Vec<ReviewItem> {
    let mut batch: Vec<ReviewItem> = log
        .iter()
        .filter(|item| needs_review(item, now))
        .cloned()
        .collect();

    batch.sort_by(|a, b| {
        b.wrong_count
            .cmp(&a.wrong_count)
            .then(a.last_reviewed.cmp(&b.last_reviewed))
    });
    batch.truncate(max_items);
    batch
}
