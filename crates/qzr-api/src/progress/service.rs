use chrono::{DateTime, TimeZone, Utc};
use qzr_db::{
    KeyValueStore, StoreError,
    records::{review, stats},
};
use qzr_progress::{
    Badge, Quiz, QuizResult, ReviewItem, UserStats, record_misses, record_result,
    select_review_batch,
};

/// Outcome of folding one result into the stored stats
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub stats: UserStats,
    pub new_badges: Vec<Badge>,
}

/// Fold a completed quiz into the stored stats, then into the review log.
///
/// The stats aggregate is loaded, updated and written back as one document;
/// a failure on either side leaves the stored aggregate as it was. The review
/// log is updated after the aggregate is committed, and a failure there is
/// logged rather than returned.
///
/// Callers serialize calls through [`crate::ApiState::store_lock`].
pub async fn update_stats<S, Tz>(
    store: &S,
    quiz: &Quiz,
    result: &QuizResult,
    now: &DateTime<Tz>,
) -> Result<ProgressUpdate, StoreError>
where
    S: KeyValueStore + ?Sized,
    Tz: TimeZone,
{
    let mut aggregate = stats::load_stats(store).await?;
    let new_badges = record_result(&mut aggregate, quiz, result, now);
    stats::save_stats(store, &aggregate).await?;

    tracing::info!(
        quiz_id = %quiz.id,
        score = result.score,
        total = result.total_questions,
        streak = aggregate.streak,
        xp = aggregate.xp,
        badges = new_badges.len(),
        "Stats updated"
    );

    if let Err(e) = fold_misses(store, quiz, result, now.with_timezone(&Utc)).await {
        tracing::error!(quiz_id = %quiz.id, error = %e, "Failed to update review items");
    }

    Ok(ProgressUpdate {
        stats: aggregate,
        new_badges,
    })
}

async fn fold_misses<S>(
    store: &S,
    quiz: &Quiz,
    result: &QuizResult,
    now: DateTime<Utc>,
) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut items = review::load_review_items(store).await?;
    let missed = record_misses(&mut items, quiz, result, now);
    if missed > 0 {
        review::save_review_items(store, &items).await?;
        tracing::debug!(quiz_id = %quiz.id, missed, "Review items updated");
    }
    Ok(())
}

/// Questions due for review, most troublesome first
pub async fn review_batch<S>(
    store: &S,
    now: DateTime<Utc>,
    max_items: usize,
) -> Result<Vec<ReviewItem>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let items = review::load_review_items(store).await?;
    Ok(select_review_batch(&items, now, max_items))
}
