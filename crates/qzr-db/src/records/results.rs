use qzr_progress::QuizResult;

use super::{read_json, write_json};
use crate::{error::StoreError, keys::QUIZ_RESULTS_KEY, store::KeyValueStore};

/// All completed results, newest first.
pub async fn list_results<S>(store: &S) -> Result<Vec<QuizResult>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, QUIZ_RESULTS_KEY).await?.unwrap_or_default())
}

/// Add a result at the front of the list.
pub async fn save_result<S>(store: &S, result: &QuizResult) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut results = list_results(store).await?;
    results.insert(0, result.clone());
    write_json(store, QUIZ_RESULTS_KEY, &results).await
}

/// The most recent result recorded for a quiz.
pub async fn find_result_by_quiz_id<S>(
    store: &S,
    quiz_id: &str,
) -> Result<Option<QuizResult>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let results = list_results(store).await?;
    Ok(results.into_iter().find(|result| result.quiz_id == quiz_id))
}
