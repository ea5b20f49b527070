use qzr_progress::Quiz;

use super::{read_json, write_json};
use crate::{error::StoreError, keys::QUIZ_HISTORY_KEY, store::KeyValueStore};

/// All generated quizzes, newest first.
pub async fn list_quizzes<S>(store: &S) -> Result<Vec<Quiz>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, QUIZ_HISTORY_KEY).await?.unwrap_or_default())
}

/// Add a quiz at the front of the history.
pub async fn save_quiz<S>(store: &S, quiz: &Quiz) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let mut quizzes = list_quizzes(store).await?;
    quizzes.insert(0, quiz.clone());
    write_json(store, QUIZ_HISTORY_KEY, &quizzes).await
}

pub async fn find_quiz_by_id<S>(store: &S, id: &str) -> Result<Option<Quiz>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let quizzes = list_quizzes(store).await?;
    Ok(quizzes.into_iter().find(|quiz| quiz.id == id))
}
