//! Typed access to the stored collections.
//!
//! Each collection is read and written as a whole; there are no partial
//! updates. All functions are generic over `S: KeyValueStore + ?Sized` so they
//! work with a concrete backend as well as with `&dyn KeyValueStore`.

pub mod quizzes;
pub mod results;
pub mod review;
pub mod settings;
pub mod stats;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::StoreError,
    keys::{QUIZ_HISTORY_KEY, QUIZ_RESULTS_KEY, REVIEW_ITEMS_KEY, USER_STATS_KEY},
    store::KeyValueStore,
};

/// Collections removed by [`clear_quiz_data`]. Theme settings are kept.
pub const QUIZ_DATA_KEYS: [&str; 4] = [
    QUIZ_HISTORY_KEY,
    QUIZ_RESULTS_KEY,
    USER_STATS_KEY,
    REVIEW_ITEMS_KEY,
];

/// Remove every quiz, result, the stats aggregate and the review log.
pub async fn clear_quiz_data<S>(store: &S) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    for key in QUIZ_DATA_KEYS {
        store.remove(key).await?;
    }
    Ok(())
}

async fn read_json<T, S>(store: &S, key: &'static str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Serialization { key, source })
}

async fn write_json<T, S>(store: &S, key: &'static str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + Sync + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|source| StoreError::Serialization { key, source })?;
    store.set(key, raw).await
}
