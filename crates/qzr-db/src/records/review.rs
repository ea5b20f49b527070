use qzr_progress::ReviewItem;

use super::{read_json, write_json};
use crate::{error::StoreError, keys::REVIEW_ITEMS_KEY, store::KeyValueStore};

pub async fn load_review_items<S>(store: &S) -> Result<Vec<ReviewItem>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, REVIEW_ITEMS_KEY).await?.unwrap_or_default())
}

pub async fn save_review_items<S>(store: &S, items: &[ReviewItem]) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    write_json(store, REVIEW_ITEMS_KEY, items).await
}
