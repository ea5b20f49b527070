use qzr_progress::UserStats;

use super::{read_json, write_json};
use crate::{error::StoreError, keys::USER_STATS_KEY, store::KeyValueStore};

/// Load the aggregate stats, or the zero-valued default for a new user.
pub async fn load_stats<S>(store: &S) -> Result<UserStats, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, USER_STATS_KEY).await?.unwrap_or_default())
}

/// Replace the aggregate stats in a single write.
pub async fn save_stats<S>(store: &S, stats: &UserStats) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    write_json(store, USER_STATS_KEY, stats).await
}
