use super::{read_json, write_json};
use crate::{
    error::StoreError, keys::THEME_SETTINGS_KEY, models::ThemeSettings, store::KeyValueStore,
};

/// Load the appearance settings, falling back to the defaults.
pub async fn load_theme_settings<S>(store: &S) -> Result<ThemeSettings, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, THEME_SETTINGS_KEY).await?.unwrap_or_default())
}

pub async fn save_theme_settings<S>(store: &S, settings: &ThemeSettings) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    write_json(store, THEME_SETTINGS_KEY, settings).await
}
