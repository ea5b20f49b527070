use sqlx::{Executor, Sqlite};

/// Fetch the raw value stored under `key`.
pub async fn get_value<'e, E>(executor: E, key: &str) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        // language=SQLite
        r#"
            SELECT value
            FROM kv_store
            WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(executor)
    .await
}

/// Store `value` under `key`, replacing whatever was there.
pub async fn put_value<'e, E>(executor: E, key: &str, value: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        // language=SQLite
        r#"
            INSERT INTO kv_store (key, value)
            VALUES (?, ?)
            ON CONFLICT (key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(executor)
    .await?;
    Ok(())
}

/// Delete the value stored under `key`. Returns whether a row was removed.
pub async fn delete_value<'e, E>(executor: E, key: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM kv_store
            WHERE key = ?
        "#,
    )
    .bind(key)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
