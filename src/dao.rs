use anyhow::{Context, Result};
use sqlx::AnyPool;

use crate::backend::BackendKind;
use crate::types::{BackendSettings, ServerContentRecord};

pub async fn find_content(pool: &AnyPool, kind: BackendKind, provider_id: &str) -> Result<Option<ServerContentRecord>> {
    let row = sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
        "SELECT provider_id, item_id, title FROM server_content WHERE backend = ? AND provider_id = ?",
    )
    .bind(kind.as_str())
    .bind(provider_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(provider_id, item_id, title)| ServerContentRecord { provider_id, item_id, title }))
}

pub async fn list_content(pool: &AnyPool, kind: BackendKind) -> Result<Vec<ServerContentRecord>> {
    let rows = sqlx::query_as::<_, (String, Option<String>, Option<String>)>(
        "SELECT provider_id, item_id, title FROM server_content WHERE backend = ? ORDER BY provider_id",
    )
    .bind(kind.as_str())
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(provider_id, item_id, title)| ServerContentRecord { provider_id, item_id, title })
        .collect())
}

pub async fn upsert_content(pool: &AnyPool, kind: BackendKind, rec: &ServerContentRecord) -> Result<()> {
    sqlx::query(
        "INSERT INTO server_content(backend, provider_id, item_id, title) VALUES(?, ?, ?, ?)\n         ON CONFLICT(backend, provider_id) DO UPDATE SET\n           item_id=excluded.item_id, title=excluded.title, updated_at=CURRENT_TIMESTAMP",
    )
    .bind(kind.as_str())
    .bind(&rec.provider_id)
    .bind(&rec.item_id)
    .bind(&rec.title)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_content(pool: &AnyPool, kind: BackendKind, provider_id: &str) -> Result<u64> {
    let res = sqlx::query("DELETE FROM server_content WHERE backend = ? AND provider_id = ?")
        .bind(kind.as_str())
        .bind(provider_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn get_settings(pool: &AnyPool, kind: BackendKind) -> Result<Option<BackendSettings>> {
    let payload = sqlx::query_scalar::<_, String>("SELECT payload FROM backend_settings WHERE backend = ?")
        .bind(kind.as_str())
        .fetch_optional(pool)
        .await?;
    payload
        .map(|p| serde_json::from_str(&p).with_context(|| format!("decoding {} settings", kind)))
        .transpose()
}

pub async fn put_settings(pool: &AnyPool, kind: BackendKind, settings: &BackendSettings) -> Result<()> {
    let payload = serde_json::to_string(settings)?;
    sqlx::query(
        "INSERT INTO backend_settings(backend, payload) VALUES(?, ?)\n         ON CONFLICT(backend) DO UPDATE SET payload=excluded.payload, updated_at=CURRENT_TIMESTAMP",
    )
    .bind(kind.as_str())
    .bind(payload)
    .execute(pool)
    .await?;
    Ok(())
}
