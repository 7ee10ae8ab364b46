use crate::core::Result;
use sqlx::MySqlPool;

/// Row in the generic per-store settings store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettingRecord {
    pub name: String,
    pub store_id: i64,
    pub value: String,
}

/// Setting repository for database operations
#[derive(Clone)]
pub struct SettingRepository {
    pool: MySqlPool,
}

impl SettingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load every settings row; the service caches the result
    pub async fn load_all(&self) -> Result<Vec<SettingRecord>> {
        let records = sqlx::query_as::<_, SettingRecord>(
            r#"
            SELECT name, store_id, value
            FROM settings
            ORDER BY name, store_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Insert or replace a setting at the given store scope
    pub async fn upsert(&self, name: &str, store_id: i64, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (name, store_id, value)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE value = VALUES(value)
            "#,
        )
        .bind(name)
        .bind(store_id)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a setting at the given store scope
    pub async fn delete(&self, name: &str, store_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM settings
            WHERE name = ? AND store_id = ?
            "#,
        )
        .bind(name)
        .bind(store_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove every setting under a name prefix, across all store scopes
    pub async fn delete_by_prefix(&self, prefix: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM settings
            WHERE name LIKE CONCAT(?, '%')
            "#,
        )
        .bind(prefix)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
