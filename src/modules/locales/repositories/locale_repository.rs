use crate::core::Result;
use serde::Serialize;
use sqlx::MySqlPool;

/// Installed locale resource string
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LocaleResource {
    pub name: String,
    pub value: String,
}

/// Locale resource repository for database operations
#[derive(Clone)]
pub struct LocaleRepository {
    pool: MySqlPool,
}

impl LocaleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Resource value by name
    pub async fn get(&self, name: &str) -> Result<Option<String>> {
        let value: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT value
            FROM locale_resources
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.map(|(v,)| v))
    }

    /// Insert or replace a resource
    pub async fn upsert(&self, name: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO locale_resources (name, value)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE value = VALUES(value)
            "#,
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Resources under a name prefix, ordered by name
    pub async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<LocaleResource>> {
        let resources = sqlx::query_as::<_, LocaleResource>(
            r#"
            SELECT name, value
            FROM locale_resources
            WHERE name LIKE CONCAT(?, '%')
            ORDER BY name
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(resources)
    }

    /// Remove every resource under a name prefix
    pub async fn delete_by_prefix(&self, prefix: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM locale_resources
            WHERE name LIKE CONCAT(?, '%')
            "#,
        )
        .bind(prefix)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
