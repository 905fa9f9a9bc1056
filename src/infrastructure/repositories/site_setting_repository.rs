//! Site Setting Repository Implementation
//!
//! Values are stored as serialized JSON in a TEXT column keyed by
//! `setting_key`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

use super::sql::decode_json;
use crate::domain::{SettingsMap, SiteSettingRepository};
use crate::shared::error::AppError;

/// MySQL site setting repository implementation.
#[derive(Clone)]
pub struct MySqlSiteSettingRepository {
    pool: MySqlPool,
}

impl MySqlSiteSettingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteSettingRepository for MySqlSiteSettingRepository {
    async fn all(&self) -> Result<SettingsMap, AppError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT setting_key, setting_value FROM site_settings")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(key, raw)| {
                let value = decode_json("site_settings.setting_value", &raw)?;
                Ok((key, value))
            })
            .collect()
    }

    async fn upsert_many(&self, values: &SettingsMap) -> Result<(), AppError> {
        if values.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        for (key, value) in values {
            sqlx::query(
                r#"
                INSERT INTO site_settings (setting_key, setting_value, updated_at)
                VALUES (?, ?, ?)
                ON DUPLICATE KEY UPDATE setting_value = VALUES(setting_value),
                                        updated_at = VALUES(updated_at)
                "#,
            )
            .bind(key)
            .bind(value.to_string())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM site_settings WHERE setting_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
