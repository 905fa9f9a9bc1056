//! Site Settings Service
//!
//! Key/value settings edited in the back-office. Keys under
//! [`PRIVATE_PREFIX`](crate::domain::PRIVATE_PREFIX) stay admin-only.

use std::sync::Arc;

use crate::domain::{
    is_public_key, is_valid_key, normalize_key, SettingsMap, SiteSettingRepository,
};
use crate::shared::error::{AppError, FieldError};

/// Settings service errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Setting not found")]
    NotFound,

    #[error("Invalid setting keys")]
    InvalidKeys(Vec<String>),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        match e {
            SettingsError::NotFound => AppError::NotFound(e.to_string()),
            SettingsError::InvalidKeys(keys) => AppError::Validation {
                message: format!("Invalid setting keys: {}", keys.join(", ")),
                errors: keys
                    .into_iter()
                    .map(|key| FieldError {
                        field: key,
                        message: "Keys are 1-64 characters of letters, digits, '_' or '.'"
                            .to_string(),
                    })
                    .collect(),
            },
            SettingsError::App(e) => e,
        }
    }
}

/// SettingsService implementation
pub struct SettingsService {
    settings: Arc<dyn SiteSettingRepository>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SiteSettingRepository>) -> Self {
        Self { settings }
    }

    /// Settings safe to show on the public site.
    pub async fn public_settings(&self) -> Result<SettingsMap, SettingsError> {
        let mut all = self.settings.all().await?;
        all.retain(|key, _| is_public_key(key));
        Ok(all)
    }

    pub async fn all(&self) -> Result<SettingsMap, SettingsError> {
        Ok(self.settings.all().await?)
    }

    /// Upsert every entry under its lowercase key, then return the full map.
    pub async fn update(&self, values: SettingsMap) -> Result<SettingsMap, SettingsError> {
        let invalid: Vec<String> = values
            .keys()
            .filter(|key| !is_valid_key(key))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(SettingsError::InvalidKeys(invalid));
        }

        let values: SettingsMap = values
            .into_iter()
            .map(|(key, value)| (normalize_key(&key), value))
            .collect();
        self.settings.upsert_many(&values).await?;
        tracing::info!(keys = ?values.keys().collect::<Vec<_>>(), "Site settings updated");

        self.all().await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let key = normalize_key(key);
        if !is_valid_key(&key) || !self.settings.delete(&key).await? {
            return Err(SettingsError::NotFound);
        }
        tracing::info!(key = %key, "Site setting deleted");
        Ok(())
    }
}
