//! Site-wide settings (contact details, social links, banners).
//!
//! Stored as key/JSON-value pairs in `site_settings`. Keys under the
//! `private.` prefix are never exposed on the public endpoint.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::shared::error::AppError;

pub type SettingsMap = BTreeMap<String, Value>;

/// Prefix of settings visible to admins only.
pub const PRIVATE_PREFIX: &str = "private.";

pub const MAX_KEY_LENGTH: usize = 64;

/// Whether a settings key is well-formed: 1-64 chars of `[A-Za-z0-9_.]`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Keys are compared case-insensitively, matching the column collation.
pub fn is_public_key(key: &str) -> bool {
    !key
        .get(..PRIVATE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(PRIVATE_PREFIX))
}

/// Canonical stored form of a key.
pub fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase()
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteSettingRepository: Send + Sync {
    async fn all(&self) -> Result<SettingsMap, AppError>;

    /// Insert or replace every entry atomically.
    async fn upsert_many(&self, values: &SettingsMap) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<bool, AppError>;
}
