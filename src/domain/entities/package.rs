//! Holiday package entity and repository trait.
//!
//! Maps to the `packages` table.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, Pagination};
use crate::shared::error::AppError;

/// A sellable holiday or tour product.
///
/// Maps to the `packages` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - title / title_bn: VARCHAR(200)
/// - destination: VARCHAR(120)
/// - category: VARCHAR(60)
/// - price / discount_price: DECIMAL(12,2)
/// - images / highlights: TEXT (JSON arrays)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(with = "crate::shared::id_string")]
    pub id: i64,
    pub title: String,
    pub title_bn: Option<String>,
    pub destination: String,
    /// Lowercase category such as `domestic`, `international` or `umrah`
    pub category: String,
    pub description: String,
    pub description_bn: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Price a customer actually pays.
    pub fn effective_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if discount < self.price => discount,
            _ => self.price,
        }
    }

    /// Whether a discount is currently shown.
    pub fn is_discounted(&self) -> bool {
        self.effective_price() < self.price
    }
}

/// SQL expression equivalent to [`Package::effective_price`].
pub const EFFECTIVE_PRICE_SQL: &str =
    "CASE WHEN discount_price IS NOT NULL AND discount_price < price THEN discount_price ELSE price END";

/// Catalog filter for package listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFilter {
    /// Case-insensitive substring of the destination
    pub destination: Option<String>,
    pub category: Option<String>,
    /// Bounds on the effective price
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub max_duration_days: Option<i32>,
    pub featured_only: bool,
    pub active_only: bool,
    /// Free text matched against title, Bangla title and destination
    pub search: Option<String>,
}

impl PackageFilter {
    pub fn matches(&self, package: &Package) -> bool {
        if self.active_only && !package.is_active {
            return false;
        }
        if self.featured_only && !package.is_featured {
            return false;
        }
        if let Some(destination) = non_blank(&self.destination) {
            if !contains_ci(&package.destination, destination) {
                return false;
            }
        }
        if let Some(category) = non_blank(&self.category) {
            if !package.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        let price = package.effective_price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if self
            .max_duration_days
            .is_some_and(|max| package.duration_days > max)
        {
            return false;
        }
        if let Some(term) = non_blank(&self.search) {
            let in_title = contains_ci(&package.title, term);
            let in_title_bn = package
                .title_bn
                .as_deref()
                .is_some_and(|t| contains_ci(t, term));
            if !(in_title || in_title_bn || contains_ci(&package.destination, term)) {
                return false;
            }
        }
        true
    }
}

/// Sort orders for package listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    DurationAsc,
    DurationDesc,
    Title,
}

impl PackageSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "latest" => Some(Self::Newest),
            "price_asc" | "price" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "duration_asc" | "duration" => Some(Self::DurationAsc),
            "duration_desc" => Some(Self::DurationDesc),
            "title" | "name" => Some(Self::Title),
            _ => None,
        }
    }

    /// `ORDER BY` clause; ties always break on id so pages are stable.
    pub fn order_by_sql(&self) -> String {
        match self {
            Self::Newest => "created_at DESC, id DESC".to_string(),
            Self::PriceAsc => format!("{} ASC, id ASC", EFFECTIVE_PRICE_SQL),
            Self::PriceDesc => format!("{} DESC, id DESC", EFFECTIVE_PRICE_SQL),
            Self::DurationAsc => "duration_days ASC, id ASC".to_string(),
            Self::DurationDesc => "duration_days DESC, id DESC".to_string(),
            Self::Title => "title ASC, id ASC".to_string(),
        }
    }

    pub fn compare(&self, a: &Package, b: &Package) -> Ordering {
        match self {
            Self::Newest => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id)),
            Self::PriceAsc => a
                .effective_price()
                .cmp(&b.effective_price())
                .then_with(|| a.id.cmp(&b.id)),
            Self::PriceDesc => b
                .effective_price()
                .cmp(&a.effective_price())
                .then_with(|| b.id.cmp(&a.id)),
            Self::DurationAsc => a
                .duration_days
                .cmp(&b.duration_days)
                .then_with(|| a.id.cmp(&b.id)),
            Self::DurationDesc => b
                .duration_days
                .cmp(&a.duration_days)
                .then_with(|| b.id.cmp(&a.id)),
            Self::Title => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id)),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Repository trait for package data access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Filtered, sorted page of packages.
    async fn list(
        &self,
        filter: &PackageFilter,
        sort: PackageSort,
        pagination: Pagination,
    ) -> Result<Page<Package>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Package>, AppError>;

    async fn create(&self, package: &Package) -> Result<Package, AppError>;

    async fn update(&self, package: &Package) -> Result<Package, AppError>;

    /// Returns `false` when no row existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
