//! Package Repository Implementation
//!
//! MySQL implementation of the PackageRepository trait. Filtering and
//! ordering mirror `PackageFilter::matches` and `PackageSort::compare`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::sql::{decode_list, encode_list, like_pattern};
use crate::domain::{
    Package, PackageFilter, PackageRepository, PackageSort, Page, Pagination,
    EFFECTIVE_PRICE_SQL,
};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, title, title_bn, destination, category, description, description_bn, \
    price, discount_price, duration_days, duration_nights, image_url, images, highlights, \
    is_featured, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PackageRow {
    id: i64,
    title: String,
    title_bn: Option<String>,
    destination: String,
    category: String,
    description: String,
    description_bn: Option<String>,
    price: Decimal,
    discount_price: Option<Decimal>,
    duration_days: i32,
    duration_nights: i32,
    image_url: Option<String>,
    images: String,
    highlights: String,
    is_featured: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackageRow {
    fn into_package(self) -> Result<Package, AppError> {
        Ok(Package {
            id: self.id,
            title: self.title,
            title_bn: self.title_bn,
            destination: self.destination,
            category: self.category,
            description: self.description,
            description_bn: self.description_bn,
            price: self.price,
            discount_price: self.discount_price,
            duration_days: self.duration_days,
            duration_nights: self.duration_nights,
            image_url: self.image_url,
            images: decode_list("packages.images", &self.images)?,
            highlights: decode_list("packages.highlights", &self.highlights)?,
            is_featured: self.is_featured,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// MySQL package repository implementation.
#[derive(Clone)]
pub struct MySqlPackageRepository {
    pool: MySqlPool,
}

impl MySqlPackageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Append the `WHERE` clause for a filter.
fn push_filter(qb: &mut QueryBuilder<'_, MySql>, filter: &PackageFilter) {
    qb.push(" WHERE 1 = 1");

    if filter.active_only {
        qb.push(" AND is_active = TRUE");
    }
    if filter.featured_only {
        qb.push(" AND is_featured = TRUE");
    }
    if let Some(destination) = non_blank(&filter.destination) {
        qb.push(" AND destination LIKE ")
            .push_bind(like_pattern(destination));
    }
    if let Some(category) = non_blank(&filter.category) {
        qb.push(" AND category = ").push_bind(category.to_string());
    }
    if let Some(min) = filter.min_price {
        qb.push(format!(" AND {} >= ", EFFECTIVE_PRICE_SQL))
            .push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(format!(" AND {} <= ", EFFECTIVE_PRICE_SQL))
            .push_bind(max);
    }
    if let Some(days) = filter.max_duration_days {
        qb.push(" AND duration_days <= ").push_bind(days);
    }
    if let Some(term) = non_blank(&filter.search) {
        let pattern = like_pattern(term);
        qb.push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR title_bn LIKE ")
            .push_bind(pattern.clone())
            .push(" OR destination LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl PackageRepository for MySqlPackageRepository {
    async fn list(
        &self,
        filter: &PackageFilter,
        sort: PackageSort,
        pagination: Pagination,
    ) -> Result<Page<Package>, AppError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM packages");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<MySql>::new(format!("SELECT {} FROM packages", COLUMNS));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY ")
            .push(sort.order_by_sql())
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows: Vec<PackageRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(PackageRow::into_package)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.max(0) as u64, pagination))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Package>, AppError> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {} FROM packages WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PackageRow::into_package).transpose()
    }

    async fn create(&self, package: &Package) -> Result<Package, AppError> {
        sqlx::query(
            r#"
            INSERT INTO packages (id, title, title_bn, destination, category, description,
                                  description_bn, price, discount_price, duration_days,
                                  duration_nights, image_url, images, highlights, is_featured,
                                  is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(package.id)
        .bind(&package.title)
        .bind(&package.title_bn)
        .bind(&package.destination)
        .bind(&package.category)
        .bind(&package.description)
        .bind(&package.description_bn)
        .bind(package.price)
        .bind(package.discount_price)
        .bind(package.duration_days)
        .bind(package.duration_nights)
        .bind(&package.image_url)
        .bind(encode_list(&package.images))
        .bind(encode_list(&package.highlights))
        .bind(package.is_featured)
        .bind(package.is_active)
        .bind(package.created_at)
        .bind(package.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_by_id(package.id)
            .await?
            .ok_or_else(|| AppError::Internal("Package vanished after insert".into()))
    }

    async fn update(&self, package: &Package) -> Result<Package, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE packages
            SET title = ?, title_bn = ?, destination = ?, category = ?, description = ?,
                description_bn = ?, price = ?, discount_price = ?, duration_days = ?,
                duration_nights = ?, image_url = ?, images = ?, highlights = ?,
                is_featured = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&package.title)
        .bind(&package.title_bn)
        .bind(&package.destination)
        .bind(&package.category)
        .bind(&package.description)
        .bind(&package.description_bn)
        .bind(package.price)
        .bind(package.discount_price)
        .bind(package.duration_days)
        .bind(package.duration_nights)
        .bind(&package.image_url)
        .bind(encode_list(&package.images))
        .bind(encode_list(&package.highlights))
        .bind(package.is_featured)
        .bind(package.is_active)
        .bind(package.updated_at)
        .bind(package.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Package not found".into()));
        }

        self.find_by_id(package.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
