//! Catalog Service
//!
//! Packages, service pages, visas, static pages and partners: the public
//! read side and the admin write side of the marketing catalog.

use std::sync::Arc;

use chrono::Utc;

use crate::application::dto::request::{
    PackageRequest, PageRequest, PartnerRequest, ServiceRequest, VisaRequest,
};
use crate::domain::{
    is_valid_slug, slugify, ContentPage, ContentPageRepository, Package, PackageFilter,
    PackageRepository, PackageSort, Page, Pagination, Partner, PartnerRepository, Service,
    ServiceKind, ServiceRepository, Visa, VisaRepository,
};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{non_blank, non_negative};

/// Catalog service errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("A {0} with this slug already exists")]
    SlugTaken(&'static str),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => AppError::NotFound(e.to_string()),
            CatalogError::SlugTaken(_) => AppError::Conflict(e.to_string()),
            CatalogError::App(e) => e,
        }
    }
}

/// Catalog repositories bundled for the service
#[derive(Clone)]
pub struct CatalogRepositories {
    pub packages: Arc<dyn PackageRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub visas: Arc<dyn VisaRepository>,
    pub pages: Arc<dyn ContentPageRepository>,
    pub partners: Arc<dyn PartnerRepository>,
}

/// CatalogService implementation
pub struct CatalogService {
    repos: CatalogRepositories,
    id_generator: Arc<SnowflakeGenerator>,
}

impl CatalogService {
    pub fn new(repos: CatalogRepositories, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            repos,
            id_generator,
        }
    }

    // ------------------------------------------------------------------
    // Packages
    // ------------------------------------------------------------------

    pub async fn list_packages(
        &self,
        filter: &PackageFilter,
        sort: PackageSort,
        pagination: Pagination,
    ) -> Result<Page<Package>, CatalogError> {
        Ok(self.repos.packages.list(filter, sort, pagination).await?)
    }

    /// Public lookups hide inactive packages.
    pub async fn get_package(&self, id: i64, public: bool) -> Result<Package, CatalogError> {
        self.repos
            .packages
            .find_by_id(id)
            .await?
            .filter(|p| !public || p.is_active)
            .ok_or(CatalogError::NotFound("Package"))
    }

    pub async fn create_package(&self, req: PackageRequest) -> Result<Package, CatalogError> {
        let now = Utc::now();
        let package = build_package(self.id_generator.generate(), req, now, now)?;
        let created = self.repos.packages.create(&package).await?;
        tracing::info!(package_id = created.id, title = %created.title, "Package created");
        Ok(created)
    }

    pub async fn update_package(
        &self,
        id: i64,
        req: PackageRequest,
    ) -> Result<Package, CatalogError> {
        let existing = self.get_package(id, false).await?;
        let package = build_package(id, req, existing.created_at, Utc::now())?;
        Ok(self.repos.packages.update(&package).await?)
    }

    pub async fn delete_package(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repos.packages.delete(id).await? {
            return Err(CatalogError::NotFound("Package"));
        }
        tracing::info!(package_id = id, "Package deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub async fn list_services(
        &self,
        active_only: bool,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<Service>, CatalogError> {
        Ok(self.repos.services.list(active_only, kind).await?)
    }

    pub async fn get_service(&self, id: i64) -> Result<Service, CatalogError> {
        self.repos
            .services
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound("Service"))
    }

    pub async fn get_service_by_slug(
        &self,
        slug: &str,
        public: bool,
    ) -> Result<Service, CatalogError> {
        self.repos
            .services
            .find_by_slug(slug.trim())
            .await?
            .filter(|s| !public || s.is_active)
            .ok_or(CatalogError::NotFound("Service"))
    }

    pub async fn create_service(&self, req: ServiceRequest) -> Result<Service, CatalogError> {
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        self.ensure_service_slug_free(&slug, None).await?;

        let now = Utc::now();
        let service = build_service(self.id_generator.generate(), slug, req, now, now)?;
        let created = self.repos.services.create(&service).await?;
        tracing::info!(service_id = created.id, slug = %created.slug, "Service created");
        Ok(created)
    }

    pub async fn update_service(
        &self,
        id: i64,
        req: ServiceRequest,
    ) -> Result<Service, CatalogError> {
        let existing = self.get_service(id).await?;
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        self.ensure_service_slug_free(&slug, Some(id)).await?;

        let service = build_service(id, slug, req, existing.created_at, Utc::now())?;
        Ok(self.repos.services.update(&service).await?)
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repos.services.delete(id).await? {
            return Err(CatalogError::NotFound("Service"));
        }
        tracing::info!(service_id = id, "Service deleted");
        Ok(())
    }

    async fn ensure_service_slug_free(
        &self,
        slug: &str,
        owner: Option<i64>,
    ) -> Result<(), CatalogError> {
        match self.repos.services.find_by_slug(slug).await? {
            Some(other) if Some(other.id) != owner => Err(CatalogError::SlugTaken("service")),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Visas
    // ------------------------------------------------------------------

    pub async fn list_visas(
        &self,
        active_only: bool,
        country: Option<String>,
    ) -> Result<Vec<Visa>, CatalogError> {
        Ok(self.repos.visas.list(active_only, non_blank(country)).await?)
    }

    pub async fn get_visa(&self, id: i64, public: bool) -> Result<Visa, CatalogError> {
        self.repos
            .visas
            .find_by_id(id)
            .await?
            .filter(|v| !public || v.is_active)
            .ok_or(CatalogError::NotFound("Visa"))
    }

    pub async fn create_visa(&self, req: VisaRequest) -> Result<Visa, CatalogError> {
        let now = Utc::now();
        let visa = build_visa(self.id_generator.generate(), req, now, now)?;
        let created = self.repos.visas.create(&visa).await?;
        tracing::info!(visa_id = created.id, country = %created.country, "Visa created");
        Ok(created)
    }

    pub async fn update_visa(&self, id: i64, req: VisaRequest) -> Result<Visa, CatalogError> {
        let existing = self.get_visa(id, false).await?;
        let visa = build_visa(id, req, existing.created_at, Utc::now())?;
        Ok(self.repos.visas.update(&visa).await?)
    }

    pub async fn delete_visa(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repos.visas.delete(id).await? {
            return Err(CatalogError::NotFound("Visa"));
        }
        tracing::info!(visa_id = id, "Visa deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    pub async fn list_pages(&self, published_only: bool) -> Result<Vec<ContentPage>, CatalogError> {
        Ok(self.repos.pages.list(published_only).await?)
    }

    pub async fn get_page(&self, id: i64) -> Result<ContentPage, CatalogError> {
        self.repos
            .pages
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound("Page"))
    }

    /// Public lookups hide drafts.
    pub async fn get_page_by_slug(
        &self,
        slug: &str,
        public: bool,
    ) -> Result<ContentPage, CatalogError> {
        self.repos
            .pages
            .find_by_slug(slug.trim())
            .await?
            .filter(|p| !public || p.is_published)
            .ok_or(CatalogError::NotFound("Page"))
    }

    pub async fn create_page(&self, req: PageRequest) -> Result<ContentPage, CatalogError> {
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        self.ensure_page_slug_free(&slug, None).await?;

        let now = Utc::now();
        let page = build_page(self.id_generator.generate(), slug, req, now, now);
        let created = self.repos.pages.create(&page).await?;
        tracing::info!(page_id = created.id, slug = %created.slug, "Page created");
        Ok(created)
    }

    pub async fn update_page(&self, id: i64, req: PageRequest) -> Result<ContentPage, CatalogError> {
        let existing = self.get_page(id).await?;
        let slug = resolve_slug(req.slug.as_deref(), &req.title)?;
        self.ensure_page_slug_free(&slug, Some(id)).await?;

        let page = build_page(id, slug, req, existing.created_at, Utc::now());
        Ok(self.repos.pages.update(&page).await?)
    }

    pub async fn delete_page(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repos.pages.delete(id).await? {
            return Err(CatalogError::NotFound("Page"));
        }
        tracing::info!(page_id = id, "Page deleted");
        Ok(())
    }

    async fn ensure_page_slug_free(
        &self,
        slug: &str,
        owner: Option<i64>,
    ) -> Result<(), CatalogError> {
        match self.repos.pages.find_by_slug(slug).await? {
            Some(other) if Some(other.id) != owner => Err(CatalogError::SlugTaken("page")),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Partners
    // ------------------------------------------------------------------

    pub async fn list_partners(&self, active_only: bool) -> Result<Vec<Partner>, CatalogError> {
        Ok(self.repos.partners.list(active_only).await?)
    }

    pub async fn get_partner(&self, id: i64) -> Result<Partner, CatalogError> {
        self.repos
            .partners
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound("Partner"))
    }

    pub async fn create_partner(&self, req: PartnerRequest) -> Result<Partner, CatalogError> {
        let now = Utc::now();
        let partner = build_partner(self.id_generator.generate(), req, now, now);
        Ok(self.repos.partners.create(&partner).await?)
    }

    pub async fn update_partner(
        &self,
        id: i64,
        req: PartnerRequest,
    ) -> Result<Partner, CatalogError> {
        let existing = self.get_partner(id).await?;
        let partner = build_partner(id, req, existing.created_at, Utc::now());
        Ok(self.repos.partners.update(&partner).await?)
    }

    pub async fn delete_partner(&self, id: i64) -> Result<(), CatalogError> {
        if !self.repos.partners.delete(id).await? {
            return Err(CatalogError::NotFound("Partner"));
        }
        Ok(())
    }
}

/// Explicit slug wins, otherwise the slugified title.
fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, AppError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) if is_valid_slug(slug) => Ok(slug.to_string()),
        Some(_) => Err(AppError::invalid_field(
            "slug",
            "Use lowercase letters, digits and single dashes",
        )),
        None => {
            let slug = slugify(title);
            if slug.is_empty() {
                Err(AppError::invalid_field(
                    "slug",
                    "Title has no latin letters or digits; provide a slug",
                ))
            } else {
                Ok(slug)
            }
        }
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

type Timestamp = chrono::DateTime<Utc>;

fn build_package(
    id: i64,
    req: PackageRequest,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Result<Package, AppError> {
    let price = non_negative("price", req.price)?;
    if price.is_zero() {
        return Err(AppError::invalid_field("price", "Must be greater than zero"));
    }
    let discount_price = match req.discount_price {
        Some(discount) => {
            let discount = non_negative("discount_price", discount)?;
            if discount >= price {
                return Err(AppError::invalid_field(
                    "discount_price",
                    "Must be lower than the price",
                ));
            }
            Some(discount)
        }
        None => None,
    };

    Ok(Package {
        id,
        title: req.title.trim().to_string(),
        title_bn: non_blank(req.title_bn),
        destination: req.destination.trim().to_string(),
        category: non_blank(req.category)
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| "domestic".to_string()),
        description: req.description.trim().to_string(),
        description_bn: non_blank(req.description_bn),
        price,
        discount_price,
        duration_days: req.duration_days,
        duration_nights: req.duration_nights,
        image_url: non_blank(req.image_url),
        images: clean_list(req.images),
        highlights: clean_list(req.highlights),
        is_featured: req.is_featured,
        is_active: req.is_active,
        created_at,
        updated_at,
    })
}

fn build_service(
    id: i64,
    slug: String,
    req: ServiceRequest,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Result<Service, AppError> {
    let kind = ServiceKind::parse(&req.kind)
        .ok_or_else(|| AppError::invalid_field("kind", "Unknown service kind"))?;
    let price_from = req
        .price_from
        .map(|p| non_negative("price_from", p))
        .transpose()?;

    Ok(Service {
        id,
        slug,
        kind,
        title: req.title.trim().to_string(),
        title_bn: non_blank(req.title_bn),
        description: req.description.trim().to_string(),
        description_bn: non_blank(req.description_bn),
        icon: non_blank(req.icon),
        image_url: non_blank(req.image_url),
        price_from,
        sort_order: req.sort_order,
        is_active: req.is_active,
        created_at,
        updated_at,
    })
}

fn build_visa(
    id: i64,
    req: VisaRequest,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Result<Visa, AppError> {
    Ok(Visa {
        id,
        country: req.country.trim().to_string(),
        visa_type: req.visa_type.trim().to_string(),
        processing_days: req.processing_days,
        validity_days: req.validity_days,
        fee: non_negative("fee", req.fee)?,
        requirements: clean_list(req.requirements),
        description: req.description.trim().to_string(),
        description_bn: non_blank(req.description_bn),
        is_active: req.is_active,
        created_at,
        updated_at,
    })
}

fn build_page(
    id: i64,
    slug: String,
    req: PageRequest,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> ContentPage {
    ContentPage {
        id,
        slug,
        title: req.title.trim().to_string(),
        title_bn: non_blank(req.title_bn),
        content: req.content,
        content_bn: non_blank(req.content_bn),
        is_published: req.is_published,
        created_at,
        updated_at,
    }
}

fn build_partner(
    id: i64,
    req: PartnerRequest,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Partner {
    Partner {
        id,
        name: req.name.trim().to_string(),
        logo_url: req.logo_url.trim().to_string(),
        website_url: non_blank(req.website_url),
        sort_order: req.sort_order,
        is_active: req.is_active,
        created_at,
        updated_at,
    }
}
