//! # Value Objects
//!
//! Small immutable types shared by several entities.
//!
//! - **Locale**: English/Bangla selection for locale-variant text columns
//! - **Pagination / Page**: page-number pagination for admin and catalog lists
//! - **slugify**: URL slug generation for services and pages

mod locale;
mod pagination;
mod slug;

pub use locale::Locale;
pub use pagination::{Page, Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use slug::{is_valid_slug, slugify};
