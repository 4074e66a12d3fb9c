//! Business logic on top of the storage and catalog ports.

pub mod cat_service;
pub mod mission_service;

pub use cat_service::CatService;
pub use mission_service::MissionService;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{PageMeta, PageRequest};

/// Resolve a raw page request against the current row count.
pub(crate) fn resolve_page(request: &PageRequest, total: u64) -> DomainResult<PageMeta> {
    let (page, size) = request.normalize().map_err(DomainError::ValidationFailed)?;
    let meta = PageMeta::new(page, size, total);
    meta.check_in_range().map_err(DomainError::ValidationFailed)?;
    Ok(meta)
}
