//! Cat service: CRUD for agents plus the busy rule on deletion.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Cat, CatUpdate, NewCat, Page, PageRequest};
use crate::domain::ports::{BreedCatalog, CatRepository, CatalogError};

use super::resolve_page;

pub struct CatService<R: CatRepository> {
    repository: Arc<R>,
    catalog: Arc<dyn BreedCatalog>,
}

impl<R: CatRepository> CatService<R> {
    pub fn new(repository: Arc<R>, catalog: Arc<dyn BreedCatalog>) -> Self {
        Self { repository, catalog }
    }

    /// Validate the breed against the catalog and store the cat under the
    /// catalog's breed id.
    pub async fn add(&self, mut cat: NewCat) -> DomainResult<Cat> {
        cat.validate().map_err(DomainError::ValidationFailed)?;

        let breed = self.catalog.get_breed_by_id(&cat.breed).await.map_err(|e| match e {
            CatalogError::BreedNotFound(_) => DomainError::ValidationFailed(e.to_string()),
            CatalogError::Unavailable(_) => DomainError::UpstreamUnavailable(e.to_string()),
        })?;
        cat.breed = breed.id;

        let created = self.repository.create(&cat).await?;
        info!(cat_id = created.id, breed = %created.breed, "Cat recruited");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Cat> {
        self.repository.get(id).await?.ok_or(DomainError::CatNotFound(id))
    }

    pub async fn list(&self, request: &PageRequest) -> DomainResult<Page<Cat>> {
        let total = self.repository.count().await?;
        let meta = resolve_page(request, total)?;
        let items = self.repository.list(u64::from(meta.page_size), meta.offset()).await?;
        Ok(Page { items, meta })
    }

    /// Persist the new salary, then re-read the cat.
    pub async fn update(&self, id: i64, update: CatUpdate) -> DomainResult<Cat> {
        update.validate().map_err(DomainError::ValidationFailed)?;

        if !self.repository.update_salary(id, update.salary).await? {
            return Err(DomainError::CatNotFound(id));
        }
        info!(cat_id = id, salary = update.salary, "Cat salary updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if self.repository.is_busy(id).await? {
            warn!(cat_id = id, "Refusing to delete busy cat");
            return Err(DomainError::validation(
                "cat is busy with a mission. Complete mission before deleting the cat",
            ));
        }

        if self.repository.delete_if_idle(id).await? {
            info!(cat_id = id, "Cat deleted");
            return Ok(());
        }

        // Either the cat never existed or it picked up a mission in between.
        match self.repository.get(id).await? {
            None => Err(DomainError::CatNotFound(id)),
            Some(_) => Err(DomainError::ConcurrencyConflict { entity: "cat", id }),
        }
    }
}
