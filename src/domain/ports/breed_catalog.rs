//! Breed catalog port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::Breed;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("breed not found: {0}")]
    BreedNotFound(String),

    #[error("breed catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the third-party breed catalog.
#[async_trait]
pub trait BreedCatalog: Send + Sync {
    async fn get_breed_by_id(&self, id: &str) -> Result<Breed, CatalogError>;
}
