//! Cat repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Cat, NewCat};

/// Repository interface for cat persistence.
#[async_trait]
pub trait CatRepository: Send + Sync {
    /// Insert a cat and return it with its assigned id.
    async fn create(&self, cat: &NewCat) -> DomainResult<Cat>;

    async fn get(&self, id: i64) -> DomainResult<Option<Cat>>;

    /// List cats ordered by id.
    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Cat>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Set a cat's salary. Returns `false` when the cat does not exist.
    async fn update_salary(&self, id: i64, salary: i64) -> DomainResult<bool>;

    /// Delete a cat unless it is busy. Returns `false` when nothing was
    /// deleted, either because the cat is missing or because it holds an
    /// active mission.
    async fn delete_if_idle(&self, id: i64) -> DomainResult<bool>;

    /// A cat is busy while it is the assignee of any incomplete mission.
    async fn is_busy(&self, id: i64) -> DomainResult<bool>;
}
