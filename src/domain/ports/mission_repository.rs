//! Mission repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Mission, MissionRecord, NewMission};

/// Repository interface for mission persistence.
///
/// Every state-changing method is a guarded write: it re-checks the
/// lifecycle preconditions inside the statement and reports `false` when
/// the row was not in the expected state anymore.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Insert the mission and all of its targets as one unit. Either every
    /// row is persisted or none is.
    async fn create(&self, mission: &NewMission) -> DomainResult<Mission>;

    async fn get(&self, id: i64) -> DomainResult<Option<MissionRecord>>;

    /// List missions ordered by id.
    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<MissionRecord>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Assign an unassigned, incomplete mission to a cat that holds no other
    /// active mission.
    async fn assign(&self, id: i64, cat_id: i64) -> DomainResult<bool>;

    /// Mark an assigned mission completed when all of its targets are.
    async fn complete(&self, id: i64) -> DomainResult<bool>;

    /// Delete an unassigned mission together with its targets.
    async fn delete_unassigned(&self, id: i64) -> DomainResult<bool>;
}
