//! Target repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewTarget, Target};

/// Repository interface for target persistence, scoped to missions.
#[async_trait]
pub trait TargetRepository: Send + Sync {
    async fn get(&self, id: i64) -> DomainResult<Option<Target>>;

    /// Targets of a mission in insertion order.
    async fn list_by_mission(&self, mission_id: i64) -> DomainResult<Vec<Target>>;

    /// Append a target to an incomplete mission that still has room.
    /// Returns `None` when the mission no longer accepts targets.
    async fn add(&self, mission_id: i64, target: &NewTarget) -> DomainResult<Option<Target>>;

    /// Mark an incomplete target of an assigned, incomplete mission completed.
    async fn complete(&self, id: i64) -> DomainResult<bool>;

    /// Replace the notes of an incomplete target.
    async fn update_notes(&self, id: i64, notes: &str) -> DomainResult<bool>;

    /// Delete an incomplete target, keeping at least one target on its
    /// incomplete mission.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
