//! Mission lifecycle engine.
//!
//! Every transition checks its preconditions in a fixed order (first failure
//! wins) and then issues a guarded write that re-asserts the same
//! preconditions in storage. A guarded write that matches no row means a
//! concurrent request changed the mission, cat, or target in between, and is
//! reported as [`DomainError::ConcurrencyConflict`].

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Mission, MissionPolicy, MissionRecord, NewMission, NewTarget, Page, PageRequest, Target,
    TargetUpdate, MIN_TARGETS,
};
use crate::domain::ports::{CatRepository, MissionRepository, TargetRepository};

use super::resolve_page;

/// Log and build a business-rule rejection.
fn rejected(entity: &'static str, id: i64, reason: &str) -> DomainError {
    warn!(entity, id, reason, "Transition rejected");
    DomainError::validation(reason)
}

pub struct MissionService<M, T, C>
where
    M: MissionRepository,
    T: TargetRepository,
    C: CatRepository,
{
    missions: Arc<M>,
    targets: Arc<T>,
    cats: Arc<C>,
    policy: MissionPolicy,
}

impl<M, T, C> MissionService<M, T, C>
where
    M: MissionRepository,
    T: TargetRepository,
    C: CatRepository,
{
    pub fn new(missions: Arc<M>, targets: Arc<T>, cats: Arc<C>, policy: MissionPolicy) -> Self {
        Self {
            missions,
            targets,
            cats,
            policy,
        }
    }

    /// Create a mission together with its targets as one unit.
    ///
    /// Target count is not checked here; callers that need the 1..=3 rule
    /// enforce it before calling. A non-zero `cat_id` creates the mission
    /// already assigned, subject to the same cat rules as [`Self::assign`].
    pub async fn create(&self, mission: NewMission) -> DomainResult<Mission> {
        for target in &mission.targets {
            target.validate().map_err(DomainError::ValidationFailed)?;
        }

        if let Some(cat_id) = mission.cat_id {
            self.ensure_cat_available(cat_id).await?;
        }

        let created = self.missions.create(&mission).await?;
        info!(
            mission_id = created.id,
            cat_id = created.cat_id.unwrap_or_default(),
            targets = created.targets.len(),
            "Mission created"
        );
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Mission> {
        let record = self.load_record(id).await?;
        self.assemble(record).await
    }

    pub async fn list(&self, request: &PageRequest) -> DomainResult<Page<Mission>> {
        let total = self.missions.count().await?;
        let meta = resolve_page(request, total)?;

        let records = self.missions.list(u64::from(meta.page_size), meta.offset()).await?;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            items.push(self.assemble(record).await?);
        }

        Ok(Page { items, meta })
    }

    pub async fn assign(&self, mission_id: i64, cat_id: i64) -> DomainResult<Mission> {
        let record = self.load_record(mission_id).await?;
        if record.is_assigned() {
            return Err(rejected("mission", mission_id, "mission is already assigned"));
        }
        if record.completed {
            return Err(rejected("mission", mission_id, "cannot assign cat to a completed mission"));
        }
        self.ensure_cat_available(cat_id).await?;

        if !self.missions.assign(mission_id, cat_id).await? {
            return Err(DomainError::ConcurrencyConflict { entity: "mission", id: mission_id });
        }

        info!(mission_id, cat_id, "Cat assigned to mission");
        self.get(mission_id).await
    }

    /// Mark a target completed.
    ///
    /// The target's owning mission is checked only under
    /// `strict_target_ownership`; otherwise the given mission gates the call
    /// and storage gates the target's own mission.
    pub async fn complete_target(&self, mission_id: i64, target_id: i64) -> DomainResult<Target> {
        let record = self.load_record(mission_id).await?;
        if record.completed {
            return Err(rejected("mission", mission_id, "mission is already completed"));
        }
        if !record.is_assigned() {
            return Err(rejected("mission", mission_id, "mission is not assigned to anybody"));
        }

        let target = self.load_target(target_id).await?;
        if self.policy.strict_target_ownership && target.mission_id != mission_id {
            return Err(rejected("target", target_id, "target is not related to this mission"));
        }
        if target.completed {
            return Err(rejected("target", target_id, "target is already completed"));
        }

        if !self.targets.complete(target_id).await? {
            return Err(DomainError::ConcurrencyConflict { entity: "target", id: target_id });
        }

        info!(mission_id, target_id, "Target completed");
        Ok(Target { completed: true, ..target })
    }

    pub async fn update_target(
        &self,
        mission_id: i64,
        target_id: i64,
        update: TargetUpdate,
    ) -> DomainResult<Target> {
        let target = self.load_target(target_id).await?;
        if target.completed {
            return Err(rejected("target", target_id, "target is already completed"));
        }
        if target.mission_id != mission_id {
            return Err(rejected("target", target_id, "target is not related to this mission"));
        }

        if !self.targets.update_notes(target_id, &update.notes).await? {
            return Err(DomainError::ConcurrencyConflict { entity: "target", id: target_id });
        }

        debug!(mission_id, target_id, "Target notes updated");
        self.load_target(target_id).await
    }

    pub async fn delete_target(&self, mission_id: i64, target_id: i64) -> DomainResult<()> {
        let target = self.load_target(target_id).await?;
        if target.completed {
            return Err(rejected("target", target_id, "target is already completed"));
        }
        if target.mission_id != mission_id {
            return Err(rejected("target", target_id, "target is not related to this mission"));
        }

        let mission = self.get(mission_id).await?;
        if mission.completed {
            return Err(rejected("mission", mission_id, "mission is already completed"));
        }
        if mission.targets.len() <= MIN_TARGETS {
            return Err(rejected("mission", mission_id, "mission must have at least one target"));
        }

        if !self.targets.delete(target_id).await? {
            return Err(DomainError::ConcurrencyConflict { entity: "target", id: target_id });
        }

        info!(mission_id, target_id, "Target removed");
        Ok(())
    }

    pub async fn add_target(&self, mission_id: i64, target: NewTarget) -> DomainResult<Mission> {
        let mut mission = self.get(mission_id).await?;
        target.validate().map_err(DomainError::ValidationFailed)?;
        if mission.completed {
            return Err(rejected("mission", mission_id, "mission is already completed"));
        }
        if !mission.has_room_for_target() {
            return Err(rejected("mission", mission_id, "mission cannot have more than 3 targets"));
        }

        let added = self
            .targets
            .add(mission_id, &target)
            .await?
            .ok_or(DomainError::ConcurrencyConflict { entity: "mission", id: mission_id })?;

        info!(mission_id, target_id = added.id, "Target added");
        mission.targets.push(added);
        Ok(mission)
    }

    pub async fn complete(&self, mission_id: i64) -> DomainResult<Mission> {
        let mut mission = self.get(mission_id).await?;
        if !mission.is_assigned() {
            return Err(rejected("mission", mission_id, "mission must be assigned first"));
        }
        if mission.completed {
            return Err(rejected("mission", mission_id, "mission is already completed"));
        }
        if !mission.all_targets_completed() {
            return Err(rejected("mission", mission_id, "mission has uncompleted targets"));
        }

        if !self.missions.complete(mission_id).await? {
            return Err(DomainError::ConcurrencyConflict { entity: "mission", id: mission_id });
        }

        info!(mission_id, "Mission completed");
        mission.completed = true;
        Ok(mission)
    }

    /// Delete an unassigned mission and, through storage, its targets.
    ///
    /// Assigned missions stay, completed or not.
    pub async fn delete(&self, mission_id: i64) -> DomainResult<()> {
        let record = self.load_record(mission_id).await?;
        if record.is_assigned() {
            return Err(rejected("mission", mission_id, "mission is already assigned"));
        }

        if !self.missions.delete_unassigned(mission_id).await? {
            return match self.missions.get(mission_id).await? {
                None => Err(DomainError::MissionNotFound(mission_id)),
                Some(_) => Err(DomainError::ConcurrencyConflict { entity: "mission", id: mission_id }),
            };
        }

        info!(mission_id, "Mission deleted");
        Ok(())
    }

    async fn ensure_cat_available(&self, cat_id: i64) -> DomainResult<()> {
        if self.cats.get(cat_id).await?.is_none() {
            return Err(DomainError::CatNotFound(cat_id));
        }
        if self.cats.is_busy(cat_id).await? {
            return Err(rejected("cat", cat_id, "cat is busy with another mission"));
        }
        Ok(())
    }

    async fn load_record(&self, id: i64) -> DomainResult<MissionRecord> {
        self.missions.get(id).await?.ok_or(DomainError::MissionNotFound(id))
    }

    async fn load_target(&self, id: i64) -> DomainResult<Target> {
        self.targets.get(id).await?.ok_or(DomainError::TargetNotFound(id))
    }

    async fn assemble(&self, record: MissionRecord) -> DomainResult<Mission> {
        let targets = self.targets.list_by_mission(record.id).await?;
        Ok(record.with_targets(targets))
    }
}
