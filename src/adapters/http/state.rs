use sqlx::SqlitePool;
use std::sync::Arc;

use crate::adapters::sqlite::{SqliteCatRepository, SqliteMissionRepository, SqliteTargetRepository};
use crate::domain::models::MissionPolicy;
use crate::domain::ports::BreedCatalog;
use crate::services::{CatService, MissionService};

pub type AgencyCatService = CatService<SqliteCatRepository>;
pub type AgencyMissionService =
    MissionService<SqliteMissionRepository, SqliteTargetRepository, SqliteCatRepository>;

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cats: Arc<AgencyCatService>,
    pub missions: Arc<AgencyMissionService>,
}

impl AppState {
    /// Wire the SQLite stores and the breed catalog into the services.
    pub fn new(pool: SqlitePool, catalog: Arc<dyn BreedCatalog>, policy: MissionPolicy) -> Self {
        let cat_repo = Arc::new(SqliteCatRepository::new(pool.clone()));
        let mission_repo = Arc::new(SqliteMissionRepository::new(pool.clone()));
        let target_repo = Arc::new(SqliteTargetRepository::new(pool));

        Self {
            cats: Arc::new(CatService::new(cat_repo.clone(), catalog)),
            missions: Arc::new(MissionService::new(mission_repo, target_repo, cat_repo, policy)),
        }
    }
}
