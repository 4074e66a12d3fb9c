//! SQLite implementation of the MissionRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Mission, MissionRecord, NewMission};
use crate::domain::ports::MissionRepository;

use super::target_repository::insert_target;
use super::{to_count, to_sql_int};

#[derive(Clone)]
pub struct SqliteMissionRepository {
    pool: SqlitePool,
}

impl SqliteMissionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MissionRepository for SqliteMissionRepository {
    /// Transactional insert of a mission and its targets.
    ///
    /// Dropping the transaction on any error rolls back every row written so
    /// far, so a mission is never visible without all of its targets.
    async fn create(&self, mission: &NewMission) -> DomainResult<Mission> {
        debug!(target_count = mission.targets.len(), "Starting mission creation transaction");

        let mut tx = self.pool.begin().await?;

        let insert_result = sqlx::query(
            r"INSERT INTO missions (cat_id, completed)
               SELECT ?, 0
               WHERE ? IS NULL
                  OR (EXISTS (SELECT 1 FROM cats WHERE id = ?)
                      AND NOT EXISTS (SELECT 1 FROM missions WHERE cat_id = ? AND completed = 0))",
        )
        .bind(mission.cat_id)
        .bind(mission.cat_id)
        .bind(mission.cat_id)
        .bind(mission.cat_id)
        .execute(&mut *tx)
        .await?;

        if insert_result.rows_affected() == 0 {
            return Err(DomainError::ConcurrencyConflict {
                entity: "cat",
                id: mission.cat_id.unwrap_or_default(),
            });
        }

        let record = MissionRecord {
            id: insert_result.last_insert_rowid(),
            cat_id: mission.cat_id,
            completed: false,
        };

        let mut targets = Vec::with_capacity(mission.targets.len());
        for target in &mission.targets {
            targets.push(insert_target(&mut *tx, record.id, target).await?);
        }

        tx.commit().await?;

        info!(mission_id = record.id, target_count = targets.len(), "Mission created");
        Ok(record.with_targets(targets))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<MissionRecord>> {
        let row: Option<MissionRow> =
            sqlx::query_as("SELECT id, cat_id, completed FROM missions WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(MissionRecord::from))
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<MissionRecord>> {
        let rows: Vec<MissionRow> =
            sqlx::query_as("SELECT id, cat_id, completed FROM missions ORDER BY id LIMIT ? OFFSET ?")
                .bind(to_sql_int(limit)?)
                .bind(to_sql_int(offset)?)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(MissionRecord::from).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM missions")
            .fetch_one(&self.pool)
            .await?;
        to_count(count)
    }

    async fn assign(&self, id: i64, cat_id: i64) -> DomainResult<bool> {
        let result = sqlx::query(
            r"UPDATE missions SET cat_id = ?
               WHERE id = ? AND cat_id IS NULL AND completed = 0
                 AND EXISTS (SELECT 1 FROM cats WHERE id = ?)
                 AND NOT EXISTS (SELECT 1 FROM missions WHERE cat_id = ? AND completed = 0)",
        )
        .bind(cat_id)
        .bind(id)
        .bind(cat_id)
        .bind(cat_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn complete(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query(
            r"UPDATE missions SET completed = 1
               WHERE id = ? AND completed = 0 AND cat_id IS NOT NULL
                 AND NOT EXISTS (SELECT 1 FROM targets WHERE mission_id = ? AND completed = 0)",
        )
        .bind(id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_unassigned(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM missions WHERE id = ? AND cat_id IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct MissionRow {
    id: i64,
    cat_id: Option<i64>,
    completed: bool,
}

impl From<MissionRow> for MissionRecord {
    fn from(row: MissionRow) -> Self {
        Self {
            id: row.id,
            cat_id: row.cat_id,
            completed: row.completed,
        }
    }
}
