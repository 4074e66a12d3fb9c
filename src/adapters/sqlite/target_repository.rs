//! SQLite implementation of the TargetRepository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewTarget, Target, MAX_TARGETS};
use crate::domain::ports::TargetRepository;

#[derive(Clone)]
pub struct SqliteTargetRepository {
    pool: SqlitePool,
}

impl SqliteTargetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert a target row through any executor, so the same statement serves
/// both standalone inserts and the mission creation transaction.
pub(crate) async fn insert_target<'e, E>(
    executor: E,
    mission_id: i64,
    target: &NewTarget,
) -> DomainResult<Target>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO targets (mission_id, name, country, notes, completed) VALUES (?, ?, ?, ?, 0)",
    )
    .bind(mission_id)
    .bind(&target.name)
    .bind(&target.country)
    .bind(&target.notes)
    .execute(executor)
    .await?;

    Ok(target.clone().into_target(result.last_insert_rowid(), mission_id))
}

#[async_trait]
impl TargetRepository for SqliteTargetRepository {
    async fn get(&self, id: i64) -> DomainResult<Option<Target>> {
        let row: Option<TargetRow> = sqlx::query_as(
            "SELECT id, mission_id, name, country, notes, completed FROM targets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Target::from))
    }

    async fn list_by_mission(&self, mission_id: i64) -> DomainResult<Vec<Target>> {
        let rows: Vec<TargetRow> = sqlx::query_as(
            "SELECT id, mission_id, name, country, notes, completed FROM targets WHERE mission_id = ? ORDER BY id",
        )
        .bind(mission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Target::from).collect())
    }

    async fn add(&self, mission_id: i64, target: &NewTarget) -> DomainResult<Option<Target>> {
        let result = sqlx::query(
            r"INSERT INTO targets (mission_id, name, country, notes, completed)
               SELECT ?, ?, ?, ?, 0
               WHERE EXISTS (SELECT 1 FROM missions WHERE id = ? AND completed = 0)
                 AND (SELECT COUNT(*) FROM targets WHERE mission_id = ?) < ?",
        )
        .bind(mission_id)
        .bind(&target.name)
        .bind(&target.country)
        .bind(&target.notes)
        .bind(mission_id)
        .bind(mission_id)
        .bind(MAX_TARGETS as i64)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(target.clone().into_target(result.last_insert_rowid(), mission_id)))
    }

    async fn complete(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query(
            r"UPDATE targets SET completed = 1
               WHERE id = ? AND completed = 0
                 AND EXISTS (
                     SELECT 1 FROM missions m
                     WHERE m.id = targets.mission_id AND m.completed = 0 AND m.cat_id IS NOT NULL
                 )",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_notes(&self, id: i64, notes: &str) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE targets SET notes = ? WHERE id = ? AND completed = 0")
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query(
            r"DELETE FROM targets
               WHERE id = ? AND completed = 0
                 AND EXISTS (SELECT 1 FROM missions m WHERE m.id = targets.mission_id AND m.completed = 0)
                 AND (SELECT COUNT(*) FROM targets t WHERE t.mission_id = targets.mission_id) > 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TargetRow {
    id: i64,
    mission_id: i64,
    name: String,
    country: String,
    notes: String,
    completed: bool,
}

impl From<TargetRow> for Target {
    fn from(row: TargetRow) -> Self {
        Self {
            id: row.id,
            mission_id: row.mission_id,
            name: row.name,
            country: row.country,
            notes: row.notes,
            completed: row.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup() -> (SqliteTargetRepository, SqlitePool) {
        let pool = create_migrated_test_pool().await.unwrap();
        (SqliteTargetRepository::new(pool.clone()), pool)
    }

    async fn insert_mission(pool: &SqlitePool, cat_id: Option<i64>, completed: bool) -> i64 {
        sqlx::query("INSERT INTO missions (cat_id, completed) VALUES (?, ?)")
            .bind(cat_id)
            .bind(completed)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[tokio::test]
    async fn test_add_respects_capacity() {
        let (repo, pool) = setup().await;
        let mission_id = insert_mission(&pool, None, false).await;

        for i in 0..3 {
            let added = repo.add(mission_id, &NewTarget::new(format!("t{i}"), "FR")).await.unwrap();
            assert!(added.is_some());
        }
        let fourth = repo.add(mission_id, &NewTarget::new("t3", "FR")).await.unwrap();
        assert!(fourth.is_none());
        assert_eq!(repo.list_by_mission(mission_id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_add_to_completed_mission_rejected() {
        let (repo, pool) = setup().await;
        let mission_id = insert_mission(&pool, Some(1), true).await;

        let added = repo.add(mission_id, &NewTarget::new("late", "DE")).await.unwrap();
        assert!(added.is_none());
    }

    #[tokio::test]
    async fn test_complete_requires_assigned_mission() {
        let (repo, pool) = setup().await;
        let unassigned = insert_mission(&pool, None, false).await;
        let target = insert_target(&pool, unassigned, &NewTarget::new("a", "PL")).await.unwrap();

        assert!(!repo.complete(target.id).await.unwrap());

        sqlx::query("UPDATE missions SET cat_id = 3 WHERE id = ?")
            .bind(unassigned)
            .execute(&pool)
            .await
            .unwrap();

        assert!(repo.complete(target.id).await.unwrap());
        assert!(repo.get(target.id).await.unwrap().unwrap().completed);
        assert!(!repo.complete(target.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_notes_frozen_after_completion() {
        let (repo, pool) = setup().await;
        let mission_id = insert_mission(&pool, Some(1), false).await;
        let target = insert_target(&pool, mission_id, &NewTarget::new("a", "PL")).await.unwrap();

        assert!(repo.update_notes(target.id, "seen at the docks").await.unwrap());
        assert_eq!(repo.get(target.id).await.unwrap().unwrap().notes, "seen at the docks");

        assert!(repo.complete(target.id).await.unwrap());
        assert!(!repo.update_notes(target.id, "too late").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_keeps_last_target() {
        let (repo, pool) = setup().await;
        let mission_id = insert_mission(&pool, None, false).await;
        let first = insert_target(&pool, mission_id, &NewTarget::new("a", "PL")).await.unwrap();
        let second = insert_target(&pool, mission_id, &NewTarget::new("b", "PL")).await.unwrap();

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(second.id).await.unwrap());
        assert_eq!(repo.list_by_mission(mission_id).await.unwrap(), vec![second]);
    }
}
