//! SQLite implementation of the CatRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Cat, NewCat};
use crate::domain::ports::CatRepository;

use super::{to_count, to_sql_int};

#[derive(Clone)]
pub struct SqliteCatRepository {
    pool: SqlitePool,
}

impl SqliteCatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatRepository for SqliteCatRepository {
    async fn create(&self, cat: &NewCat) -> DomainResult<Cat> {
        let result = sqlx::query(
            "INSERT INTO cats (name, breed, years_of_experience, salary) VALUES (?, ?, ?, ?)",
        )
        .bind(&cat.name)
        .bind(&cat.breed)
        .bind(cat.years_of_experience)
        .bind(cat.salary)
        .execute(&self.pool)
        .await?;

        Ok(cat.clone().into_cat(result.last_insert_rowid()))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Cat>> {
        let row: Option<CatRow> = sqlx::query_as(
            "SELECT id, name, breed, years_of_experience, salary FROM cats WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cat::from))
    }

    async fn list(&self, limit: u64, offset: u64) -> DomainResult<Vec<Cat>> {
        let rows: Vec<CatRow> = sqlx::query_as(
            "SELECT id, name, breed, years_of_experience, salary FROM cats ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(to_sql_int(limit)?)
        .bind(to_sql_int(offset)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Cat::from).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cats")
            .fetch_one(&self.pool)
            .await?;
        to_count(count)
    }

    async fn update_salary(&self, id: i64, salary: i64) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE cats SET salary = ? WHERE id = ?")
            .bind(salary)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_if_idle(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query(
            r"DELETE FROM cats WHERE id = ?
               AND NOT EXISTS (SELECT 1 FROM missions WHERE cat_id = ? AND completed = 0)",
        )
        .bind(id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_busy(&self, id: i64) -> DomainResult<bool> {
        let busy: i64 = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM missions WHERE cat_id = ? AND completed = 0)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(busy != 0)
    }
}

#[derive(sqlx::FromRow)]
struct CatRow {
    id: i64,
    name: String,
    breed: String,
    years_of_experience: i64,
    salary: i64,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            breed: row.breed,
            years_of_experience: row.years_of_experience,
            salary: row.salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> (SqliteCatRepository, SqlitePool) {
        let pool = create_migrated_test_pool().await.unwrap();
        (SqliteCatRepository::new(pool.clone()), pool)
    }

    fn tom() -> NewCat {
        NewCat::new("Tom", "abys").with_experience(1).with_salary(1000)
    }

    #[tokio::test]
    async fn test_create_and_get_cat() {
        let (repo, _pool) = setup_test_repo().await;

        let cat = repo.create(&tom()).await.unwrap();
        assert!(cat.id >= 1);

        let retrieved = repo.get(cat.id).await.unwrap();
        assert_eq!(retrieved, Some(cat));
    }

    #[tokio::test]
    async fn test_get_missing_cat() {
        let (repo, _pool) = setup_test_repo().await;
        assert!(repo.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_paged() {
        let (repo, _pool) = setup_test_repo().await;
        for i in 0..7 {
            repo.create(&NewCat::new(format!("cat-{i}"), "abys")).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 7);

        let first = repo.list(5, 0).await.unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].name, "cat-0");

        let second = repo.list(5, 5).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].name, "cat-6");
    }

    #[tokio::test]
    async fn test_update_salary() {
        let (repo, _pool) = setup_test_repo().await;
        let cat = repo.create(&tom()).await.unwrap();

        assert!(repo.update_salary(cat.id, 2500).await.unwrap());
        assert_eq!(repo.get(cat.id).await.unwrap().unwrap().salary, 2500);
        assert!(!repo.update_salary(cat.id + 100, 2500).await.unwrap());
    }

    #[tokio::test]
    async fn test_busy_cat_is_not_deleted() {
        let (repo, pool) = setup_test_repo().await;
        let cat = repo.create(&tom()).await.unwrap();

        sqlx::query("INSERT INTO missions (cat_id, completed) VALUES (?, 0)")
            .bind(cat.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(repo.is_busy(cat.id).await.unwrap());
        assert!(!repo.delete_if_idle(cat.id).await.unwrap());
        assert!(repo.get(cat.id).await.unwrap().is_some());

        sqlx::query("UPDATE missions SET completed = 1 WHERE cat_id = ?")
            .bind(cat.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(!repo.is_busy(cat.id).await.unwrap());
        assert!(repo.delete_if_idle(cat.id).await.unwrap());
        assert!(repo.get(cat.id).await.unwrap().is_none());
    }
}
