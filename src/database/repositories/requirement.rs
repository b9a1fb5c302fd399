use anyhow::Result;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::models::{Requirement, RequirementDetail};

#[derive(Clone)]
pub struct RequirementRepository {
    pool: SqlitePool,
}

impl RequirementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_requirement(
        &self,
        name: &str,
        description: &str,
        category_ids: &[i64],
    ) -> Result<Requirement> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            INSERT INTO
                requirements (name, description, created_at, updated_at)
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                name,
                description,
                created_at,
                updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        link_categories(&mut tx, requirement.id, category_ids).await?;
        tx.commit().await?;

        Ok(requirement)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Requirement>> {
        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            SELECT
                id,
                name,
                description,
                created_at,
                updated_at
            FROM
                requirements
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(requirement)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM requirements WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<Requirement>> {
        let requirements = sqlx::query_as::<_, Requirement>(
            r#"
            SELECT
                id,
                name,
                description,
                created_at,
                updated_at
            FROM
                requirements
            ORDER BY
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requirements)
    }

    pub async fn with_categories(&self, requirement: Requirement) -> Result<RequirementDetail> {
        let category_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT
                service_category_id
            FROM
                requirement_categories
            WHERE
                requirement_id = ?
            ORDER BY
                service_category_id
            "#,
        )
        .bind(requirement.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RequirementDetail {
            requirement,
            category_ids,
        })
    }

    pub async fn update_requirement(
        &self,
        id: i64,
        name: &str,
        description: &str,
        category_ids: &[i64],
    ) -> Result<Option<Requirement>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let requirement = sqlx::query_as::<_, Requirement>(
            r#"
            UPDATE
                requirements
            SET
                name = ?,
                description = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                description,
                created_at,
                updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(requirement) = requirement else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM requirement_categories WHERE requirement_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_categories(&mut tx, id, category_ids).await?;
        tx.commit().await?;

        Ok(Some(requirement))
    }

    pub async fn delete_requirement(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM requirements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn link_categories(
    tx: &mut Transaction<'_, Sqlite>,
    requirement_id: i64,
    category_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for category_id in category_ids {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO
                requirement_categories (requirement_id, service_category_id)
            VALUES
                (?, ?)
            "#,
        )
        .bind(requirement_id)
        .bind(category_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
