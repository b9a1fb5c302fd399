use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{BusinessInfo, BusinessInfoInput};

#[derive(Clone)]
pub struct BusinessInfoRepository {
    pool: SqlitePool,
}

impl BusinessInfoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_info(&self, input: BusinessInfoInput) -> Result<BusinessInfo> {
        let now = Utc::now();
        let info = sqlx::query_as::<_, BusinessInfo>(
            r#"
            INSERT INTO
                business_info (name, logo, description, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                logo,
                description,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.logo)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(info)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<BusinessInfo>> {
        let info = sqlx::query_as::<_, BusinessInfo>(
            r#"
            SELECT
                id,
                name,
                logo,
                description,
                created_at,
                updated_at
            FROM
                business_info
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }

    pub async fn get_all(&self) -> Result<Vec<BusinessInfo>> {
        let infos = sqlx::query_as::<_, BusinessInfo>(
            r#"
            SELECT
                id,
                name,
                logo,
                description,
                created_at,
                updated_at
            FROM
                business_info
            ORDER BY
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(infos)
    }

    pub async fn update_info(
        &self,
        id: i64,
        input: BusinessInfoInput,
    ) -> Result<Option<BusinessInfo>> {
        let now = Utc::now();
        let info = sqlx::query_as::<_, BusinessInfo>(
            r#"
            UPDATE
                business_info
            SET
                name = ?,
                logo = ?,
                description = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                logo,
                description,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.logo)
        .bind(input.description)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }

    pub async fn delete_info(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM business_info WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
