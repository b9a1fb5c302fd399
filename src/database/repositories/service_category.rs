use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use crate::database::models::{
    Requirement, ServiceCategory, ServiceCategoryDetail, ServiceCategoryInput,
};

#[derive(Clone)]
pub struct ServiceCategoryRepository {
    pool: SqlitePool,
}

impl ServiceCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_service_category(
        &self,
        input: ServiceCategoryInput,
    ) -> Result<ServiceCategory> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, ServiceCategory>(
            r#"
            INSERT INTO
                service_categories (name, created_at, updated_at)
            VALUES
                (?, ?, ?)
            RETURNING
                id,
                name,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        link_services(&mut tx, category.id, &input.service_ids).await?;
        tx.commit().await?;

        Ok(category)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ServiceCategory>> {
        let category = sqlx::query_as::<_, ServiceCategory>(
            "SELECT id, name, created_at, updated_at FROM service_categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM service_categories WHERE name = ?")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<ServiceCategory>> {
        let categories = sqlx::query_as::<_, ServiceCategory>(
            "SELECT id, name, created_at, updated_at FROM service_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn with_details(&self, category: ServiceCategory) -> Result<ServiceCategoryDetail> {
        let service_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT
                service_id
            FROM
                service_category_services
            WHERE
                service_category_id = ?
            ORDER BY
                service_id
            "#,
        )
        .bind(category.id)
        .fetch_all(&self.pool)
        .await?;

        let requirements = sqlx::query_as::<_, Requirement>(
            r#"
            SELECT
                requirements.id,
                requirements.name,
                requirements.description,
                requirements.created_at,
                requirements.updated_at
            FROM
                requirements
                JOIN requirement_categories
                    ON requirement_categories.requirement_id = requirements.id
            WHERE
                requirement_categories.service_category_id = ?
            ORDER BY
                requirements.id
            "#,
        )
        .bind(category.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ServiceCategoryDetail {
            id: category.id,
            name: category.name,
            service_ids,
            requirements,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }

    pub async fn update_service_category(
        &self,
        id: i64,
        input: ServiceCategoryInput,
    ) -> Result<Option<ServiceCategory>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, ServiceCategory>(
            r#"
            UPDATE
                service_categories
            SET
                name = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(category) = category else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM service_category_services WHERE service_category_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_services(&mut tx, id, &input.service_ids).await?;
        tx.commit().await?;

        Ok(Some(category))
    }

    pub async fn delete_service_category(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM service_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of the given ids that exist, checked in a single query.
    pub async fn count_existing(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM service_categories WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as usize)
    }
}

async fn link_services(
    tx: &mut Transaction<'_, Sqlite>,
    category_id: i64,
    service_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for service_id in service_ids {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO
                service_category_services (service_category_id, service_id)
            VALUES
                (?, ?)
            "#,
        )
        .bind(category_id)
        .bind(service_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
