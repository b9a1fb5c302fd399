use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::{
    RequirementSummary, Service, ServiceCategorySummary, ServiceDetail, ServiceInput,
};

const SERVICE_COLUMNS: &str = r#"
    id,
    name,
    description,
    status,
    file_path,
    image_path,
    user_id,
    category_id,
    created_at,
    updated_at
"#;

#[derive(sqlx::FromRow)]
struct CategoryRef {
    id: i64,
    name: String,
}

#[derive(Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_service(&self, input: ServiceInput) -> Result<Service> {
        let now = Utc::now();
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO
                services (
                    name,
                    description,
                    status,
                    file_path,
                    image_path,
                    user_id,
                    category_id,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {SERVICE_COLUMNS}
            "#
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.status)
        .bind(input.file_path)
        .bind(input.image_path)
        .bind(input.user_id)
        .bind(input.category_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn get_all_services(&self) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Attach the service categories (and their requirements) to a service.
    pub async fn with_categories(&self, service: Service) -> Result<ServiceDetail> {
        let category_refs = sqlx::query_as::<_, CategoryRef>(
            r#"
            SELECT
                service_categories.id,
                service_categories.name
            FROM
                service_categories
                JOIN service_category_services
                    ON service_category_services.service_category_id = service_categories.id
            WHERE
                service_category_services.service_id = ?
            ORDER BY
                service_categories.id
            "#,
        )
        .bind(service.id)
        .fetch_all(&self.pool)
        .await?;

        let mut categories = Vec::with_capacity(category_refs.len());
        for category in category_refs {
            let requirements = sqlx::query_as::<_, RequirementSummary>(
                r#"
                SELECT
                    requirements.id,
                    requirements.name
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

            categories.push(ServiceCategorySummary {
                id: category.id,
                name: category.name,
                requirements,
            });
        }

        Ok(ServiceDetail {
            service,
            categories,
        })
    }

    pub async fn update_service(&self, id: i64, input: ServiceInput) -> Result<Option<Service>> {
        let now = Utc::now();
        let service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE
                services
            SET
                name = ?,
                description = ?,
                status = ?,
                file_path = ?,
                image_path = ?,
                user_id = ?,
                category_id = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {SERVICE_COLUMNS}
            "#
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.status)
        .bind(input.file_path)
        .bind(input.image_path)
        .bind(input.user_id)
        .bind(input.category_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn delete_service(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
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
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM services WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as usize)
    }
}
