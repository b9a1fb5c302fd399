use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Faq, FaqInput};

#[derive(Clone)]
pub struct FaqRepository {
    pool: SqlitePool,
}

impl FaqRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_faq(&self, input: FaqInput) -> Result<Faq> {
        let now = Utc::now();
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO
                faqs (question, answer, service_id, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                question,
                answer,
                service_id,
                created_at,
                updated_at
            "#,
        )
        .bind(input.question)
        .bind(input.answer)
        .bind(input.service_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Faq>> {
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            SELECT
                id,
                question,
                answer,
                service_id,
                created_at,
                updated_at
            FROM
                faqs
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn question_exists(&self, question: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM faqs WHERE question = ?")
            .bind(question)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<Faq>> {
        let faqs = sqlx::query_as::<_, Faq>(
            r#"
            SELECT
                id,
                question,
                answer,
                service_id,
                created_at,
                updated_at
            FROM
                faqs
            ORDER BY
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(faqs)
    }

    pub async fn update_faq(&self, id: i64, input: FaqInput) -> Result<Option<Faq>> {
        let now = Utc::now();
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            UPDATE
                faqs
            SET
                question = ?,
                answer = ?,
                service_id = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                question,
                answer,
                service_id,
                created_at,
                updated_at
            "#,
        )
        .bind(input.question)
        .bind(input.answer)
        .bind(input.service_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn delete_faq(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
