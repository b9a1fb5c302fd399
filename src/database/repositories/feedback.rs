use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Feedback, FeedbackTarget};

#[derive(Clone)]
pub struct FeedbackRepository {
    pool: SqlitePool,
}

impl FeedbackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_feedback(
        &self,
        rating: i64,
        comment: &str,
        target: &FeedbackTarget,
    ) -> Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO
                feedback (rating, comment, service_id, announcement_id, created_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                rating,
                comment,
                service_id,
                announcement_id,
                created_at
            "#,
        )
        .bind(rating)
        .bind(comment)
        .bind(target.service_id)
        .bind(target.announcement_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(feedback)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT
                id,
                rating,
                comment,
                service_id,
                announcement_id,
                created_at
            FROM
                feedback
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    pub async fn get_all(&self) -> Result<Vec<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT
                id,
                rating,
                comment,
                service_id,
                announcement_id,
                created_at
            FROM
                feedback
            ORDER BY
                id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(feedback)
    }
}
