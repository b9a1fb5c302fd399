use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::database::models::{
    ActivityType, CreateActivityInput, DailyCount, TopAnnouncement, TopService, UserActivity,
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: SqlitePool,
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn log_activity(&self, input: CreateActivityInput) -> Result<UserActivity> {
        self.log_activity_at(input, Utc::now()).await
    }

    /// Insert an activity row with an explicit timestamp.
    pub async fn log_activity_at(
        &self,
        input: CreateActivityInput,
        timestamp: DateTime<Utc>,
    ) -> Result<UserActivity> {
        let activity = sqlx::query_as::<_, UserActivity>(
            r#"
            INSERT INTO
                user_activity (
                    activity_type,
                    page,
                    ip_address,
                    user_agent,
                    announcement_id,
                    service_id,
                    timestamp
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                activity_type,
                page,
                ip_address,
                user_agent,
                announcement_id,
                service_id,
                timestamp
            "#,
        )
        .bind(input.activity_type)
        .bind(input.page)
        .bind(input.ip_address)
        .bind(input.user_agent)
        .bind(input.announcement_id)
        .bind(input.service_id)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    pub async fn top_announcements(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<TopAnnouncement>> {
        let rows = sqlx::query_as::<_, TopAnnouncement>(
            r#"
            SELECT
                user_activity.announcement_id AS announcement_id,
                announcements.name AS announcement_name,
                COUNT(*) AS clicks
            FROM
                user_activity
                JOIN announcements ON announcements.id = user_activity.announcement_id
            WHERE
                user_activity.activity_type = ?
                AND user_activity.announcement_id IS NOT NULL
                AND datetime(user_activity.timestamp) >= datetime(?)
            GROUP BY
                user_activity.announcement_id,
                announcements.name
            ORDER BY
                clicks DESC,
                announcement_id
            LIMIT ?
            "#,
        )
        .bind(ActivityType::CLICK)
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn top_services(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<TopService>> {
        let rows = sqlx::query_as::<_, TopService>(
            r#"
            SELECT
                user_activity.service_id AS service_id,
                services.name AS service_name,
                COUNT(*) AS clicks
            FROM
                user_activity
                JOIN services ON services.id = user_activity.service_id
            WHERE
                user_activity.activity_type = ?
                AND user_activity.service_id IS NOT NULL
                AND datetime(user_activity.timestamp) >= datetime(?)
            GROUP BY
                user_activity.service_id,
                services.name
            ORDER BY
                clicks DESC,
                service_id
            LIMIT ?
            "#,
        )
        .bind(ActivityType::CLICK)
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn daily_visits(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT
                date(timestamp) AS date,
                COUNT(*) AS count
            FROM
                user_activity
            WHERE
                activity_type = ?
                AND datetime(timestamp) >= datetime(?)
            GROUP BY
                date(timestamp)
            ORDER BY
                date(timestamp)
            "#,
        )
        .bind(ActivityType::VISIT)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
