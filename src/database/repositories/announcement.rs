use anyhow::Result;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::models::{Announcement, AnnouncementLink, AnnouncementLinkInput};

const ANNOUNCEMENT_COLUMNS: &str = r#"
    id,
    name,
    description,
    image_path,
    is_urgent,
    platform,
    user_id,
    created_at,
    updated_at
"#;

/// Scalar fields written on create and update.
#[derive(Debug, Clone)]
pub struct AnnouncementFields {
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub is_urgent: bool,
    pub platform: String,
    pub user_id: i64,
}

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: SqlitePool,
}

impl AnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_announcement(
        &self,
        fields: AnnouncementFields,
        links: &[AnnouncementLinkInput],
    ) -> Result<Announcement> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            INSERT INTO
                announcements (
                    name,
                    description,
                    image_path,
                    is_urgent,
                    platform,
                    user_id,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.image_path)
        .bind(fields.is_urgent)
        .bind(fields.platform)
        .bind(fields.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        insert_links(&mut tx, announcement.id, links).await?;
        tx.commit().await?;

        Ok(announcement)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(announcement)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    pub async fn get_links(&self, announcement_id: i64) -> Result<Vec<AnnouncementLink>> {
        let links = sqlx::query_as::<_, AnnouncementLink>(
            r#"
            SELECT
                id,
                announcement_id,
                url,
                title
            FROM
                announcement_links
            WHERE
                announcement_id = ?
            ORDER BY
                id
            "#,
        )
        .bind(announcement_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Updates scalar fields; `links` of `Some` replaces the whole link set.
    pub async fn update_announcement(
        &self,
        id: i64,
        fields: AnnouncementFields,
        links: Option<&[AnnouncementLinkInput]>,
    ) -> Result<Option<Announcement>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            r#"
            UPDATE
                announcements
            SET
                name = ?,
                description = ?,
                image_path = ?,
                is_urgent = ?,
                platform = ?,
                user_id = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                {ANNOUNCEMENT_COLUMNS}
            "#
        ))
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.image_path)
        .bind(fields.is_urgent)
        .bind(fields.platform)
        .bind(fields.user_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(announcement) = announcement else {
            return Ok(None);
        };

        if let Some(links) = links {
            sqlx::query("DELETE FROM announcement_links WHERE announcement_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_links(&mut tx, id, links).await?;
        }
        tx.commit().await?;

        Ok(Some(announcement))
    }

    pub async fn delete_announcement(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_links(
    tx: &mut Transaction<'_, Sqlite>,
    announcement_id: i64,
    links: &[AnnouncementLinkInput],
) -> Result<(), sqlx::Error> {
    for link in links {
        sqlx::query(
            r#"
            INSERT INTO
                announcement_links (announcement_id, url, title)
            VALUES
                (?, ?, ?)
            "#,
        )
        .bind(announcement_id)
        .bind(&link.url)
        .bind(&link.title)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
