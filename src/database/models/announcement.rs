use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::upload::UploadPayload;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub is_urgent: bool,
    pub platform: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnnouncementLink {
    pub id: i64,
    pub announcement_id: i64,
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementLinkInput {
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementInput {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_urgent: bool,
    pub platform: String,
    pub user_id: i64,
    /// `None` leaves links untouched on update; `Some(vec![])` clears them.
    pub links: Option<Vec<AnnouncementLinkInput>>,
    pub image: Option<UploadPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub is_urgent: bool,
    pub platform: String,
    pub user_id: i64,
    pub links: Option<Vec<AnnouncementLinkResponse>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementLinkResponse {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
}

impl From<AnnouncementLink> for AnnouncementLinkResponse {
    fn from(link: AnnouncementLink) -> Self {
        Self {
            id: link.id,
            url: link.url,
            title: link.title,
        }
    }
}

impl AnnouncementResponse {
    /// `image_url` is derived from `image_path` with the given URL builder.
    pub fn build(
        announcement: Announcement,
        links: Vec<AnnouncementLink>,
        public_url: impl Fn(&str) -> String,
    ) -> Self {
        let links = if links.is_empty() {
            None
        } else {
            Some(links.into_iter().map(AnnouncementLinkResponse::from).collect())
        };

        Self {
            image_url: announcement.image_path.as_deref().map(&public_url),
            id: announcement.id,
            name: announcement.name,
            description: announcement.description,
            image_path: announcement.image_path,
            is_urgent: announcement.is_urgent,
            platform: announcement.platform,
            user_id: announcement.user_id,
            links,
            created_at: announcement.created_at,
            updated_at: announcement.updated_at,
        }
    }
}
