use crate::config::Config;
use crate::database::models::{AnnouncementInput, AnnouncementResponse};
use crate::database::repositories::{AnnouncementFields, AnnouncementRepository, UserRepository};
use crate::error::AppError;
use crate::services::uploads::UploadStore;

/// Announcement CRUD with image handling.
#[derive(Clone)]
pub struct AnnouncementService {
    repository: AnnouncementRepository,
    user_repository: UserRepository,
    uploads: UploadStore,
    config: Config,
}

impl AnnouncementService {
    pub fn new(
        repository: AnnouncementRepository,
        user_repository: UserRepository,
        uploads: UploadStore,
        config: Config,
    ) -> Self {
        Self {
            repository,
            user_repository,
            uploads,
            config,
        }
    }

    pub async fn create(&self, input: AnnouncementInput) -> Result<AnnouncementResponse, AppError> {
        if self.repository.name_exists(&input.name).await? {
            return Err(AppError::bad_request("Announcement already exists"));
        }
        self.ensure_user(input.user_id).await?;

        let image_path = match &input.image {
            Some(payload) => Some(self.uploads.store_announcement_image(payload).await?.path),
            None => None,
        };

        let fields = AnnouncementFields {
            name: input.name,
            description: input.description,
            image_path: image_path.clone(),
            is_urgent: input.is_urgent,
            platform: input.platform,
            user_id: input.user_id,
        };
        let links = input.links.unwrap_or_default();

        let announcement = match self.repository.create_announcement(fields, &links).await {
            Ok(announcement) => announcement,
            Err(e) => {
                // Don't leave an orphaned image behind
                if let Some(path) = image_path {
                    self.uploads.remove(&path).await;
                }
                return Err(e.into());
            }
        };

        log::info!("Created announcement {} ({})", announcement.id, announcement.name);
        self.respond(announcement.id).await
    }

    pub async fn list(&self) -> Result<Vec<AnnouncementResponse>, AppError> {
        let announcements = self.repository.get_all().await?;
        if announcements.is_empty() {
            return Err(AppError::not_found("Announcements not found"));
        }

        let mut responses = Vec::with_capacity(announcements.len());
        for announcement in announcements {
            let links = self.repository.get_links(announcement.id).await?;
            responses.push(AnnouncementResponse::build(announcement, links, |p| {
                self.config.public_url(p)
            }));
        }
        Ok(responses)
    }

    pub async fn get(&self, id: i64) -> Result<AnnouncementResponse, AppError> {
        self.respond(id).await
    }

    pub async fn update(
        &self,
        id: i64,
        input: AnnouncementInput,
    ) -> Result<AnnouncementResponse, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcements not found"))?;

        if input.name != current.name && self.repository.name_exists(&input.name).await? {
            return Err(AppError::bad_request("Announcement already exists"));
        }
        self.ensure_user(input.user_id).await?;

        let new_image = match &input.image {
            Some(payload) => Some(self.uploads.store_announcement_image(payload).await?.path),
            None => None,
        };

        let fields = AnnouncementFields {
            name: input.name,
            description: input.description,
            image_path: new_image.clone().or_else(|| current.image_path.clone()),
            is_urgent: input.is_urgent,
            platform: input.platform,
            user_id: input.user_id,
        };

        let updated = self
            .repository
            .update_announcement(id, fields, input.links.as_deref())
            .await;
        if !matches!(updated, Ok(Some(_))) {
            if let Some(path) = &new_image {
                self.uploads.remove(path).await;
            }
        }
        updated?.ok_or_else(|| AppError::not_found("Announcements not found"))?;

        if let (Some(_), Some(old)) = (&new_image, &current.image_path) {
            self.uploads.remove(old).await;
        }

        self.respond(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcements not found"))?;

        self.repository.delete_announcement(id).await?;
        if let Some(path) = &current.image_path {
            self.uploads.remove(path).await;
        }
        log::info!("Deleted announcement {}", id);
        Ok(())
    }

    async fn ensure_user(&self, user_id: i64) -> Result<(), AppError> {
        if !self.user_repository.exists(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    async fn respond(&self, id: i64) -> Result<AnnouncementResponse, AppError> {
        let announcement = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcements not found"))?;
        let links = self.repository.get_links(id).await?;

        Ok(AnnouncementResponse::build(announcement, links, |p| {
            self.config.public_url(p)
        }))
    }
}
