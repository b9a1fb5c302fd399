use std::sync::Arc;

use tokio::task::spawn_blocking;

use crate::database::models::{Feedback, FeedbackInput, FeedbackTarget};
use crate::database::repositories::{AnnouncementRepository, FeedbackRepository, ServiceRepository};
use crate::error::AppError;
use crate::services::content_filter::{ProfanityFilter, is_meaningful_text};

pub const MEANINGLESS_COMMENT_MESSAGE: &str = "Comment must be meaningful (at least 3 words, contain letters, and avoid excessive punctuation or profanity)";

/// Validates and stores ratings and comments.
#[derive(Clone)]
pub struct FeedbackService {
    feedback_repository: FeedbackRepository,
    service_repository: ServiceRepository,
    announcement_repository: AnnouncementRepository,
    filter: Arc<ProfanityFilter>,
}

impl FeedbackService {
    pub fn new(
        feedback_repository: FeedbackRepository,
        service_repository: ServiceRepository,
        announcement_repository: AnnouncementRepository,
        filter: Arc<ProfanityFilter>,
    ) -> Self {
        Self {
            feedback_repository,
            service_repository,
            announcement_repository,
            filter,
        }
    }

    pub fn filter(&self) -> &ProfanityFilter {
        &self.filter
    }

    /// Extends the shared word list and writes it back to the word file.
    /// The file write runs on the blocking pool.
    pub async fn add_profanity_words(&self, words: Vec<String>) -> Result<usize, AppError> {
        let filter = Arc::clone(&self.filter);
        let added = spawn_blocking(move || filter.add_and_save_words(&words))
            .await
            .map_err(|e| {
                log::error!("Profanity word update task failed: {}", e);
                AppError::internal_server_error_message("Failed to save profanity words")
            })?
            .map_err(|e| {
                log::error!("Failed to save profanity words: {}", e);
                AppError::internal_server_error_message("Failed to save profanity words")
            })?;
        log::info!("Added {} profanity words ({} total)", added, self.filter.len());
        Ok(added)
    }

    /// Checks a comment, returning the trimmed text to store. Only an empty
    /// comment skips the checks; whitespace alone is not meaningful.
    pub fn screen_comment(&self, comment: &str) -> Result<String, AppError> {
        if comment.is_empty() {
            return Ok(String::new());
        }
        let sanitized = comment.trim();

        if self.filter.contains_profanity(sanitized) {
            log::warn!("Profanity detected in feedback: {}", sanitized);
            return Err(AppError::bad_request(
                "Comment contains inappropriate language",
            ));
        }

        if !is_meaningful_text(sanitized, &self.filter) {
            log::info!("Non-meaningful comment rejected: {}", sanitized);
            return Err(AppError::bad_request(MEANINGLESS_COMMENT_MESSAGE));
        }

        Ok(sanitized.to_string())
    }

    pub async fn create_feedback(
        &self,
        input: FeedbackInput,
        target: FeedbackTarget,
    ) -> Result<Feedback, AppError> {
        let comment = self.screen_comment(&input.comment)?;

        if !(1..=5).contains(&input.rating) {
            return Err(AppError::bad_request("Rating must be between 1 and 5"));
        }

        if target.announcement_id.is_some() && target.service_id.is_some() {
            return Err(AppError::bad_request(
                "Feedback cannot be tied to both an announcement and a service",
            ));
        }

        if let Some(service_id) = target.service_id {
            if self.service_repository.find_by_id(service_id).await?.is_none() {
                return Err(AppError::not_found("Service not found"));
            }
        }

        if let Some(announcement_id) = target.announcement_id {
            if self
                .announcement_repository
                .find_by_id(announcement_id)
                .await?
                .is_none()
            {
                return Err(AppError::not_found("Announcement not found"));
            }
        }

        let feedback = self
            .feedback_repository
            .create_feedback(input.rating, &comment, &target)
            .await
            .map_err(|e| {
                log::error!("Failed to create feedback: {}", e);
                AppError::internal_server_error_message(format!(
                    "Failed to create feedback: {}",
                    e
                ))
            })?;

        Ok(feedback)
    }

    pub async fn get_feedback(&self, id: Option<i64>) -> Result<Vec<Feedback>, AppError> {
        let feedback = match id {
            Some(id) => self
                .feedback_repository
                .find_by_id(id)
                .await?
                .into_iter()
                .collect(),
            None => self.feedback_repository.get_all().await?,
        };

        if feedback.is_empty() {
            return Err(AppError::not_found("No Feedback found"));
        }

        Ok(feedback)
    }
}
