use chrono::{DateTime, Duration, Utc};

use crate::database::models::{
    ActivityType, CreateActivityInput, DailyCount, TopAnnouncement, TopService, UserActivity,
};
use crate::database::repositories::ActivityRepository;
use crate::error::AppError;
use crate::middleware::RequestInfo;

pub const DEFAULT_REPORT_DAYS: i64 = 30;
pub const DEFAULT_REPORT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct ActivityTracker {
    repository: ActivityRepository,
}

impl ActivityTracker {
    pub fn new(repository: ActivityRepository) -> Self {
        Self { repository }
    }

    /// Record a page view.
    pub async fn track_visit(
        &self,
        page: Option<String>,
        info: &RequestInfo,
    ) -> Result<UserActivity, AppError> {
        let input = CreateActivityInput {
            activity_type: ActivityType::VISIT.to_string(),
            page,
            ip_address: info.ip_address.clone(),
            user_agent: info.user_agent.clone(),
            ..Default::default()
        };

        Ok(self.repository.log_activity(input).await?)
    }

    /// Record a click on an announcement or service.
    pub async fn track_interaction(
        &self,
        activity_type: Option<String>,
        announcement_id: Option<i64>,
        service_id: Option<i64>,
        info: &RequestInfo,
    ) -> Result<UserActivity, AppError> {
        let activity_type = activity_type
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| ActivityType::CLICK.to_string());

        let input = CreateActivityInput {
            activity_type,
            page: None,
            ip_address: info.ip_address.clone(),
            user_agent: info.user_agent.clone(),
            announcement_id,
            service_id,
        };

        Ok(self.repository.log_activity(input).await?)
    }

    pub async fn top_announcements(
        &self,
        days: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TopAnnouncement>, AppError> {
        let (since, limit) = report_window(days, limit)?;
        Ok(self.repository.top_announcements(since, limit).await?)
    }

    pub async fn top_services(
        &self,
        days: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<TopService>, AppError> {
        let (since, limit) = report_window(days, limit)?;
        Ok(self.repository.top_services(since, limit).await?)
    }

    pub async fn daily_activity(&self, days: Option<i64>) -> Result<Vec<DailyCount>, AppError> {
        let (since, _) = report_window(days, None)?;
        Ok(self.repository.daily_visits(since).await?)
    }
}

/// Start of the reporting window and the row limit.
fn report_window(
    days: Option<i64>,
    limit: Option<i64>,
) -> Result<(DateTime<Utc>, i64), AppError> {
    let days = days.unwrap_or(DEFAULT_REPORT_DAYS);
    let limit = limit.unwrap_or(DEFAULT_REPORT_LIMIT);
    if days < 1 {
        return Err(AppError::bad_request("days must be at least 1"));
    }
    if limit < 1 {
        return Err(AppError::bad_request("limit must be at least 1"));
    }
    let since = Duration::try_days(days)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .ok_or_else(|| AppError::bad_request("days is out of range"))?;
    Ok((since, limit))
}
