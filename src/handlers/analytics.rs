use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestInfo;
use crate::services::{ActivityTracker, Claims};

#[derive(Debug, Default, Deserialize)]
pub struct VisitInput {
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InteractionInput {
    pub activity_type: Option<String>,
    pub announcement_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub status: &'static str,
}

pub async fn track_visit(
    tracker: web::Data<ActivityTracker>,
    info: RequestInfo,
    input: Option<web::Json<VisitInput>>,
) -> Result<HttpResponse, AppError> {
    let input = input.map(|i| i.into_inner()).unwrap_or_default();
    tracker.track_visit(input.page, &info).await?;

    Ok(ApiResponse::ok("Visit recorded", TrackResponse { status: "success" }))
}

pub async fn track_interaction(
    tracker: web::Data<ActivityTracker>,
    info: RequestInfo,
    input: web::Json<InteractionInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    tracker
        .track_interaction(
            input.activity_type,
            input.announcement_id,
            input.service_id,
            &info,
        )
        .await?;

    Ok(ApiResponse::ok(
        "Interaction recorded",
        TrackResponse { status: "success" },
    ))
}

pub async fn top_announcements(
    _claims: Claims,
    tracker: web::Data<ActivityTracker>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let rows = tracker.top_announcements(query.days, query.limit).await?;
    Ok(ApiResponse::ok("Top announcements", rows))
}

pub async fn top_services(
    _claims: Claims,
    tracker: web::Data<ActivityTracker>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let rows = tracker.top_services(query.days, query.limit).await?;
    Ok(ApiResponse::ok("Top services", rows))
}

pub async fn daily_activity(
    _claims: Claims,
    tracker: web::Data<ActivityTracker>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let rows = tracker.daily_activity(query.days).await?;
    Ok(ApiResponse::ok("Daily activity", rows))
}
