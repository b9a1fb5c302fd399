use actix_web::{HttpResponse, web};

use crate::database::models::AnnouncementInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{AnnouncementService, Claims};

pub async fn create_announcement(
    _claims: Claims,
    announcements: web::Data<AnnouncementService>,
    input: web::Json<AnnouncementInput>,
) -> Result<HttpResponse, AppError> {
    let announcement = announcements.create(input.into_inner()).await?;
    Ok(ApiResponse::created("Announcement Created Successfully", announcement))
}

pub async fn get_announcements(
    announcements: web::Data<AnnouncementService>,
) -> Result<HttpResponse, AppError> {
    let all = announcements.list().await?;
    Ok(ApiResponse::ok("All Announcements", all))
}

pub async fn get_announcement(
    announcements: web::Data<AnnouncementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let announcement = announcements.get(path.into_inner()).await?;
    Ok(ApiResponse::ok("Announcements Found", announcement))
}

pub async fn update_announcement(
    _claims: Claims,
    announcements: web::Data<AnnouncementService>,
    path: web::Path<i64>,
    input: web::Json<AnnouncementInput>,
) -> Result<HttpResponse, AppError> {
    let announcement = announcements
        .update(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::ok("Announcement Updated Successfully", announcement))
}

pub async fn delete_announcement(
    _claims: Claims,
    announcements: web::Data<AnnouncementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    announcements.delete(path.into_inner()).await?;
    Ok(ApiResponse::<()>::message("Announcement Deleted Successfully"))
}
