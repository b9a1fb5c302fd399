use actix_web::{HttpResponse, web};

use crate::database::models::UploadPayload;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{Claims, UploadStore};

pub async fn upload_image(
    _claims: Claims,
    uploads: web::Data<UploadStore>,
    payload: web::Json<UploadPayload>,
) -> Result<HttpResponse, AppError> {
    let stored = uploads.store_image(&payload).await?;
    Ok(ApiResponse::created("Image uploaded successfully", stored))
}

pub async fn upload_video(
    _claims: Claims,
    uploads: web::Data<UploadStore>,
    payload: web::Json<UploadPayload>,
) -> Result<HttpResponse, AppError> {
    let stored = uploads.store_video(&payload).await?;
    Ok(ApiResponse::created("Video uploaded successfully", stored))
}

/// Serves a stored upload by its path under the upload directory.
pub async fn serve_upload(
    uploads: web::Data<UploadStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (bytes, content_type) = uploads.read(&path).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}
