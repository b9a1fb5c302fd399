use actix_web::{HttpResponse, web};

use crate::database::models::BusinessInfoInput;
use crate::database::repositories::BusinessInfoRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

pub async fn create_business_info(
    _claims: Claims,
    info_repo: web::Data<BusinessInfoRepository>,
    input: web::Json<BusinessInfoInput>,
) -> Result<HttpResponse, AppError> {
    let info = info_repo.create_info(input.into_inner()).await?;
    Ok(ApiResponse::created("Info Created Successfully", info))
}

pub async fn get_business_infos(
    info_repo: web::Data<BusinessInfoRepository>,
) -> Result<HttpResponse, AppError> {
    let infos = info_repo.get_all().await?;
    if infos.is_empty() {
        return Err(AppError::not_found("BusinessInfo not found"));
    }

    Ok(ApiResponse::ok("All BusinessInfo", infos))
}

pub async fn get_business_info(
    info_repo: web::Data<BusinessInfoRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let info = info_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("BusinessInfo not found"))?;

    Ok(ApiResponse::ok("BusinessInfo Found", info))
}

pub async fn update_business_info(
    _claims: Claims,
    info_repo: web::Data<BusinessInfoRepository>,
    path: web::Path<i64>,
    input: web::Json<BusinessInfoInput>,
) -> Result<HttpResponse, AppError> {
    let info = info_repo
        .update_info(path.into_inner(), input.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("BusinessInfo not found"))?;

    Ok(ApiResponse::ok("BusinessInfo Updated Successfully", info))
}

pub async fn delete_business_info(
    _claims: Claims,
    info_repo: web::Data<BusinessInfoRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !info_repo.delete_info(path.into_inner()).await? {
        return Err(AppError::not_found("BusinessInfo not found"));
    }

    Ok(ApiResponse::<()>::message("BusinessInfo Deleted Successfully"))
}
