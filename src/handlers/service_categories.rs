use actix_web::{HttpResponse, web};

use crate::database::models::ServiceCategoryInput;
use crate::database::repositories::{ServiceCategoryRepository, ServiceRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

/// Sorts and dedupes ids sent by clients.
pub(crate) fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

async fn check_services(
    service_repo: &ServiceRepository,
    input: &mut ServiceCategoryInput,
) -> Result<(), AppError> {
    input.service_ids = unique_ids(&input.service_ids);
    if service_repo.count_existing(&input.service_ids).await? != input.service_ids.len() {
        return Err(AppError::not_found("One or more services not found"));
    }
    Ok(())
}

pub async fn create_service_category(
    _claims: Claims,
    category_repo: web::Data<ServiceCategoryRepository>,
    service_repo: web::Data<ServiceRepository>,
    input: web::Json<ServiceCategoryInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = input.into_inner();

    if category_repo.name_exists(&input.name).await? {
        return Err(AppError::bad_request("Service category already exists"));
    }
    check_services(&service_repo, &mut input).await?;

    let category = category_repo.create_service_category(input).await?;
    let detail = category_repo.with_details(category).await?;

    Ok(ApiResponse::created("Service Category Created Successfully", detail))
}

pub async fn get_service_categories(
    category_repo: web::Data<ServiceCategoryRepository>,
) -> Result<HttpResponse, AppError> {
    let categories = category_repo.get_all().await?;
    if categories.is_empty() {
        return Err(AppError::not_found("No service categories found"));
    }

    let mut details = Vec::with_capacity(categories.len());
    for category in categories {
        details.push(category_repo.with_details(category).await?);
    }

    Ok(ApiResponse::ok("Service categories fetched successfully", details))
}

pub async fn get_service_category(
    category_repo: web::Data<ServiceCategoryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let category = category_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Service category not found"))?;
    let detail = category_repo.with_details(category).await?;

    Ok(ApiResponse::ok("Service category found", detail))
}

pub async fn update_service_category(
    _claims: Claims,
    category_repo: web::Data<ServiceCategoryRepository>,
    service_repo: web::Data<ServiceRepository>,
    path: web::Path<i64>,
    input: web::Json<ServiceCategoryInput>,
) -> Result<HttpResponse, AppError> {
    let category_id = path.into_inner();
    let mut input = input.into_inner();

    let current = category_repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Service category not found"))?;
    if input.name != current.name && category_repo.name_exists(&input.name).await? {
        return Err(AppError::bad_request("Service category already exists"));
    }
    check_services(&service_repo, &mut input).await?;

    let category = category_repo
        .update_service_category(category_id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Service category not found"))?;
    let detail = category_repo.with_details(category).await?;

    Ok(ApiResponse::ok("Service Category Updated Successfully", detail))
}

pub async fn delete_service_category(
    _claims: Claims,
    category_repo: web::Data<ServiceCategoryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !category_repo
        .delete_service_category(path.into_inner())
        .await?
    {
        return Err(AppError::not_found("Service category not found"));
    }

    Ok(ApiResponse::<()>::message("Service Category Deleted Successfully"))
}
