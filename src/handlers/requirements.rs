use actix_web::{HttpResponse, web};

use crate::database::models::RequirementInput;
use crate::database::repositories::{RequirementRepository, ServiceCategoryRepository};
use crate::error::AppError;
use crate::handlers::service_categories::unique_ids;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

async fn check_categories(
    category_repo: &ServiceCategoryRepository,
    category_ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    let ids = unique_ids(category_ids);
    if ids.is_empty() || category_repo.count_existing(&ids).await? != ids.len() {
        return Err(AppError::not_found("One or more categories not found"));
    }
    Ok(ids)
}

pub async fn create_requirement(
    _claims: Claims,
    requirement_repo: web::Data<RequirementRepository>,
    category_repo: web::Data<ServiceCategoryRepository>,
    input: web::Json<RequirementInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if requirement_repo.name_exists(&input.name).await? {
        return Err(AppError::bad_request("Requirement already exists"));
    }
    let category_ids = check_categories(&category_repo, &input.category_ids).await?;

    let requirement = requirement_repo
        .create_requirement(&input.name, &input.description, &category_ids)
        .await?;
    let detail = requirement_repo.with_categories(requirement).await?;

    Ok(ApiResponse::created("Requirement Created Successfully", detail))
}

pub async fn get_requirements(
    requirement_repo: web::Data<RequirementRepository>,
) -> Result<HttpResponse, AppError> {
    let requirements = requirement_repo.get_all().await?;
    if requirements.is_empty() {
        return Err(AppError::not_found("No requirements found"));
    }

    let mut details = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        details.push(requirement_repo.with_categories(requirement).await?);
    }

    Ok(ApiResponse::ok("Requirements fetched successfully", details))
}

pub async fn get_requirement(
    requirement_repo: web::Data<RequirementRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let requirement = requirement_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Requirement not found"))?;
    let detail = requirement_repo.with_categories(requirement).await?;

    Ok(ApiResponse::ok("Requirements fetched successfully", detail))
}

pub async fn update_requirement(
    _claims: Claims,
    requirement_repo: web::Data<RequirementRepository>,
    category_repo: web::Data<ServiceCategoryRepository>,
    path: web::Path<i64>,
    input: web::Json<RequirementInput>,
) -> Result<HttpResponse, AppError> {
    let requirement_id = path.into_inner();
    let input = input.into_inner();

    let current = requirement_repo
        .find_by_id(requirement_id)
        .await?
        .ok_or_else(|| AppError::not_found("Requirement not found"))?;

    // Blank fields keep their stored value
    let name = match input.name.trim() {
        "" => current.name.clone(),
        name => name.to_string(),
    };
    let description = match input.description.trim() {
        "" => current.description.clone(),
        description => description.to_string(),
    };

    if name != current.name && requirement_repo.name_exists(&name).await? {
        return Err(AppError::bad_request("Requirement already exists"));
    }
    let category_ids = check_categories(&category_repo, &input.category_ids).await?;

    let requirement = requirement_repo
        .update_requirement(requirement_id, &name, &description, &category_ids)
        .await?
        .ok_or_else(|| AppError::not_found("Requirement not found"))?;
    let detail = requirement_repo.with_categories(requirement).await?;

    Ok(ApiResponse::ok("Successfully updated", detail))
}

pub async fn delete_requirement(
    _claims: Claims,
    requirement_repo: web::Data<RequirementRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !requirement_repo
        .delete_requirement(path.into_inner())
        .await?
    {
        return Err(AppError::not_found("Requirement not found"));
    }

    Ok(ApiResponse::<()>::message("Requirement Deleted Successfully"))
}
