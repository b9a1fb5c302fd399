use actix_web::{HttpResponse, web};

use crate::database::models::ServiceInput;
use crate::database::repositories::{CategoryRepository, ServiceRepository, UserRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

async fn check_references(
    input: &ServiceInput,
    user_repo: &UserRepository,
    category_repo: &CategoryRepository,
) -> Result<(), AppError> {
    if let Some(user_id) = input.user_id {
        if !user_repo.exists(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
    }
    if let Some(category_id) = input.category_id {
        if category_repo.find_by_id(category_id).await?.is_none() {
            return Err(AppError::not_found("Category not found"));
        }
    }
    Ok(())
}

pub async fn create_service(
    _claims: Claims,
    service_repo: web::Data<ServiceRepository>,
    user_repo: web::Data<UserRepository>,
    category_repo: web::Data<CategoryRepository>,
    input: web::Json<ServiceInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if service_repo.find_by_name(&input.name).await?.is_some() {
        return Err(AppError::bad_request("Service already exists"));
    }
    check_references(&input, &user_repo, &category_repo).await?;

    let service = service_repo.create_service(input).await?;
    log::info!("Created service {} ({})", service.id, service.name);

    Ok(ApiResponse::created("Service Created Successfully", service))
}

pub async fn get_services(service_repo: web::Data<ServiceRepository>) -> Result<HttpResponse, AppError> {
    let services = service_repo.get_all_services().await?;

    let mut details = Vec::with_capacity(services.len());
    for service in services {
        details.push(service_repo.with_categories(service).await?);
    }

    Ok(ApiResponse::ok("All Services", details))
}

pub async fn get_service(
    service_repo: web::Data<ServiceRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = service_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;
    let detail = service_repo.with_categories(service).await?;

    Ok(ApiResponse::ok("Service Found", detail))
}

pub async fn update_service(
    _claims: Claims,
    service_repo: web::Data<ServiceRepository>,
    user_repo: web::Data<UserRepository>,
    category_repo: web::Data<CategoryRepository>,
    path: web::Path<i64>,
    input: web::Json<ServiceInput>,
) -> Result<HttpResponse, AppError> {
    let service_id = path.into_inner();
    let input = input.into_inner();

    let current = service_repo
        .find_by_id(service_id)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;

    if input.name != current.name
        && service_repo.find_by_name(&input.name).await?.is_some()
    {
        return Err(AppError::bad_request("Service already exists"));
    }
    check_references(&input, &user_repo, &category_repo).await?;

    let service = service_repo
        .update_service(service_id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;

    Ok(ApiResponse::ok("Service Updated Successfully", service))
}

pub async fn delete_service(
    _claims: Claims,
    service_repo: web::Data<ServiceRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service_id = path.into_inner();

    if !service_repo.delete_service(service_id).await? {
        return Err(AppError::not_found("Service not found"));
    }
    log::info!("Deleted service {}", service_id);

    Ok(ApiResponse::<()>::message("Service Deleted Successfully"))
}
