use actix_web::{HttpResponse, web};

use crate::database::models::FaqInput;
use crate::database::repositories::{FaqRepository, ServiceRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

async fn check_service(service_repo: &ServiceRepository, service_id: i64) -> Result<(), AppError> {
    if service_repo.find_by_id(service_id).await?.is_none() {
        return Err(AppError::not_found("Service not found"));
    }
    Ok(())
}

pub async fn create_faq(
    _claims: Claims,
    faq_repo: web::Data<FaqRepository>,
    service_repo: web::Data<ServiceRepository>,
    input: web::Json<FaqInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if faq_repo.question_exists(&input.question).await? {
        return Err(AppError::bad_request("FAQ already exists"));
    }
    check_service(&service_repo, input.service_id).await?;

    let faq = faq_repo.create_faq(input).await?;
    Ok(ApiResponse::created("FAQ Created Successfully", faq))
}

pub async fn get_faqs(faq_repo: web::Data<FaqRepository>) -> Result<HttpResponse, AppError> {
    let faqs = faq_repo.get_all().await?;
    if faqs.is_empty() {
        return Err(AppError::not_found("No FAQS found"));
    }

    Ok(ApiResponse::ok("All FAQS", faqs))
}

pub async fn get_faq(
    faq_repo: web::Data<FaqRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let faq = faq_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("No FAQS found"))?;

    Ok(ApiResponse::ok("FAQ Found", faq))
}

pub async fn update_faq(
    _claims: Claims,
    faq_repo: web::Data<FaqRepository>,
    service_repo: web::Data<ServiceRepository>,
    path: web::Path<i64>,
    input: web::Json<FaqInput>,
) -> Result<HttpResponse, AppError> {
    let faq_id = path.into_inner();
    let input = input.into_inner();

    let current = faq_repo
        .find_by_id(faq_id)
        .await?
        .ok_or_else(|| AppError::not_found("FAQ not found"))?;
    if input.question != current.question && faq_repo.question_exists(&input.question).await? {
        return Err(AppError::bad_request("FAQ already exists"));
    }
    check_service(&service_repo, input.service_id).await?;

    let faq = faq_repo
        .update_faq(faq_id, input)
        .await?
        .ok_or_else(|| AppError::not_found("FAQ not found"))?;

    Ok(ApiResponse::ok("FAQ Updated Successfully", faq))
}

pub async fn delete_faq(
    _claims: Claims,
    faq_repo: web::Data<FaqRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !faq_repo.delete_faq(path.into_inner()).await? {
        return Err(AppError::not_found("FAQ not found"));
    }

    Ok(ApiResponse::<()>::message("FAQ Deleted Successfully"))
}
