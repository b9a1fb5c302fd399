use actix_web::{HttpResponse, web};

use crate::database::models::CategoryInput;
use crate::database::repositories::CategoryRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

pub async fn create_category(
    _claims: Claims,
    category_repo: web::Data<CategoryRepository>,
    input: web::Json<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();

    if category_repo.name_exists(&input.name).await? {
        return Err(AppError::bad_request("Category already exists"));
    }

    let category = category_repo.create_category(input).await?;
    Ok(ApiResponse::created("Category Created Successfully", category))
}

pub async fn get_categories(
    category_repo: web::Data<CategoryRepository>,
) -> Result<HttpResponse, AppError> {
    let categories = category_repo.get_all_categories().await?;
    if categories.is_empty() {
        return Err(AppError::not_found("No categories found"));
    }

    Ok(ApiResponse::ok("Categories fetched successfully", categories))
}

pub async fn get_category(
    category_repo: web::Data<CategoryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let category = category_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("No categories found"))?;

    Ok(ApiResponse::ok("Categories fetched successfully", category))
}

pub async fn update_category(
    _claims: Claims,
    category_repo: web::Data<CategoryRepository>,
    path: web::Path<i64>,
    input: web::Json<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let category_id = path.into_inner();
    let input = input.into_inner();

    let current = category_repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))?;
    if input.name != current.name && category_repo.name_exists(&input.name).await? {
        return Err(AppError::bad_request("Category already exists"));
    }

    let category = category_repo
        .update_category(category_id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Category not found"))?;

    Ok(ApiResponse::ok("Category Updated Successfully", category))
}

pub async fn delete_category(
    _claims: Claims,
    category_repo: web::Data<CategoryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if !category_repo.delete_category(path.into_inner()).await? {
        return Err(AppError::not_found("Category not found"));
    }

    Ok(ApiResponse::<()>::message("Category Deleted Successfully"))
}
