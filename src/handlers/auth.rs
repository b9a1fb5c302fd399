use actix_web::{HttpResponse, web};

use crate::database::models::{CreateUserInput, LoginInput, RefreshInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{AuthService, Claims};

pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<CreateUserInput>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.register(request.into_inner()).await?;
    Ok(ApiResponse::created("User Created Successfully", user))
}

pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let tokens = auth_service.login(request.into_inner()).await?;
    Ok(ApiResponse::ok("Login Successful", tokens))
}

pub async fn refresh(
    auth_service: web::Data<AuthService>,
    request: web::Json<RefreshInput>,
) -> Result<HttpResponse, AppError> {
    let tokens = auth_service.refresh(&request.refresh_token).await?;
    Ok(ApiResponse::ok("Token refreshed", tokens))
}

pub async fn me(
    claims: Claims,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.get_user(claims.user_id()).await?;
    Ok(ApiResponse::ok("User Found", user))
}

pub async fn get_users(
    _claims: Claims,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let users = auth_service.get_users().await?;
    Ok(ApiResponse::ok("All Users", users))
}

pub async fn get_user(
    _claims: Claims,
    auth_service: web::Data<AuthService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.get_user(path.into_inner()).await?;
    Ok(ApiResponse::ok("User Found", user))
}
