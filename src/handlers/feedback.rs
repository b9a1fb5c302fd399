use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::database::models::{FeedbackInput, FeedbackTarget, ProfanityWordsInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{Claims, FeedbackService};

#[derive(Debug, Serialize)]
pub struct ProfanityWordsResponse {
    pub added: usize,
    pub total: usize,
}

pub async fn create_feedback(
    feedback_service: web::Data<FeedbackService>,
    target: web::Query<FeedbackTarget>,
    input: web::Json<FeedbackInput>,
) -> Result<HttpResponse, AppError> {
    let feedback = feedback_service
        .create_feedback(input.into_inner(), target.into_inner())
        .await?;

    Ok(ApiResponse::created("Feedback created successfully", feedback))
}

pub async fn get_feedback(
    _claims: Claims,
    feedback_service: web::Data<FeedbackService>,
) -> Result<HttpResponse, AppError> {
    let feedback = feedback_service.get_feedback(None).await?;
    Ok(ApiResponse::ok("All Feedback", feedback))
}

pub async fn get_feedback_by_id(
    _claims: Claims,
    feedback_service: web::Data<FeedbackService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let entry = feedback_service
        .get_feedback(Some(path.into_inner()))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("No Feedback found"))?;
    Ok(ApiResponse::ok("Feedback Found", entry))
}

pub async fn add_profanity_words(
    _claims: Claims,
    feedback_service: web::Data<FeedbackService>,
    input: web::Json<ProfanityWordsInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    if input.words.iter().all(|w| w.trim().is_empty()) {
        return Err(AppError::bad_request("No words provided"));
    }

    let added = feedback_service.add_profanity_words(input.words).await?;
    let total = feedback_service.filter().len();

    Ok(ApiResponse::ok(
        "Profanity words updated",
        ProfanityWordsResponse { added, total },
    ))
}
