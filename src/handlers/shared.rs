use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint, success or failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: &str, data: Option<T>) -> Self {
        Self {
            success: status.is_success(),
            message: message.to_string(),
            data,
            status_code: status.as_u16(),
        }
    }

    // 200 with data
    pub fn ok(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(StatusCode::OK, message, Some(data)))
    }

    // 201 with data
    pub fn created(message: &str, data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::new(StatusCode::CREATED, message, Some(data)))
    }
}

impl ApiResponse<()> {
    // 200 without data
    pub fn message(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(StatusCode::OK, message, None))
    }

    // Error response (no data)
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status, message, None)
    }
}
