use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;

use crate::config::Config;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "LGU services and announcements portal API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "environment": config.environment,
    }))
}
