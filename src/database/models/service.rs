use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service_category::ServiceCategorySummary;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub file_path: String,
    pub image_path: String,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: String,
    #[serde(default = "default_service_status")]
    pub status: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub image_path: String,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
}

fn default_service_status() -> String {
    "Active".to_string()
}

/// Service with the service categories it belongs to and their requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub categories: Vec<ServiceCategorySummary>,
}
