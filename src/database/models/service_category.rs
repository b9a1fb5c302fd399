use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requirement::{Requirement, RequirementSummary};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceCategory {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategoryInput {
    pub name: String,
    #[serde(default)]
    pub service_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategoryDetail {
    pub id: i64,
    pub name: String,
    pub service_ids: Vec<i64>,
    pub requirements: Vec<Requirement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact form embedded in service responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategorySummary {
    pub id: i64,
    pub name: String,
    pub requirements: Vec<RequirementSummary>,
}
