use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserActivity {
    pub id: i64,
    pub activity_type: String,
    pub page: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub announcement_id: Option<i64>,
    pub service_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateActivityInput {
    pub activity_type: String,
    pub page: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub announcement_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopAnnouncement {
    pub announcement_id: i64,
    pub announcement_name: String,
    pub clicks: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopService {
    pub service_id: i64,
    pub service_name: String,
    pub clicks: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

// Activity types recorded by the tracker
#[allow(non_snake_case)]
pub mod ActivityType {
    pub const VISIT: &str = "visit";
    pub const CLICK: &str = "click";
}
