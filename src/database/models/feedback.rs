use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: i64,
    pub rating: i64,
    pub comment: String,
    pub service_id: Option<i64>,
    pub announcement_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackInput {
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// Which record a feedback entry is attached to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackTarget {
    pub announcement_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfanityWordsInput {
    pub words: Vec<String>,
}
