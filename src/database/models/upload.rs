use serde::{Deserialize, Serialize};

/// A file sent inline as base64 in a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPayload {
    pub filename: String,
    pub content_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path relative to the server root, e.g. `uploads/editor/<uuid>.png`.
    pub path: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub url: String,
}
