use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    #[serde(flatten)]
    pub blog: Blog,
    pub image_url: Option<String>,
}
