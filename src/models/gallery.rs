use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GalleryItem {
    pub id: i32,
    pub image_file: String,
    pub created_at: DateTime<Utc>,
}

/// Image is required on insert, optional on update (absent keeps the
/// current one).
#[derive(Debug, Deserialize)]
pub struct GalleryPayload {
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub id: i32,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryListResponse {
    pub total_count: usize,
    pub data: Vec<GalleryResponse>,
}
