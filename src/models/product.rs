use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub category_id: i32,
    pub subcategory_id: Option<i32>,
    pub image_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update request. Updates replace all mutable fields; the image is
/// only touched when `image_base64` is supplied.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub category_id: i32,
    pub subcategory_id: Option<i32>,
    pub image_base64: Option<String>,
}

/// Product joined with category/subcategory names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithNames {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: String,
    pub subcategory_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub subcategory_name: Option<String>,
    pub image_url: Option<String>,
}
