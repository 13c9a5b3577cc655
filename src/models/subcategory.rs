use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ProductResponse;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubCategory {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SubCategoryPayload {
    pub name: String,
    pub category_id: i32,
}

/// Subcategory joined with its parent category name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubCategoryWithName {
    #[sqlx(flatten)]
    pub subcategory: SubCategory,
    pub category_name: String,
}

#[derive(Debug, Serialize)]
pub struct SubCategoryResponse {
    #[serde(flatten)]
    pub subcategory: SubCategory,
    pub category_name: String,
}

impl From<SubCategoryWithName> for SubCategoryResponse {
    fn from(row: SubCategoryWithName) -> Self {
        Self {
            subcategory: row.subcategory,
            category_name: row.category_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubCategoryWithProducts {
    #[serde(flatten)]
    pub subcategory: SubCategory,
    pub category_name: String,
    pub products: Vec<ProductResponse>,
}
