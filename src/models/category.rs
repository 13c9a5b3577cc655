use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{SubCategoryResponse, SubCategoryWithProducts};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and update share one shape: updates fully replace the name.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryWithSubCategories {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<SubCategoryResponse>,
}

/// Full tree for one category: subcategories with their products.
#[derive(Debug, Serialize)]
pub struct CategoryDetails {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<SubCategoryWithProducts>,
}
