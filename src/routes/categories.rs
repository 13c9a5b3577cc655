use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Category, CategoryDetails, CategoryPayload, CategoryWithSubCategories,
        SubCategoryResponse, SubCategoryWithProducts,
    },
    queries::{category_queries, product_queries, subcategory_queries},
};

use super::products::product_response;

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(categories))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>> {
    let category = category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    validate_name(&payload.name)?;

    if category_queries::name_exists(&state.db, &payload.name, None).await? {
        return Err(AppError::Conflict("Category name already exists".to_string()));
    }

    let category = category_queries::create(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    validate_name(&payload.name)?;

    if category_queries::name_exists(&state.db, &payload.name, Some(id)).await? {
        return Err(AppError::Conflict(
            "Another category with this name already exists".to_string(),
        ));
    }

    let category = category_queries::update(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = category_queries::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}

pub async fn with_subcategories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithSubCategories>>> {
    let categories = category_queries::get_all(&state.db).await?;
    let subcategories = subcategory_queries::get_all_with_names(&state.db).await?;

    let mut by_category: HashMap<i32, Vec<SubCategoryResponse>> = HashMap::new();
    for row in subcategories {
        by_category
            .entry(row.subcategory.category_id)
            .or_default()
            .push(row.into());
    }

    let response = categories
        .into_iter()
        .map(|category| CategoryWithSubCategories {
            subcategories: by_category.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect();

    Ok(Json(response))
}

pub async fn with_subcategories_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryWithSubCategories>> {
    let category = category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let subcategories = subcategory_queries::get_by_category_with_names(&state.db, id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(CategoryWithSubCategories {
        category,
        subcategories,
    }))
}

/// Category with its subcategories and their products. Products without a
/// subcategory are not part of the tree.
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryDetails>> {
    let category = category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let subcategories = subcategory_queries::get_by_category_with_names(&state.db, id).await?;
    let products = product_queries::get_by_category_with_names(&state.db, id).await?;

    let mut by_subcategory: HashMap<i32, Vec<_>> = HashMap::new();
    for row in products {
        if let Some(subcategory_id) = row.product.subcategory_id {
            by_subcategory
                .entry(subcategory_id)
                .or_default()
                .push(product_response(&state.images, row));
        }
    }

    let subcategories = subcategories
        .into_iter()
        .map(|row| SubCategoryWithProducts {
            products: by_subcategory
                .remove(&row.subcategory.id)
                .unwrap_or_default(),
            category_name: row.category_name,
            subcategory: row.subcategory,
        })
        .collect();

    Ok(Json(CategoryDetails {
        category,
        subcategories,
    }))
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    Ok(())
}
