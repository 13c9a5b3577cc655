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
    models::{SubCategoryPayload, SubCategoryResponse, SubCategoryWithProducts},
    queries::{category_queries, product_queries, subcategory_queries},
};

use super::products::product_response;

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<SubCategoryResponse>>> {
    let subcategories = subcategory_queries::get_all_with_names(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(subcategories))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubCategoryResponse>> {
    let subcategory = subcategory_queries::find_with_name(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

    Ok(Json(subcategory.into()))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<SubCategoryPayload>,
) -> Result<(StatusCode, Json<SubCategoryResponse>)> {
    validate(&state, &payload, None).await?;

    let subcategory = subcategory_queries::create(&state.db, &payload).await?;
    let response = subcategory_queries::find_with_name(&state.db, subcategory.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Subcategory vanished after insert".to_string()))?;

    Ok((StatusCode::CREATED, Json(response.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SubCategoryPayload>,
) -> Result<Json<SubCategoryResponse>> {
    if subcategory_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Subcategory not found".to_string()));
    }

    validate(&state, &payload, Some(id)).await?;

    subcategory_queries::update(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

    let response = subcategory_queries::find_with_name(&state.db, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Subcategory vanished after update".to_string()))?;

    Ok(Json(response.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let deleted = subcategory_queries::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Subcategory not found".to_string()));
    }

    Ok(Json(json!({ "message": "Subcategory deleted successfully" })))
}

pub async fn details(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubCategoryWithProducts>>> {
    let subcategories = subcategory_queries::get_all_with_names(&state.db).await?;
    let products = product_queries::get_all_with_names(&state.db).await?;

    let mut by_subcategory: HashMap<i32, Vec<_>> = HashMap::new();
    for row in products {
        if let Some(subcategory_id) = row.product.subcategory_id {
            by_subcategory
                .entry(subcategory_id)
                .or_default()
                .push(product_response(&state.images, row));
        }
    }

    let response = subcategories
        .into_iter()
        .map(|row| SubCategoryWithProducts {
            products: by_subcategory
                .remove(&row.subcategory.id)
                .unwrap_or_default(),
            category_name: row.category_name,
            subcategory: row.subcategory,
        })
        .collect();

    Ok(Json(response))
}

pub async fn details_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubCategoryWithProducts>> {
    let row = subcategory_queries::find_with_name(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

    let products = product_queries::get_by_subcategory_with_names(&state.db, id)
        .await?
        .into_iter()
        .map(|p| product_response(&state.images, p))
        .collect();

    Ok(Json(SubCategoryWithProducts {
        products,
        category_name: row.category_name,
        subcategory: row.subcategory,
    }))
}

async fn validate(
    state: &AppState,
    payload: &SubCategoryPayload,
    exclude_id: Option<i32>,
) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if category_queries::find_by_id(&state.db, payload.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    if subcategory_queries::name_exists_in_category(
        &state.db,
        &payload.name,
        payload.category_id,
        exclude_id,
    )
    .await?
    {
        return Err(AppError::Conflict(
            "Subcategory already exists in this category".to_string(),
        ));
    }

    Ok(())
}
