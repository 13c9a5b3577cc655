use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ProductPayload, ProductResponse, ProductWithNames},
    queries::{category_queries, product_queries, subcategory_queries},
    services::{
        asset_lifecycle,
        image_store::{FsImageStore, ImagePayload},
    },
};

pub(super) fn product_response(images: &FsImageStore, row: ProductWithNames) -> ProductResponse {
    let image_url = row
        .product
        .image_file
        .as_deref()
        .map(|file| images.public_url(file));

    ProductResponse {
        product: row.product,
        category_name: row.category_name,
        subcategory_name: row.subcategory_name,
        image_url,
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = product_queries::get_all_with_names(&state.db)
        .await?
        .into_iter()
        .map(|row| product_response(&state.images, row))
        .collect();

    Ok(Json(products))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = product_queries::find_with_names(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product_response(&state.images, product)))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    // Decode before any store or database write so a bad payload changes
    // nothing.
    let image = decode_image(payload.image_base64.as_deref())?;
    validate(&state, &payload).await?;

    let image_file = asset_lifecycle::apply(&state.images, None, image.as_ref()).await?;

    let product = product_queries::create(&state.db, &payload, image_file.as_deref()).await?;
    let response = product_queries::find_with_names(&state.db, product.id)
        .await?
        .ok_or_else(|| AppError::InternalError("Product vanished after insert".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(product_response(&state.images, response)),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<ProductResponse>> {
    let existing = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let image = decode_image(payload.image_base64.as_deref())?;
    validate(&state, &payload).await?;

    let image_file =
        asset_lifecycle::apply(&state.images, existing.image_file.as_deref(), image.as_ref())
            .await?;

    product_queries::update(&state.db, id, &payload, image_file.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let response = product_queries::find_with_names(&state.db, id)
        .await?
        .ok_or_else(|| AppError::InternalError("Product vanished after update".to_string()))?;

    Ok(Json(product_response(&state.images, response)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if !product_queries::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    asset_lifecycle::release_current(&state.images, product.image_file.as_deref()).await?;

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

pub(super) fn decode_image(image_base64: Option<&str>) -> Result<Option<ImagePayload>> {
    image_base64
        .filter(|s| !s.trim().is_empty())
        .map(ImagePayload::from_base64)
        .transpose()
}

async fn validate(state: &AppState, payload: &ProductPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if category_queries::find_by_id(&state.db, payload.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    if let Some(subcategory_id) = payload.subcategory_id {
        let subcategory = subcategory_queries::find_by_id(&state.db, subcategory_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subcategory not found".to_string()))?;

        if subcategory.category_id != payload.category_id {
            return Err(AppError::BadRequest(
                "Subcategory does not belong to the given category".to_string(),
            ));
        }
    }

    Ok(())
}
