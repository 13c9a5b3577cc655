use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{GalleryListResponse, GalleryPayload, GalleryResponse},
    queries::{gallery_queries, product_queries},
    services::{asset_lifecycle, image_store::ImagePayload},
};

pub async fn get_all(State(state): State<AppState>) -> Result<Json<GalleryListResponse>> {
    let data: Vec<GalleryResponse> = gallery_queries::get_all(&state.db)
        .await?
        .into_iter()
        .map(|item| GalleryResponse {
            id: item.id,
            image_url: state.images.public_url(&item.image_file),
        })
        .collect();

    Ok(Json(GalleryListResponse {
        total_count: data.len(),
        data,
    }))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<GalleryPayload>,
) -> Result<(StatusCode, Json<GalleryResponse>)> {
    let image_base64 = payload
        .image_base64
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("image_base64 is required".to_string()))?;

    let image = ImagePayload::from_base64(image_base64)?;

    let image_file = asset_lifecycle::apply(&state.images, None, Some(&image))
        .await?
        .ok_or_else(|| AppError::InternalError("Image store returned no reference".to_string()))?;

    let item = gallery_queries::create(&state.db, &image_file).await?;

    Ok((
        StatusCode::CREATED,
        Json(GalleryResponse {
            id: item.id,
            image_url: state.images.public_url(&item.image_file),
        }),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GalleryPayload>,
) -> Result<Json<GalleryResponse>> {
    let existing = gallery_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    let image = payload
        .image_base64
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(ImagePayload::from_base64)
        .transpose()?;

    let image_file =
        asset_lifecycle::apply(&state.images, Some(&existing.image_file), image.as_ref())
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Image store returned no reference".to_string())
            })?;

    let item = gallery_queries::update_image(&state.db, id, &image_file)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    Ok(Json(GalleryResponse {
        id: item.id,
        image_url: state.images.public_url(&item.image_file),
    }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let item = gallery_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gallery item not found".to_string()))?;

    if !gallery_queries::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Gallery item not found".to_string()));
    }

    asset_lifecycle::release_current(&state.images, Some(&item.image_file)).await?;

    Ok(Json(json!({ "message": "Gallery item deleted successfully" })))
}

/// Every image on the site: product images merged with gallery images.
pub async fn all_images(State(state): State<AppState>) -> Result<Json<GalleryListResponse>> {
    let product_images = product_queries::get_image_refs(&state.db).await?;
    let gallery_items = gallery_queries::get_all(&state.db).await?;

    let data: Vec<GalleryResponse> = product_images
        .into_iter()
        .map(|(id, file)| GalleryResponse {
            id,
            image_url: state.images.public_url(&file),
        })
        .chain(gallery_items.into_iter().map(|item| GalleryResponse {
            id: item.id,
            image_url: state.images.public_url(&item.image_file),
        }))
        .collect();

    Ok(Json(GalleryListResponse {
        total_count: data.len(),
        data,
    }))
}
