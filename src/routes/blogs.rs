use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Blog, BlogPayload, BlogResponse},
    queries::blog_queries,
    services::{asset_lifecycle, image_store::FsImageStore},
};

use super::products::decode_image;

fn blog_response(images: &FsImageStore, blog: Blog) -> BlogResponse {
    let image_url = blog.image_file.as_deref().map(|file| images.public_url(file));

    BlogResponse { blog, image_url }
}

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>> {
    let blogs = blog_queries::get_all(&state.db)
        .await?
        .into_iter()
        .map(|blog| blog_response(&state.images, blog))
        .collect();

    Ok(Json(blogs))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>> {
    let blog = blog_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    Ok(Json(blog_response(&state.images, blog)))
}

pub async fn insert(
    State(state): State<AppState>,
    Json(payload): Json<BlogPayload>,
) -> Result<(StatusCode, Json<BlogResponse>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let image = decode_image(payload.image_base64.as_deref())?;
    let image_file = asset_lifecycle::apply(&state.images, None, image.as_ref()).await?;

    let blog = blog_queries::create(&state.db, &payload, image_file.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(blog_response(&state.images, blog)),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogResponse>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let existing = blog_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    let image = decode_image(payload.image_base64.as_deref())?;
    let image_file =
        asset_lifecycle::apply(&state.images, existing.image_file.as_deref(), image.as_ref())
            .await?;

    let blog = blog_queries::update(&state.db, id, &payload, image_file.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    Ok(Json(blog_response(&state.images, blog)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let blog = blog_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    if !blog_queries::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Blog not found".to_string()));
    }

    asset_lifecycle::release_current(&state.images, blog.image_file.as_deref()).await?;

    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}
