use sqlx::PgPool;

use crate::{error::Result, models::GalleryItem};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<GalleryItem>> {
    let item = sqlx::query_as::<_, GalleryItem>("SELECT * FROM gallery WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(item)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<GalleryItem>> {
    let items = sqlx::query_as::<_, GalleryItem>("SELECT * FROM gallery ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(items)
}

pub async fn create(pool: &PgPool, image_file: &str) -> Result<GalleryItem> {
    let item = sqlx::query_as::<_, GalleryItem>(
        "INSERT INTO gallery (image_file) VALUES ($1) RETURNING *",
    )
    .bind(image_file)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn update_image(
    pool: &PgPool,
    id: i32,
    image_file: &str,
) -> Result<Option<GalleryItem>> {
    let item = sqlx::query_as::<_, GalleryItem>(
        "UPDATE gallery SET image_file = $1 WHERE id = $2 RETURNING *",
    )
    .bind(image_file)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
