use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Blog, BlogPayload},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Blog>> {
    let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(blog)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<Blog>> {
    let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(blogs)
}

pub async fn create(
    pool: &PgPool,
    payload: &BlogPayload,
    image_file: Option<&str>,
) -> Result<Blog> {
    let blog = sqlx::query_as::<_, Blog>(
        "INSERT INTO blogs (title, description, content, image_file)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.content)
    .bind(image_file)
    .fetch_one(pool)
    .await?;

    Ok(blog)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &BlogPayload,
    image_file: Option<&str>,
) -> Result<Option<Blog>> {
    let blog = sqlx::query_as::<_, Blog>(
        "UPDATE blogs
         SET title = $1, description = $2, content = $3, image_file = $4, updated_at = NOW()
         WHERE id = $5
         RETURNING *",
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.content)
    .bind(image_file)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(blog)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
