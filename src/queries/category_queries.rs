use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CategoryPayload},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Uniqueness pre-check; `exclude_id` skips the row being updated.
pub async fn name_exists(pool: &PgPool, name: &str, exclude_id: Option<i32>) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
            SELECT 1 FROM categories
            WHERE name = $1 AND ($2::int IS NULL OR id != $2)
        )",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn create(pool: &PgPool, payload: &CategoryPayload) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING *",
    )
    .bind(&payload.name)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn update(pool: &PgPool, id: i32, payload: &CategoryPayload) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(&payload.name)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
