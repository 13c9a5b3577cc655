use sqlx::PgPool;

use crate::{
    error::Result,
    models::{SubCategory, SubCategoryPayload, SubCategoryWithName},
};

const WITH_NAME: &str = "SELECT sc.*, c.name AS category_name
     FROM subcategories sc
     INNER JOIN categories c ON c.id = sc.category_id";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<SubCategory>> {
    let subcategory =
        sqlx::query_as::<_, SubCategory>("SELECT * FROM subcategories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(subcategory)
}

pub async fn find_with_name(pool: &PgPool, id: i32) -> Result<Option<SubCategoryWithName>> {
    let subcategory =
        sqlx::query_as::<_, SubCategoryWithName>(&format!("{} WHERE sc.id = $1", WITH_NAME))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(subcategory)
}

pub async fn get_all_with_names(pool: &PgPool) -> Result<Vec<SubCategoryWithName>> {
    let subcategories = sqlx::query_as::<_, SubCategoryWithName>(&format!(
        "{} ORDER BY c.name ASC, sc.name ASC",
        WITH_NAME
    ))
    .fetch_all(pool)
    .await?;

    Ok(subcategories)
}

pub async fn get_by_category_with_names(
    pool: &PgPool,
    category_id: i32,
) -> Result<Vec<SubCategoryWithName>> {
    let subcategories = sqlx::query_as::<_, SubCategoryWithName>(&format!(
        "{} WHERE sc.category_id = $1 ORDER BY sc.name ASC",
        WITH_NAME
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(subcategories)
}

/// Uniqueness is scoped to the parent category.
pub async fn name_exists_in_category(
    pool: &PgPool,
    name: &str,
    category_id: i32,
    exclude_id: Option<i32>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
            SELECT 1 FROM subcategories
            WHERE name = $1 AND category_id = $2 AND ($3::int IS NULL OR id != $3)
        )",
    )
    .bind(name)
    .bind(category_id)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn create(pool: &PgPool, payload: &SubCategoryPayload) -> Result<SubCategory> {
    let subcategory = sqlx::query_as::<_, SubCategory>(
        "INSERT INTO subcategories (name, category_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(&payload.name)
    .bind(payload.category_id)
    .fetch_one(pool)
    .await?;

    Ok(subcategory)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &SubCategoryPayload,
) -> Result<Option<SubCategory>> {
    let subcategory = sqlx::query_as::<_, SubCategory>(
        "UPDATE subcategories SET name = $1, category_id = $2, updated_at = NOW()
         WHERE id = $3 RETURNING *",
    )
    .bind(&payload.name)
    .bind(payload.category_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subcategory)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
