use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Product, ProductPayload, ProductWithNames},
};

const WITH_NAMES: &str = "SELECT p.*, c.name AS category_name, sc.name AS subcategory_name
     FROM products p
     INNER JOIN categories c ON c.id = p.category_id
     LEFT JOIN subcategories sc ON sc.id = p.subcategory_id";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_with_names(pool: &PgPool, id: i32) -> Result<Option<ProductWithNames>> {
    let product =
        sqlx::query_as::<_, ProductWithNames>(&format!("{} WHERE p.id = $1", WITH_NAMES))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(product)
}

pub async fn get_all_with_names(pool: &PgPool) -> Result<Vec<ProductWithNames>> {
    let products = sqlx::query_as::<_, ProductWithNames>(&format!(
        "{} ORDER BY p.created_at DESC",
        WITH_NAMES
    ))
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn get_by_category_with_names(
    pool: &PgPool,
    category_id: i32,
) -> Result<Vec<ProductWithNames>> {
    let products = sqlx::query_as::<_, ProductWithNames>(&format!(
        "{} WHERE p.category_id = $1 ORDER BY p.created_at DESC",
        WITH_NAMES
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn get_by_subcategory_with_names(
    pool: &PgPool,
    subcategory_id: i32,
) -> Result<Vec<ProductWithNames>> {
    let products = sqlx::query_as::<_, ProductWithNames>(&format!(
        "{} WHERE p.subcategory_id = $1 ORDER BY p.created_at DESC",
        WITH_NAMES
    ))
    .bind(subcategory_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// (id, image_file) pairs for products that own an image.
pub async fn get_image_refs(pool: &PgPool) -> Result<Vec<(i32, String)>> {
    let refs = sqlx::query_as::<_, (i32, String)>(
        "SELECT id, image_file FROM products WHERE image_file IS NOT NULL",
    )
    .fetch_all(pool)
    .await?;

    Ok(refs)
}

pub async fn create(
    pool: &PgPool,
    payload: &ProductPayload,
    image_file: Option<&str>,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, brand, size, category_id, subcategory_id, image_file)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.brand)
    .bind(&payload.size)
    .bind(payload.category_id)
    .bind(payload.subcategory_id)
    .bind(image_file)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Full replace of mutable fields; `image_file` carries the ref resolved by
/// the asset lifecycle (unchanged when no new image was uploaded).
pub async fn update(
    pool: &PgPool,
    id: i32,
    payload: &ProductPayload,
    image_file: Option<&str>,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products
         SET name = $1, description = $2, brand = $3, size = $4,
             category_id = $5, subcategory_id = $6, image_file = $7, updated_at = NOW()
         WHERE id = $8
         RETURNING *",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.brand)
    .bind(&payload.size)
    .bind(payload.category_id)
    .bind(payload.subcategory_id)
    .bind(image_file)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
