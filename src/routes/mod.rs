mod blogs;
mod categories;
mod contact;
mod gallery;
mod health;
mod products;
mod subcategories;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // categories
        .route("/api/category", get(categories::get_all))
        .route(
            "/api/category/{id}",
            get(categories::get_by_id).delete(categories::remove),
        )
        .route("/api/category/insert", post(categories::insert))
        .route("/api/category/update/{id}", put(categories::update))
        .route(
            "/api/category/with-subcategories",
            get(categories::with_subcategories),
        )
        .route(
            "/api/category/with-subcategories/{id}",
            get(categories::with_subcategories_by_id),
        )
        .route("/api/category/details/{id}", get(categories::details))
        // subcategories
        .route("/api/subcategory", get(subcategories::get_all))
        .route(
            "/api/subcategory/{id}",
            get(subcategories::get_by_id).delete(subcategories::remove),
        )
        .route("/api/subcategory/insert", post(subcategories::insert))
        .route("/api/subcategory/update/{id}", put(subcategories::update))
        .route("/api/subcategory/details", get(subcategories::details))
        .route(
            "/api/subcategory/details/{id}",
            get(subcategories::details_by_id),
        )
        // products
        .route("/api/product", get(products::get_all))
        .route(
            "/api/product/{id}",
            get(products::get_by_id).delete(products::remove),
        )
        .route("/api/product/insert", post(products::insert))
        .route("/api/product/update/{id}", put(products::update))
        // blogs
        .route("/api/blog", get(blogs::get_all))
        .route(
            "/api/blog/{id}",
            get(blogs::get_by_id).delete(blogs::remove),
        )
        .route("/api/blog/insert", post(blogs::insert))
        .route("/api/blog/update/{id}", put(blogs::update))
        // gallery
        .route("/api/gallery", get(gallery::get_all))
        .route("/api/gallery/{id}", delete(gallery::remove))
        .route("/api/gallery/insert", post(gallery::insert))
        .route("/api/gallery/update/{id}", put(gallery::update))
        .route("/api/gallery/all-images", get(gallery::all_images))
        // contact
        .route("/api/contact/insert", post(contact::insert))
}
