use aws_sdk_sesv2::Client as SesClient;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    config::{AppConfig, EmailConfig},
    database,
    error::Result,
    routes,
    services::image_store::FsImageStore,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub images: FsImageStore,
    pub ses_client: SesClient,
    pub email: EmailConfig,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let images = FsImageStore::open(&config.images).await?;
    let ses_client = crate::config::load_ses_client().await?;

    let state = AppState {
        db: pool,
        images: images.clone(),
        ses_client,
        email: config.email.clone(),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .nest_service("/images", ServeDir::new(images.root()))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}
