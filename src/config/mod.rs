mod app_config;
mod ses_config;

pub use app_config::{
    AppConfig, CorsConfig, DatabaseConfig, EmailConfig, ImageStoreConfig, ServerConfig,
};
pub use ses_config::*;
