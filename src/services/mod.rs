pub mod asset_lifecycle;
pub mod email_service;
pub mod image_store;
