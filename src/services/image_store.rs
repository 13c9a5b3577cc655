use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::fs;
use uuid::Uuid;

use crate::{
    config::ImageStoreConfig,
    error::{AppError, Result},
};

/// A decoded image ready for storage. Decoding happens before any store or
/// release call, so a malformed upload rejects the whole request without
/// touching existing assets.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

impl ImagePayload {
    /// Accepts bare base64 or a `data:image/...;base64,` URI. The image
    /// format is sniffed from magic bytes, not trusted from the URI.
    pub fn from_base64(input: &str) -> Result<Self> {
        let encoded = input
            .split_once("base64,")
            .map(|(_, data)| data)
            .unwrap_or(input);

        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|_| AppError::BadRequest("Malformed base64 image payload".to_string()))?;

        let extension = sniff_extension(&bytes).ok_or_else(|| {
            AppError::BadRequest("Unsupported image format".to_string())
        })?;

        Ok(Self { bytes, extension })
    }
}

fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if bytes.starts_with(b"GIF8") {
        Some("gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}

/// Where image bytes actually live. Returned refs are opaque file names;
/// releasing a ref that is already gone succeeds.
#[async_trait]
pub trait BlobSink {
    async fn store(&self, payload: &ImagePayload) -> Result<String>;
    async fn release(&self, reference: &str) -> Result<()>;
}

/// Filesystem-backed image store. Files are uuid-named and served as static
/// assets under `public_base`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
    public_base: String,
}

impl FsImageStore {
    pub async fn open(config: &ImageStoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.root_dir).await.map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to create image directory {}: {}",
                config.root_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            root: config.root_dir.clone(),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_url(&self, reference: &str) -> String {
        format!("{}/{}", self.public_base, reference)
    }

    // Refs are generated here as bare uuid file names; anything path-like
    // coming back from the database is rejected.
    fn path_for(&self, reference: &str) -> Result<PathBuf> {
        if reference.is_empty()
            || reference.contains('/')
            || reference.contains('\\')
            || reference.contains("..")
        {
            return Err(AppError::InternalError(format!(
                "Invalid image reference: {}",
                reference
            )));
        }

        Ok(self.root.join(reference))
    }
}

#[async_trait]
impl BlobSink for FsImageStore {
    async fn store(&self, payload: &ImagePayload) -> Result<String> {
        let reference = format!("{}.{}", Uuid::new_v4(), payload.extension);
        let path = self.path_for(&reference)?;

        fs::write(&path, &payload.bytes).await.map_err(|e| {
            AppError::InternalError(format!("Failed to write image {}: {}", reference, e))
        })?;

        Ok(reference)
    }

    async fn release(&self, reference: &str) -> Result<()> {
        let path = self.path_for(reference)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // already gone: idempotent release
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::InternalError(format!(
                "Failed to delete image {}: {}",
                reference, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_1PX: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
    ];

    fn store_config(dir: &Path) -> ImageStoreConfig {
        ImageStoreConfig {
            root_dir: dir.to_path_buf(),
            public_base: "/images/".to_string(),
        }
    }

    #[test]
    fn decodes_bare_base64_png() {
        let encoded = BASE64.encode(PNG_1PX);
        let payload = ImagePayload::from_base64(&encoded).unwrap();

        assert_eq!(payload.extension, "png");
        assert_eq!(payload.bytes, PNG_1PX);
    }

    #[test]
    fn decodes_data_uri_and_sniffs_jpeg() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let input = format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg));

        let payload = ImagePayload::from_base64(&input).unwrap();
        assert_eq!(payload.extension, "jpg");
    }

    #[test]
    fn mime_in_data_uri_does_not_override_sniffing() {
        // claims png, is actually gif
        let input = format!("data:image/png;base64,{}", BASE64.encode(b"GIF89a...."));

        let payload = ImagePayload::from_base64(&input).unwrap();
        assert_eq!(payload.extension, "gif");
    }

    #[test]
    fn rejects_malformed_base64() {
        let err = ImagePayload::from_base64("not!!valid@@base64").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn rejects_unknown_format() {
        let encoded = BASE64.encode(b"plain text, not an image");
        let err = ImagePayload::from_base64(&encoded).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn store_writes_file_and_release_removes_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::open(&store_config(dir.path())).await.unwrap();

        let payload = ImagePayload {
            bytes: PNG_1PX.to_vec(),
            extension: "png",
        };

        let reference = store.store(&payload).await.unwrap();
        assert!(reference.ends_with(".png"));
        assert!(dir.path().join(&reference).exists());

        store.release(&reference).await.unwrap();
        assert!(!dir.path().join(&reference).exists());
    }

    #[tokio::test]
    async fn release_of_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::open(&store_config(dir.path())).await.unwrap();

        store.release("does-not-exist.png").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_path_like_references() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsImageStore::open(&store_config(dir.path())).await.unwrap();

        assert!(store.release("../etc/passwd").await.is_err());
        assert!(store.release("a/b.png").await.is_err());
    }

    #[test]
    fn public_url_strips_trailing_slash_once() {
        let config = ImageStoreConfig {
            root_dir: "images".into(),
            public_base: "/images/".to_string(),
        };
        let store = FsImageStore {
            root: config.root_dir.clone(),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        };

        assert_eq!(store.public_url("a.png"), "/images/a.png");
    }
}
