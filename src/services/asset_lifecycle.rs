//! Image-asset bookkeeping shared by products, blogs, and the gallery.
//!
//! Each owning row holds at most one asset ref. Storing a replacement must
//! not leak the previous asset, and deleting the owner must not leak its
//! asset. Store failures abort before anything is released, so the previous
//! asset stays live. Concurrent updates to the same row are last-writer-wins;
//! the loser's upload may orphan.

use crate::error::Result;

use super::image_store::{BlobSink, ImagePayload};

/// Resolve the ref an entity should hold after a create or update.
///
/// No payload: the previous ref is kept and nothing is released. With a
/// payload: the new image is stored first, then the previous ref (if any,
/// and different) is released.
pub async fn apply<S: BlobSink + ?Sized>(
    sink: &S,
    previous: Option<&str>,
    payload: Option<&ImagePayload>,
) -> Result<Option<String>> {
    let Some(payload) = payload else {
        return Ok(previous.map(str::to_owned));
    };

    let new_ref = sink.store(payload).await?;

    if let Some(prev) = previous {
        if prev != new_ref {
            sink.release(prev).await?;
        }
    }

    Ok(Some(new_ref))
}

/// Release an entity's asset when the entity itself is being deleted.
pub async fn release_current<S: BlobSink + ?Sized>(
    sink: &S,
    current: Option<&str>,
) -> Result<()> {
    if let Some(reference) = current {
        sink.release(reference).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;

    #[derive(Default)]
    struct MemorySink {
        files: Mutex<HashMap<String, Vec<u8>>>,
        next: AtomicU32,
    }

    impl MemorySink {
        fn contains(&self, reference: &str) -> bool {
            self.files.lock().unwrap().contains_key(reference)
        }

        fn insert(&self, reference: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(reference.to_string(), Vec::new());
        }
    }

    #[async_trait]
    impl BlobSink for MemorySink {
        async fn store(&self, payload: &ImagePayload) -> Result<String> {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            let reference = format!("img-{}.{}", n, payload.extension);
            self.files
                .lock()
                .unwrap()
                .insert(reference.clone(), payload.bytes.clone());
            Ok(reference)
        }

        async fn release(&self, reference: &str) -> Result<()> {
            self.files.lock().unwrap().remove(reference);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl BlobSink for FailingSink {
        async fn store(&self, _payload: &ImagePayload) -> Result<String> {
            Err(AppError::InternalError("sink unavailable".to_string()))
        }

        async fn release(&self, _reference: &str) -> Result<()> {
            Err(AppError::InternalError("sink unavailable".to_string()))
        }
    }

    fn payload() -> ImagePayload {
        ImagePayload {
            bytes: vec![1, 2, 3],
            extension: "png",
        }
    }

    #[tokio::test]
    async fn replacement_stores_new_and_releases_old() {
        let sink = MemorySink::default();
        sink.insert("old.png");

        let new_ref = apply(&sink, Some("old.png"), Some(&payload()))
            .await
            .unwrap()
            .unwrap();

        assert_ne!(new_ref, "old.png");
        assert!(sink.contains(&new_ref));
        assert!(!sink.contains("old.png"));
    }

    #[tokio::test]
    async fn no_payload_keeps_previous_ref() {
        let sink = MemorySink::default();
        sink.insert("old.png");

        let result = apply(&sink, Some("old.png"), None).await.unwrap();

        assert_eq!(result.as_deref(), Some("old.png"));
        assert!(sink.contains("old.png"));
    }

    #[tokio::test]
    async fn no_payload_and_no_previous_is_none() {
        let sink = MemorySink::default();

        let result = apply(&sink, None, None).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn first_upload_stores_without_releasing() {
        let sink = MemorySink::default();

        let new_ref = apply(&sink, None, Some(&payload())).await.unwrap().unwrap();
        assert!(sink.contains(&new_ref));
    }

    #[tokio::test]
    async fn store_failure_aborts_before_release() {
        // FailingSink also fails release, so an attempted release would turn
        // this error into a release error; the store error proves ordering.
        let err = apply(&FailingSink, Some("old.png"), Some(&payload()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn release_current_removes_owned_asset() {
        let sink = MemorySink::default();
        sink.insert("owned.png");

        release_current(&sink, Some("owned.png")).await.unwrap();
        assert!(!sink.contains("owned.png"));
    }

    #[tokio::test]
    async fn release_current_with_no_asset_is_noop() {
        release_current(&MemorySink::default(), None).await.unwrap();
        // FailingSink would error if release were attempted
        release_current(&FailingSink, None).await.unwrap();
    }

    #[tokio::test]
    async fn releasing_absent_ref_succeeds() {
        let sink = MemorySink::default();
        release_current(&sink, Some("never-stored.png"))
            .await
            .unwrap();
    }
}
