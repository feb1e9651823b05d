use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;
use uuid::Uuid;

use crate::errors::AppError;

/// Boundary to the binary image store. The backend only ever sees the
/// opaque ref URL this returns; serving the bytes is a CDN concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store_image(&self, bytes: &[u8]) -> Result<String, AppError>;
}

/// Filesystem-backed store: writes under `media_root` and returns a URL
/// joined onto `public_base`.
pub struct LocalImageStore {
    root: PathBuf,
    public_base: Url,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: Url) -> Self {
        LocalImageStore {
            root: root.into(),
            public_base,
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store_image(&self, bytes: &[u8]) -> Result<String, AppError> {
        let kind = infer::get(bytes)
            .filter(|k| k.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| AppError::field("image", "Upload is not a recognized image format"))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), kind.extension());
        let path = self.root.join(&file_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media root: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to persist image: {}", e)))?;

        let url = self.public_base
            .join(&file_name)
            .map_err(|e| AppError::InternalError(format!("Invalid media base URL: {}", e)))?;

        Ok(url.to_string())
    }
}
