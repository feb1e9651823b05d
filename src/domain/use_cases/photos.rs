use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_CAPTION_LENGTH;
use crate::entities::photo::{Photo, PhotoCreatedResponse, PhotoInsert, UpdatePhotoRequest};
use crate::errors::AppError;
use crate::infrastructure::media::store::ImageStore;
use crate::repositories::photo::PhotoRepository;

pub struct PhotoHandler<P>
where
    P: PhotoRepository,
{
    pub photo_repo: P,
    image_store: Arc<dyn ImageStore>,
}

impl<P> PhotoHandler<P>
where
    P: PhotoRepository,
{
    pub fn new(photo_repo: P, image_store: Arc<dyn ImageStore>) -> Self {
        PhotoHandler {
            photo_repo,
            image_store,
        }
    }

    /// The owner is always the authenticated caller; nothing in the upload
    /// payload can set it.
    pub async fn create_photo(
        &self,
        owner_user_id: Uuid,
        caption: Option<String>,
        image_bytes: &[u8],
    ) -> Result<PhotoCreatedResponse, AppError> {
        let caption = caption.unwrap_or_default();
        if caption.len() as u64 > MAX_CAPTION_LENGTH {
            return Err(AppError::field("caption", "Caption is too long"));
        }
        if image_bytes.is_empty() {
            return Err(AppError::field("image", "Image file is required"));
        }

        let image_ref = self.image_store.store_image(image_bytes).await?;

        let insert = PhotoInsert {
            id: Uuid::new_v4(),
            owner_user_id,
            caption,
            image_ref: image_ref.clone(),
            created_at: Utc::now(),
        };

        let id = self.photo_repo.create_photo(&insert).await?;

        Ok(PhotoCreatedResponse {
            id,
            image_url: image_ref,
        })
    }

    pub async fn update_photo(
        &self,
        requester_user_id: Uuid,
        photo_id: &Uuid,
        request: UpdatePhotoRequest,
    ) -> Result<Photo, AppError> {
        request.validate()?;

        let photo = self.owned_photo(requester_user_id, photo_id).await?;

        let caption = request.caption.unwrap_or(photo.caption);
        self.photo_repo.update_caption(photo_id, &caption).await
    }

    pub async fn delete_photo(
        &self,
        requester_user_id: Uuid,
        photo_id: &Uuid,
    ) -> Result<(), AppError> {
        self.owned_photo(requester_user_id, photo_id).await?;
        self.photo_repo.delete_photo(photo_id).await
    }

    /// Fetches the photo and enforces the owner-only mutation rule.
    async fn owned_photo(&self, requester_user_id: Uuid, photo_id: &Uuid) -> Result<Photo, AppError> {
        let photo = self.photo_repo.get_photo(photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        if photo.owner_user_id != requester_user_id {
            return Err(AppError::ForbiddenAccess);
        }

        Ok(photo)
    }
}
