use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    entities::photo::{FeedFilter, FeedPage, FeedSort, Photo, PhotoInsert, PhotoWithCount},
    errors::AppError,
    repositories::sqlx_repo::SqlxPhotoRepo,
};

/// Shared head of every feed-shaped query: photo columns, owner columns,
/// and the like count aggregated at query time.
const PHOTO_WITH_COUNT_SELECT: &str = "\
    SELECT p.id, p.owner_user_id, p.caption, p.image_ref, p.created_at, \
           u.username AS owner_username, \
           u.first_name AS owner_first_name, \
           u.last_name AS owner_last_name, \
           COUNT(l.user_id) AS like_count \
    FROM photos p \
    JOIN users u ON u.id = p.owner_user_id \
    LEFT JOIN likes l ON l.photo_id = p.id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError>;
    async fn get_photo(&self, id: &Uuid) -> Result<Option<Photo>, AppError>;
    async fn update_caption(&self, id: &Uuid, caption: &str) -> Result<Photo, AppError>;
    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError>;
    async fn list_photos(
        &self,
        filter: &FeedFilter,
        sort: FeedSort,
        page: &FeedPage,
    ) -> Result<Vec<PhotoWithCount>, AppError>;
    async fn get_photo_with_count(&self, id: &Uuid) -> Result<Option<PhotoWithCount>, AppError>;
    async fn list_saved_photos(
        &self,
        user_id: &Uuid,
        page: &FeedPage,
    ) -> Result<Vec<PhotoWithCount>, AppError>;
}

impl SqlxPhotoRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxPhotoRepo { pool }
    }
}

#[async_trait]
impl PhotoRepository for SqlxPhotoRepo {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO photos (id, owner_user_id, caption, image_ref, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(photo.id)
        .bind(photo.owner_user_id)
        .bind(&photo.caption)
        .bind(&photo.image_ref)
        .bind(photo.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(photo.id)
    }

    async fn get_photo(&self, id: &Uuid) -> Result<Option<Photo>, AppError> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_caption(&self, id: &Uuid, caption: &str) -> Result<Photo, AppError> {
        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos SET caption = ?
            WHERE id = ?
            RETURNING id, owner_user_id, caption, image_ref, created_at
            "#,
        )
        .bind(caption)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Photo not found".into()))
    }

    /// Comments, likes, and bookmarks go with the photo via the schema's
    /// ON DELETE CASCADE rules.
    async fn delete_photo(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Photo not found".into()));
        }

        Ok(())
    }

    async fn list_photos(
        &self,
        filter: &FeedFilter,
        sort: FeedSort,
        page: &FeedPage,
    ) -> Result<Vec<PhotoWithCount>, AppError> {
        let mut builder = QueryBuilder::new(PHOTO_WITH_COUNT_SELECT);

        if let Some(owner) = filter.owner_user_id {
            builder.push(" WHERE p.owner_user_id = ").push_bind(owner);
        }

        builder.push(" GROUP BY p.id");

        // popular pages stay deterministic across calls via the created_at
        // tie-break
        match sort {
            FeedSort::Recent => builder.push(" ORDER BY p.created_at DESC"),
            FeedSort::Oldest => builder.push(" ORDER BY p.created_at ASC"),
            FeedSort::Popular => builder.push(" ORDER BY like_count DESC, p.created_at DESC"),
        };

        builder.push(" LIMIT ").push_bind(page.limit);
        builder.push(" OFFSET ").push_bind(page.offset);

        let photos = builder
            .build_query_as::<PhotoWithCount>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(photos)
    }

    async fn get_photo_with_count(&self, id: &Uuid) -> Result<Option<PhotoWithCount>, AppError> {
        let mut builder = QueryBuilder::new(PHOTO_WITH_COUNT_SELECT);
        builder.push(" WHERE p.id = ").push_bind(*id);
        builder.push(" GROUP BY p.id");

        builder
            .build_query_as::<PhotoWithCount>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_saved_photos(
        &self,
        user_id: &Uuid,
        page: &FeedPage,
    ) -> Result<Vec<PhotoWithCount>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT p.id, p.owner_user_id, p.caption, p.image_ref, p.created_at, \
                    u.username AS owner_username, \
                    u.first_name AS owner_first_name, \
                    u.last_name AS owner_last_name, \
                    COUNT(l.user_id) AS like_count \
             FROM photos p \
             JOIN users u ON u.id = p.owner_user_id \
             JOIN bookmarks b ON b.photo_id = p.id AND b.user_id = ",
        );
        builder.push_bind(*user_id);
        builder.push(" LEFT JOIN likes l ON l.photo_id = p.id");
        builder.push(" GROUP BY p.id ORDER BY b.created_at DESC");
        builder.push(" LIMIT ").push_bind(page.limit);
        builder.push(" OFFSET ").push_bind(page.offset);

        let photos = builder
            .build_query_as::<PhotoWithCount>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(photos)
    }
}
