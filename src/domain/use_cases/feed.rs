use std::collections::HashMap;

use uuid::Uuid;

use crate::entities::comment::CommentView;
use crate::entities::interaction::InteractionKind;
use crate::entities::photo::{FeedFilter, FeedPage, FeedSort, OwnerSummary, PhotoView, PhotoWithCount};
use crate::errors::AppError;
use crate::repositories::comment::CommentRepository;
use crate::repositories::interaction::InteractionRepository;
use crate::repositories::photo::PhotoRepository;

/// Composes photo rows with batch-fetched interaction and comment data into
/// denormalized page views. Three round trips per page, independent of page
/// size.
pub struct FeedHandler<P, I, C>
where
    P: PhotoRepository,
    I: InteractionRepository,
    C: CommentRepository,
{
    pub photo_repo: P,
    pub interaction_repo: I,
    pub comment_repo: C,
}

impl<P, I, C> FeedHandler<P, I, C>
where
    P: PhotoRepository,
    I: InteractionRepository,
    C: CommentRepository,
{
    pub fn new(photo_repo: P, interaction_repo: I, comment_repo: C) -> Self {
        FeedHandler {
            photo_repo,
            interaction_repo,
            comment_repo,
        }
    }

    pub async fn get_feed(
        &self,
        filter: FeedFilter,
        sort: FeedSort,
        page: FeedPage,
        viewer: Option<Uuid>,
    ) -> Result<Vec<PhotoView>, AppError> {
        let photos = self.photo_repo.list_photos(&filter, sort, &page).await?;
        self.assemble_views(photos, viewer).await
    }

    pub async fn photo_detail(
        &self,
        photo_id: &Uuid,
        viewer: Option<Uuid>,
    ) -> Result<PhotoView, AppError> {
        let photo = self.photo_repo.get_photo_with_count(photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        let mut views = self.assemble_views(vec![photo], viewer).await?;
        views.pop()
            .ok_or_else(|| AppError::InternalError("Assembled page was empty".into()))
    }

    pub async fn saved_photos(
        &self,
        user_id: Uuid,
        page: FeedPage,
    ) -> Result<Vec<PhotoView>, AppError> {
        let photos = self.photo_repo.list_saved_photos(&user_id, &page).await?;
        self.assemble_views(photos, Some(user_id)).await
    }

    async fn assemble_views(
        &self,
        photos: Vec<PhotoWithCount>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<PhotoView>, AppError> {
        let photo_ids: Vec<Uuid> = photos.iter().map(|p| p.id).collect();

        let likes = self.interaction_repo
            .interactions_for_photos(InteractionKind::Like, &photo_ids)
            .await?;
        let bookmarks = self.interaction_repo
            .interactions_for_photos(InteractionKind::Bookmark, &photo_ids)
            .await?;
        let comments = self.comment_repo.comments_for_photos(&photo_ids).await?;

        let mut likes_by_photo: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in likes {
            likes_by_photo.entry(row.photo_id).or_default().push(row.user_id);
        }

        let mut bookmarks_by_photo: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in bookmarks {
            bookmarks_by_photo.entry(row.photo_id).or_default().push(row.user_id);
        }

        let mut comments_by_photo: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
        for row in comments {
            comments_by_photo.entry(row.photo_id).or_default().push(row.into());
        }

        let views = photos
            .into_iter()
            .map(|photo| {
                let likes = likes_by_photo.remove(&photo.id).unwrap_or_default();
                let bookmarks = bookmarks_by_photo.remove(&photo.id).unwrap_or_default();
                let comments = comments_by_photo.remove(&photo.id).unwrap_or_default();

                let liked_by_viewer = viewer.map(|v| likes.contains(&v));
                let saved_by_viewer = viewer.map(|v| bookmarks.contains(&v));

                PhotoView {
                    id: photo.id,
                    owner: OwnerSummary {
                        id: photo.owner_user_id,
                        username: photo.owner_username.clone(),
                        display_name: photo.owner_display_name(),
                    },
                    caption: photo.caption,
                    image_ref: photo.image_ref,
                    created_at: photo.created_at,
                    comments,
                    like_count: photo.like_count,
                    likes,
                    bookmarks,
                    liked_by_viewer,
                    saved_by_viewer,
                }
            })
            .collect();

        Ok(views)
    }
}
