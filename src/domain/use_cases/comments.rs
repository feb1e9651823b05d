use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::comment::{CommentCreatedResponse, CommentInsert, NewCommentRequest};
use crate::errors::AppError;
use crate::repositories::comment::CommentRepository;
use crate::repositories::photo::PhotoRepository;

pub struct CommentHandler<C, P>
where
    C: CommentRepository,
    P: PhotoRepository,
{
    pub comment_repo: C,
    pub photo_repo: P,
}

impl<C, P> CommentHandler<C, P>
where
    C: CommentRepository,
    P: PhotoRepository,
{
    pub fn new(comment_repo: C, photo_repo: P) -> Self {
        CommentHandler {
            comment_repo,
            photo_repo,
        }
    }

    /// The author is always the authenticated caller.
    pub async fn create_comment(
        &self,
        author_user_id: Uuid,
        request: NewCommentRequest,
    ) -> Result<CommentCreatedResponse, AppError> {
        request.validate()?;

        self.photo_repo.get_photo(&request.photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        let insert = CommentInsert {
            id: Uuid::new_v4(),
            author_user_id,
            photo_id: request.photo_id,
            text: request.text,
            created_at: Utc::now(),
        };

        let id = self.comment_repo.create_comment(&insert).await?;

        Ok(CommentCreatedResponse {
            id,
            photo_id: insert.photo_id,
        })
    }

    /// Two-party deletion right: the comment's author may delete it, and so
    /// may the owner of the photo it sits under.
    pub async fn delete_comment(
        &self,
        requester_user_id: Uuid,
        comment_id: &Uuid,
    ) -> Result<(), AppError> {
        let comment = self.comment_repo.get_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

        let photo = self.photo_repo.get_photo(&comment.photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))?;

        let is_author = requester_user_id == comment.author_user_id;
        let is_photo_owner = requester_user_id == photo.owner_user_id;
        if !is_author && !is_photo_owner {
            return Err(AppError::ForbiddenAccess);
        }

        self.comment_repo.delete_comment(comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::comment::Comment;
    use crate::entities::photo::Photo;
    use crate::repositories::comment::MockCommentRepository;
    use crate::repositories::photo::MockPhotoRepository;

    fn photo_owned_by(owner: Uuid) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            owner_user_id: owner,
            caption: String::new(),
            image_ref: "http://media.local/p.png".into(),
            created_at: Utc::now(),
        }
    }

    fn comment_by(author: Uuid, comment_id: Uuid) -> Comment {
        Comment {
            id: comment_id,
            author_user_id: author,
            photo_id: Uuid::new_v4(),
            text: "nice framing".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_comment_requires_existing_photo() {
        let mut photo_repo = MockPhotoRepository::new();
        photo_repo.expect_get_photo().returning(|_| Ok(None));

        let mut comment_repo = MockCommentRepository::new();
        comment_repo.expect_create_comment().never();

        let handler = CommentHandler::new(comment_repo, photo_repo);

        let result = handler
            .create_comment(Uuid::new_v4(), NewCommentRequest {
                photo_id: Uuid::new_v4(),
                text: "hello".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn author_can_delete_own_comment_on_another_users_photo() {
        let author = Uuid::new_v4();
        let photo_owner = Uuid::new_v4();
        let comment_id = Uuid::new_v4();

        let mut comment_repo = MockCommentRepository::new();
        comment_repo
            .expect_get_comment()
            .returning(move |id| Ok(Some(comment_by(author, *id))));
        comment_repo
            .expect_delete_comment()
            .once()
            .returning(|_| Ok(()));

        let mut photo_repo = MockPhotoRepository::new();
        photo_repo
            .expect_get_photo()
            .returning(move |_| Ok(Some(photo_owned_by(photo_owner))));

        let handler = CommentHandler::new(comment_repo, photo_repo);

        handler.delete_comment(author, &comment_id).await.unwrap();
    }

    #[tokio::test]
    async fn photo_owner_can_delete_any_comment_on_own_photo() {
        let author = Uuid::new_v4();
        let photo_owner = Uuid::new_v4();
        let comment_id = Uuid::new_v4();

        let mut comment_repo = MockCommentRepository::new();
        comment_repo
            .expect_get_comment()
            .returning(move |id| Ok(Some(comment_by(author, *id))));
        comment_repo
            .expect_delete_comment()
            .once()
            .returning(|_| Ok(()));

        let mut photo_repo = MockPhotoRepository::new();
        photo_repo
            .expect_get_photo()
            .returning(move |_| Ok(Some(photo_owned_by(photo_owner))));

        let handler = CommentHandler::new(comment_repo, photo_repo);

        handler.delete_comment(photo_owner, &comment_id).await.unwrap();
    }

    #[tokio::test]
    async fn third_party_cannot_delete_a_comment() {
        let author = Uuid::new_v4();
        let photo_owner = Uuid::new_v4();
        let comment_id = Uuid::new_v4();

        let mut comment_repo = MockCommentRepository::new();
        comment_repo
            .expect_get_comment()
            .returning(move |id| Ok(Some(comment_by(author, *id))));
        comment_repo.expect_delete_comment().never();

        let mut photo_repo = MockPhotoRepository::new();
        photo_repo
            .expect_get_photo()
            .returning(move |_| Ok(Some(photo_owned_by(photo_owner))));

        let handler = CommentHandler::new(comment_repo, photo_repo);

        let result = handler.delete_comment(Uuid::new_v4(), &comment_id).await;

        assert!(matches!(result, Err(AppError::ForbiddenAccess)));
    }
}
