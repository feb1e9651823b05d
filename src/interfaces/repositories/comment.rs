use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    entities::comment::{Comment, CommentInsert, CommentWithAuthor},
    errors::AppError,
    repositories::sqlx_repo::SqlxCommentRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create_comment(&self, comment: &CommentInsert) -> Result<Uuid, AppError>;
    async fn get_comment(&self, id: &Uuid) -> Result<Option<Comment>, AppError>;
    async fn delete_comment(&self, id: &Uuid) -> Result<(), AppError>;
    async fn comments_for_photos(&self, photo_ids: &[Uuid]) -> Result<Vec<CommentWithAuthor>, AppError>;
}

impl SqlxCommentRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxCommentRepo { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepo {
    async fn create_comment(&self, comment: &CommentInsert) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, author_user_id, photo_id, text, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.id)
        .bind(comment.author_user_id)
        .bind(comment.photo_id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(comment.id)
    }

    async fn get_comment(&self, id: &Uuid) -> Result<Option<Comment>, AppError> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn delete_comment(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment not found".into()));
        }

        Ok(())
    }

    /// One round trip for all comments on a page of photos.
    async fn comments_for_photos(&self, photo_ids: &[Uuid]) -> Result<Vec<CommentWithAuthor>, AppError> {
        if photo_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(
            "SELECT c.id, c.photo_id, c.author_user_id, c.text, c.created_at, \
                    u.username AS author_username, \
                    u.first_name AS author_first_name, \
                    u.last_name AS author_last_name \
             FROM comments c \
             JOIN users u ON u.id = c.author_user_id \
             WHERE c.photo_id IN (",
        );

        let mut separated = builder.separated(", ");
        for photo_id in photo_ids {
            separated.push_bind(*photo_id);
        }
        builder.push(") ORDER BY c.created_at ASC");

        let comments = builder
            .build_query_as::<CommentWithAuthor>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(comments)
    }
}
