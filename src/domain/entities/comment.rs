use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_COMMENT_LENGTH;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub author_user_id: Uuid,
    pub photo_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CommentInsert {
    pub id: Uuid,
    pub author_user_id: Uuid,
    pub photo_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCommentRequest {
    pub photo_id: Uuid,

    #[validate(length(min = 1, max = MAX_COMMENT_LENGTH, message = "Comment text must be 1-2200 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub id: Uuid,
    pub photo_id: Uuid,
}

/// Comment row joined with its author, as embedded in a `PhotoView`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub author_user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_first_name: String,
    pub author_last_name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author_user_id: Uuid,
    pub author_username: String,
    pub author_display_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentView {
    fn from(row: CommentWithAuthor) -> Self {
        let full = format!("{} {}", row.author_first_name, row.author_last_name);
        let full = full.trim();
        let author_display_name = if full.is_empty() {
            row.author_username.clone()
        } else {
            full.to_string()
        };

        CommentView {
            id: row.id,
            author_user_id: row.author_user_id,
            author_username: row.author_username,
            author_display_name,
            text: row.text,
            created_at: row.created_at,
        }
    }
}
