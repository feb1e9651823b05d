use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_CAPTION_LENGTH;
use crate::entities::comment::CommentView;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub caption: String,
    pub image_ref: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct PhotoInsert {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub caption: String,
    pub image_ref: String,
    pub created_at: DateTime<Utc>,
}

/// One feed-query row: photo columns joined with the owner and the
/// aggregated like count. The count is always derived at query time.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PhotoWithCount {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub caption: String,
    pub image_ref: String,
    pub created_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub like_count: i64,
}

impl PhotoWithCount {
    pub fn owner_display_name(&self) -> String {
        let full = format!("{} {}", self.owner_first_name, self.owner_last_name);
        let full = full.trim();
        if full.is_empty() {
            self.owner_username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSort {
    Recent,
    Oldest,
    Popular,
}

impl FeedSort {
    /// Parses the `sort_by` query parameter; absence means `recent`.
    pub fn from_param(param: Option<&str>) -> Option<FeedSort> {
        match param {
            None => Some(FeedSort::Recent),
            Some("recent") => Some(FeedSort::Recent),
            Some("oldest") => Some(FeedSort::Oldest),
            Some("popular") => Some(FeedSort::Popular),
            Some(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedFilter {
    pub owner_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy)]
pub struct FeedPage {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdatePhotoRequest {
    #[validate(length(max = MAX_CAPTION_LENGTH, message = "Caption is too long"))]
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PhotoCreatedResponse {
    pub id: Uuid,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// Denormalized photo representation served by list, detail, and feed
/// endpoints. Interaction data is batch-fetched per page, never per photo.
#[derive(Debug, Serialize)]
pub struct PhotoView {
    pub id: Uuid,
    pub owner: OwnerSummary,
    pub caption: String,
    pub image_ref: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentView>,
    pub like_count: i64,
    pub likes: Vec<Uuid>,
    pub bookmarks: Vec<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_viewer: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_by_viewer: Option<bool>,
}
