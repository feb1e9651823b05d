use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The two interaction relations share one lifecycle; the kind selects the
/// backing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Bookmark,
}

impl InteractionKind {
    pub fn table(&self) -> &'static str {
        match self {
            InteractionKind::Like => "likes",
            InteractionKind::Bookmark => "bookmarks",
        }
    }
}

/// Resulting presence of the (user, photo) row after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    /// Wire word for the toggle response, e.g. "liked"/"unliked".
    pub fn status_word(&self, kind: InteractionKind) -> &'static str {
        match (kind, self) {
            (InteractionKind::Like, ToggleState::On) => "liked",
            (InteractionKind::Like, ToggleState::Off) => "unliked",
            (InteractionKind::Bookmark, ToggleState::On) => "saved",
            (InteractionKind::Bookmark, ToggleState::Off) => "unsaved",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: &'static str,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InteractionRow {
    pub user_id: Uuid,
    pub photo_id: Uuid,
    pub created_at: DateTime<Utc>,
}
