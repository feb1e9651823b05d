use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const MAX_CAPTION_LENGTH: u64 = 2200;
pub const MAX_COMMENT_LENGTH: u64 = 2200;
pub const MAX_BIO_LENGTH: u64 = 500;

/// Upper bound on retries when a toggle loses the insert/delete race to a
/// concurrent toggle on the same (user, photo) pair.
pub const MAX_TOGGLE_ATTEMPTS: u32 = 8;
