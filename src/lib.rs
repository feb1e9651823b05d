use std::sync::Arc;

use url::Url;

mod domain;
mod interfaces;
mod infrastructure;
pub mod constants;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;

pub use domain::{entities, password, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db, media};

use auth::jwt::JwtService;
use auth::reset::LogResetDelivery;
use errors::AppError;
use media::store::LocalImageStore;
use repositories::sqlx_repo::{SqlxCommentRepo, SqlxInteractionRepo, SqlxPhotoRepo, SqlxUserRepo};
use use_cases::auth::AuthHandler;
use use_cases::comments::CommentHandler;
use use_cases::feed::FeedHandler;
use use_cases::interactions::InteractionHandler;
use use_cases::photos::PhotoHandler;

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppPhotoHandler = PhotoHandler<SqlxPhotoRepo>;
pub type AppCommentHandler = CommentHandler<SqlxCommentRepo, SqlxPhotoRepo>;
pub type AppInteractionHandler = InteractionHandler<SqlxInteractionRepo, SqlxPhotoRepo>;
pub type AppFeedHandler = FeedHandler<SqlxPhotoRepo, SqlxInteractionRepo, SqlxCommentRepo>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub photo_handler: AppPhotoHandler,
    pub comment_handler: AppCommentHandler,
    pub interaction_handler: AppInteractionHandler,
    pub feed_handler: AppFeedHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::SqlitePool) -> Result<Self, AppError> {
        let jwt_service = JwtService::new(config);

        let media_base = Url::parse(&config.media_base_url)
            .map_err(|e| AppError::InternalError(format!("Invalid media base URL: {}", e)))?;
        let image_store = Arc::new(LocalImageStore::new(config.media_root.clone(), media_base));

        let auth_handler = AuthHandler::new(
            SqlxUserRepo::new(pool.clone()),
            jwt_service,
            Arc::new(LogResetDelivery),
        );
        let photo_handler = PhotoHandler::new(SqlxPhotoRepo::new(pool.clone()), image_store);
        let comment_handler = CommentHandler::new(
            SqlxCommentRepo::new(pool.clone()),
            SqlxPhotoRepo::new(pool.clone()),
        );
        let interaction_handler = InteractionHandler::new(
            SqlxInteractionRepo::new(pool.clone()),
            SqlxPhotoRepo::new(pool.clone()),
        );
        let feed_handler = FeedHandler::new(
            SqlxPhotoRepo::new(pool.clone()),
            SqlxInteractionRepo::new(pool.clone()),
            SqlxCommentRepo::new(pool),
        );

        Ok(AppState {
            auth_handler,
            photo_handler,
            comment_handler,
            interaction_handler,
            feed_handler,
        })
    }
}
