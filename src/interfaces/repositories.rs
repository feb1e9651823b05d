pub mod comment;
pub mod interaction;
pub mod photo;
pub mod sqlx_repo;
pub mod token;
pub mod user;
