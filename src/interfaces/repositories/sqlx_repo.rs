use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxPhotoRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxCommentRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxInteractionRepo {
    pub pool: SqlitePool,
}
