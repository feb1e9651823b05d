use async_trait::async_trait;
use chrono::Utc;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    constants::MAX_TOGGLE_ATTEMPTS,
    entities::interaction::{InteractionKind, InteractionRow, ToggleState},
    errors::AppError,
    repositories::sqlx_repo::SqlxInteractionRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn toggle(
        &self,
        kind: InteractionKind,
        user_id: &Uuid,
        photo_id: &Uuid,
    ) -> Result<ToggleState, AppError>;
    async fn interactions_for_photos(
        &self,
        kind: InteractionKind,
        photo_ids: &[Uuid],
    ) -> Result<Vec<InteractionRow>, AppError>;
}

impl SqlxInteractionRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxInteractionRepo { pool }
    }
}

#[async_trait]
impl InteractionRepository for SqlxInteractionRepo {
    /// Explicit atomic toggle. The (user_id, photo_id) primary key is the
    /// arbiter: a conditional insert that affects no row means the relation
    /// already exists, so the call converts into a delete. A delete that
    /// affects no row means a concurrent toggle removed it first; the loop
    /// starts over until this call has performed exactly one flip.
    async fn toggle(
        &self,
        kind: InteractionKind,
        user_id: &Uuid,
        photo_id: &Uuid,
    ) -> Result<ToggleState, AppError> {
        let insert_sql = format!(
            "INSERT INTO {} (user_id, photo_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (user_id, photo_id) DO NOTHING",
            kind.table()
        );
        let delete_sql = format!(
            "DELETE FROM {} WHERE user_id = ? AND photo_id = ?",
            kind.table()
        );

        for _ in 0..MAX_TOGGLE_ATTEMPTS {
            let inserted = sqlx::query(&insert_sql)
                .bind(user_id)
                .bind(photo_id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(AppError::from)?
                .rows_affected();

            if inserted == 1 {
                return Ok(ToggleState::On);
            }

            let deleted = sqlx::query(&delete_sql)
                .bind(user_id)
                .bind(photo_id)
                .execute(&self.pool)
                .await
                .map_err(AppError::from)?
                .rows_affected();

            if deleted == 1 {
                return Ok(ToggleState::Off);
            }
        }

        Err(AppError::InternalError(
            "Toggle did not settle after repeated conflicts".into(),
        ))
    }

    /// One round trip for all likers/bookmarkers of a page of photos.
    async fn interactions_for_photos(
        &self,
        kind: InteractionKind,
        photo_ids: &[Uuid],
    ) -> Result<Vec<InteractionRow>, AppError> {
        if photo_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(format!(
            "SELECT user_id, photo_id, created_at FROM {} WHERE photo_id IN (",
            kind.table()
        ));

        let mut separated = builder.separated(", ");
        for photo_id in photo_ids {
            separated.push_bind(*photo_id);
        }
        builder.push(") ORDER BY created_at ASC");

        let rows = builder
            .build_query_as::<InteractionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(rows)
    }
}
