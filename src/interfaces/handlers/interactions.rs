use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::interaction::{InteractionKind, ToggleResponse},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

async fn toggle(
    claims: AuthClaims,
    photo_id: Uuid,
    state: &AppState,
    kind: InteractionKind,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let result = state.interaction_handler
        .toggle(kind, user_id, &photo_id)
        .await?;

    Ok(HttpResponse::Ok().json(ToggleResponse {
        status: result.status_word(kind),
    }))
}

#[instrument(skip(claims, photo_id, state))]
pub async fn like_toggle(
    claims: AuthClaims,
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    toggle(claims, photo_id.into_inner(), &state, InteractionKind::Like).await
}

#[instrument(skip(claims, photo_id, state))]
pub async fn save_toggle(
    claims: AuthClaims,
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    toggle(claims, photo_id.into_inner(), &state, InteractionKind::Bookmark).await
}
