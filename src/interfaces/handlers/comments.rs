use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::comment::NewCommentRequest,
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

#[instrument(skip(claims, state, data))]
pub async fn create_comment(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<NewCommentRequest>,
) -> Result<impl Responder, AppError> {
    let author = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let response = state.comment_handler
        .create_comment(author, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(claims, comment_id, state))]
pub async fn delete_comment(
    claims: AuthClaims,
    comment_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let requester = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    state.comment_handler
        .delete_comment(requester, &comment_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
