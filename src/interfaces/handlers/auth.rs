use actix_web::{error::ResponseError, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::token::{AuthResponse, RefreshTokenRequest};
use crate::entities::user::{LoginUser, NewUser, PasswordResetConfirm, PasswordResetRequest};
use crate::use_cases::extractors::AuthClaims;
use crate::entities::user::UpdateProfileRequest;
use crate::errors::AppError;
use crate::AppState;

#[instrument(skip(state, user))]
pub async fn register(
    state: web::Data<AppState>,
    user: web::Json<NewUser>,
) -> impl Responder {
    match state.auth_handler.register(user.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[instrument(skip(state, user))]
pub async fn login(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>,
) -> impl Responder {
    match state.auth_handler.login(user.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}

#[instrument(skip(state, request))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> impl Responder {
    match state.auth_handler.refresh_token(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(AuthResponse {
            access_token: auth_response.access_token,
            refresh_token: auth_response.refresh_token,
            token_type: "Bearer".to_string(),
        }),
        Err(e) => e.error_response(),
    }
}

/// Always 200 with the same body; existence of the account is not leaked.
#[instrument(skip(state, request))]
pub async fn password_reset(
    state: web::Data<AppState>,
    request: web::Json<PasswordResetRequest>,
) -> Result<impl Responder, AppError> {
    state.auth_handler.request_password_reset(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "If that account exists, a reset link has been sent"
    })))
}

#[instrument(skip(state, request))]
pub async fn password_reset_confirm(
    state: web::Data<AppState>,
    request: web::Json<PasswordResetConfirm>,
) -> Result<impl Responder, AppError> {
    state.auth_handler.confirm_password_reset(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Password updated successfully"
    })))
}

#[instrument(skip(claims, state))]
pub async fn me(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let profile = state.auth_handler.me(&user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state, data))]
pub async fn update_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let profile = state.auth_handler
        .update_profile(&user_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}
