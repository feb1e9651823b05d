use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::entities::token::AuthResponse;
use crate::entities::user::{
    LoginUser, NewUser, NewUserResponse, PasswordResetConfirm, PasswordResetRequest,
    UpdateProfileRequest, User, UserProfileResponse,
};
use crate::errors::{AppError, AuthError};
use crate::infrastructure::auth::reset::ResetDelivery;
use crate::repositories::token::TokenServiceRepository;
use crate::repositories::user::UserRepository;

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub token_service: T,
    reset_delivery: Arc<dyn ResetDelivery>,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, token_service: T, reset_delivery: Arc<dyn ResetDelivery>) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            reset_delivery,
        }
    }

    /// Registers a new user. The empty profile is created synchronously as
    /// part of the same store operation, not via any save hook.
    pub async fn register(&self, request: NewUser) -> Result<NewUserResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let user_id = self.user_repo.create_user_with_profile(&user_insert).await?;

        Ok(NewUserResponse {
            id: user_id,
            message: "User created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self.user_repo.get_user_by_email(&request.email)
            .await
            .map_err(|_e| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!("User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Refreshes the access token using the refresh token
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;
        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        self.create_auth_response(&user)
    }

    /// Always answers success-shaped so responses cannot be used to probe
    /// which emails have accounts.
    pub async fn request_password_reset(&self, request: PasswordResetRequest) -> Result<(), AppError> {
        request.validate()?;

        match self.user_repo.get_user_by_email(&request.email).await {
            Ok(Some(user)) => {
                let token = self.token_service.create_reset_jwt(&user.id)
                    .map_err(|e| AppError::InternalError(e.to_string()))?;
                self.reset_delivery.deliver(&user.email, &token).await;
            }
            Ok(None) => {
                tracing::debug!("password reset requested for unknown email");
            }
            Err(e) => {
                tracing::error!("password reset lookup failed: {}", e);
            }
        }

        Ok(())
    }

    pub async fn confirm_password_reset(&self, request: PasswordResetConfirm) -> Result<(), AppError> {
        request.validate()?;

        let decoded = self.token_service.decode_reset_jwt(&request.token)
            .map_err(|_| AppError::field("token", "Invalid or expired reset token"))?;
        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::field("token", "Invalid or expired reset token"))?;

        let hashed_password = hash_password(&request.new_password)?;
        self.user_repo.update_password(&user_id, &hashed_password).await
    }

    pub async fn me(&self, user_id: &Uuid) -> Result<UserProfileResponse, AppError> {
        let user = self.user_repo.get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let profile = self.user_repo.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;

        Ok(UserProfileResponse::from_parts(user, profile))
    }

    pub async fn update_profile(
        &self,
        user_id: &Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserProfileResponse, AppError> {
        request.validate()?;

        if !request.is_empty() {
            self.user_repo.update_profile(user_id, &request).await?;
        }

        self.me(user_id).await
    }
}
