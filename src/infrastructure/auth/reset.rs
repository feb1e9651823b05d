use async_trait::async_trait;

/// Outbound delivery of password-reset tokens (normally an email sender).
/// Delivery failures are swallowed by the caller so responses stay
/// indistinguishable for existing and unknown accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResetDelivery: Send + Sync {
    async fn deliver(&self, email: &str, token: &str);
}

/// Development delivery: writes the token to the log instead of sending mail.
pub struct LogResetDelivery;

#[async_trait]
impl ResetDelivery for LogResetDelivery {
    async fn deliver(&self, email: &str, token: &str) {
        tracing::info!(%email, "password reset token issued: {}", token);
    }
}
