//! Password Reset Use Case
//!
//! Request / verify / apply flow with opaque one-hour tokens. The request
//! step never reveals whether an email is registered.

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::MailSender;
use platform::password::{ClearTextPassword, hash_password};

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

/// Password reset use case
pub struct PasswordResetUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<IdentityConfig>,
}

impl<R, M> PasswordResetUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<IdentityConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    /// Arm a reset token and email the link. Silently succeeds for unknown
    /// emails so the endpoint cannot be used to enumerate accounts.
    pub async fn request(&self, email: &str) -> IdentityResult<()> {
        let Ok(email) = Email::new(email) else {
            return Ok(());
        };

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            return Ok(());
        };

        let token = platform::crypto::random_token();
        user.set_password_reset_token(token.clone());
        self.repo.update(&user).await?;

        self.mailer
            .send_password_reset(user.email.as_str(), &token)
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset requested");
        Ok(())
    }

    /// Check whether a reset token is currently valid. Never errors:
    /// unknown and expired both report invalid.
    pub async fn verify(&self, token: &str) -> IdentityResult<bool> {
        let Some(user) = self.repo.find_by_reset_token(token).await? else {
            return Ok(false);
        };
        Ok(user.reset_token_valid(Utc::now()))
    }

    /// Apply a new password for a valid token.
    pub async fn reset(&self, token: &str, new_password: String) -> IdentityResult<()> {
        let mut user = self
            .repo
            .find_by_reset_token(token)
            .await?
            .ok_or(IdentityError::InvalidResetToken)?;

        if !user.reset_token_valid(Utc::now()) {
            return Err(IdentityError::ResetTokenExpired);
        }

        let password = ClearTextPassword::new(new_password)?;
        let password_hash = hash_password(&password, self.config.pepper_bytes())?;

        user.apply_password_reset(password_hash);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset applied");
        Ok(())
    }
}
