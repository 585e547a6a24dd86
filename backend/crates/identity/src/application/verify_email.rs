//! Email Verification Use Case

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::MailSender;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

/// Email verification use case
pub struct EmailVerificationUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    repo: Arc<R>,
    mailer: Arc<M>,
}

impl<R, M> EmailVerificationUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>) -> Self {
        Self { repo, mailer }
    }

    /// Confirm the address behind a verification token.
    pub async fn verify(&self, token: &str) -> IdentityResult<()> {
        let mut user = self
            .repo
            .find_by_verification_token(token)
            .await?
            .ok_or(IdentityError::InvalidVerificationToken)?;

        if !user.verification_token_valid(Utc::now()) {
            return Err(IdentityError::VerificationTokenExpired);
        }

        user.mark_email_verified();
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");
        Ok(())
    }

    /// Re-arm and resend the verification token. Silently succeeds for
    /// unknown emails so the endpoint cannot be used to enumerate accounts.
    pub async fn resend(&self, email: &str) -> IdentityResult<()> {
        let Ok(email) = Email::new(email) else {
            return Ok(());
        };

        let Some(mut user) = self.repo.find_by_email(&email).await? else {
            return Ok(());
        };

        if user.email_verified {
            return Err(IdentityError::AlreadyVerified);
        }

        let token = platform::crypto::random_token();
        user.set_verification_token(token.clone());
        self.repo.update(&user).await?;

        self.mailer
            .send_email_verification(user.email.as_str(), &token)
            .await?;

        tracing::info!(user_id = %user.user_id, "Verification email resent");
        Ok(())
    }
}
