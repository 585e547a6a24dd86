//! Register Use Case
//!
//! Creates a new account, arms the email-verification token and issues a
//! bearer token so the caller is signed in immediately.

use std::sync::Arc;

use kernel::context::Role;
use platform::jwt::JwtManager;
use platform::mailer::MailSender;
use platform::password::{ClearTextPassword, hash_password};

use crate::application::config::IdentityConfig;
use crate::application::login::LoginOutput;
use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    jwt: Arc<JwtManager>,
    config: Arc<IdentityConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: UserRepository,
    M: MailSender,
{
    pub fn new(
        repo: Arc<R>,
        mailer: Arc<M>,
        jwt: Arc<JwtManager>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            repo,
            mailer,
            jwt,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| IdentityError::InvalidEmail)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = hash_password(&password, self.config.pepper_bytes())?;

        let mut user = User::new(
            email,
            password_hash,
            input.first_name,
            input.last_name,
            input.phone,
            Role::User,
        );

        let verification_token = platform::crypto::random_token();
        user.set_verification_token(verification_token.clone());

        self.repo.create(&user).await?;

        // Verification email failure must not lose the created account
        if let Err(e) = self
            .mailer
            .send_email_verification(user.email.as_str(), &verification_token)
            .await
        {
            tracing::warn!(error = %e, user_id = %user.user_id, "Verification email failed, continuing");
        }

        let access_token = self
            .jwt
            .issue(user.user_id.into_uuid(), user.email.as_str(), user.role.code())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(LoginOutput { user, access_token })
    }
}
