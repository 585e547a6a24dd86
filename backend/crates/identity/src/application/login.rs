//! Login Use Case
//!
//! Authenticates a user by email + password and issues a bearer token.

use std::sync::Arc;

use platform::jwt::JwtManager;
use platform::password::{ClearTextPassword, verify_password};

use crate::application::config::IdentityConfig;
use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    jwt: Arc<JwtManager>,
    config: Arc<IdentityConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, jwt: Arc<JwtManager>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, jwt, config }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<LoginOutput> {
        // Malformed email can never match an account
        let email =
            Email::new(&input.email).map_err(|_| IdentityError::InvalidCredentials)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| IdentityError::InvalidCredentials)?;

        let valid = verify_password(&password, &user.password_hash, self.config.pepper_bytes())?;
        if !valid {
            return Err(IdentityError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(IdentityError::AccountDisabled);
        }

        user.record_login();
        self.repo.update(&user).await?;

        let access_token = self
            .jwt
            .issue(user.user_id.into_uuid(), user.email.as_str(), user.role.code())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, access_token })
    }
}
