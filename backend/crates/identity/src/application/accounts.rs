//! Account Administration Use Case
//!
//! User CRUD for the admin surface plus the self-service profile and
//! change-password operations.

use std::sync::Arc;

use kernel::context::Role;
use kernel::id::UserId;
use platform::password::{ClearTextPassword, hash_password, verify_password};

use crate::application::config::IdentityConfig;
use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

/// Input for admin user creation
pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
}

/// Input for admin user update
#[derive(Default)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

/// Input for self-service profile update
#[derive(Default)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Account administration use case
pub struct AccountUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> AccountUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn create(&self, input: CreateUserInput) -> IdentityResult<User> {
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
            input.role.unwrap_or_default(),
        );
        user.avatar = input.avatar;

        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User created by admin");
        Ok(user)
    }

    pub async fn list(&self) -> IdentityResult<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get(&self, user_id: &UserId) -> IdentityResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::UserNotFound)
    }

    pub async fn update(&self, user_id: &UserId, input: UpdateUserInput) -> IdentityResult<User> {
        let mut user = self.get(user_id).await?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = input.phone {
            user.phone = Some(phone);
        }
        if let Some(role) = input.role {
            user.set_role(role);
        }
        if let Some(avatar) = input.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(active) = input.is_active {
            user.set_active(active);
        }
        user.updated_at = chrono::Utc::now();

        self.repo.update(&user).await?;
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        user_id: &UserId,
        input: UpdateProfileInput,
    ) -> IdentityResult<User> {
        self.update(
            user_id,
            UpdateUserInput {
                first_name: input.first_name,
                last_name: input.last_name,
                phone: input.phone,
                avatar: input.avatar,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn change_password(
        &self,
        user_id: &UserId,
        current_password: String,
        new_password: String,
    ) -> IdentityResult<()> {
        let mut user = self.get(user_id).await?;

        let current = ClearTextPassword::new(current_password)
            .map_err(|_| IdentityError::WrongPassword)?;
        let valid = verify_password(&current, &user.password_hash, self.config.pepper_bytes())?;
        if !valid {
            return Err(IdentityError::WrongPassword);
        }

        let new = ClearTextPassword::new(new_password)?;
        user.set_password(hash_password(&new, self.config.pepper_bytes())?);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");
        Ok(())
    }

    pub async fn set_active(&self, user_id: &UserId, active: bool) -> IdentityResult<User> {
        let mut user = self.get(user_id).await?;
        user.set_active(active);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, active, "User activation changed");
        Ok(user)
    }

    pub async fn remove(&self, user_id: &UserId) -> IdentityResult<()> {
        // Ensure it exists so deletion of a missing user is a 404
        self.get(user_id).await?;
        self.repo.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
