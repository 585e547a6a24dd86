//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::User;
use crate::domain::value_object::Email;
use crate::error::IdentityResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user
    async fn create(&self, user: &User) -> IdentityResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>>;

    /// Lookup by canonical email
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<User>>;

    async fn find_by_reset_token(&self, token: &str) -> IdentityResult<Option<User>>;

    async fn find_by_verification_token(&self, token: &str) -> IdentityResult<Option<User>>;

    /// All users, newest first
    async fn list(&self) -> IdentityResult<Vec<User>>;

    /// Persist all mutable fields of an existing user
    async fn update(&self, user: &User) -> IdentityResult<()>;

    async fn delete(&self, user_id: &UserId) -> IdentityResult<()>;
}
