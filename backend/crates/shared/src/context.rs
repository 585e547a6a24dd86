//! Request Context
//!
//! The authenticated caller, threaded explicitly through each request:
//! the auth middleware validates the bearer token and inserts a
//! [`RequestUser`] into request extensions; handlers receive it as an
//! extractor argument and perform role checks explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::app_error::{AppError, AppResult};
use crate::id::UserId;

/// Platform roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Role {
    #[default]
    User = 0,
    Admin = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::User),
            1 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct RequestUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl RequestUser {
    pub fn new(user_id: Uuid, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: UserId::from_uuid(user_id),
            email: email.into(),
            role,
        }
    }

    /// Explicit role check, invoked at the top of admin handlers.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Forbidden")
                .with_code("AUTH_004")
                .with_description("You do not have permission to access this resource"))
        }
    }
}

// ============================================================================
// Axum extractor (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized")
                    .with_code("AUTH_003")
                    .with_description("You must be logged in to access this resource")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::User.code(), "user");
        assert_eq!(Role::Admin.code(), "admin");
        assert_eq!(Role::from_code("admin"), Some(Role::Admin));
        assert_eq!(Role::from_code("root"), None);
        assert_eq!(Role::from_id(0), Some(Role::User));
        assert_eq!(Role::from_id(7), None);
    }

    #[test]
    fn test_require_admin() {
        let admin = RequestUser::new(Uuid::new_v4(), "admin@example.com", Role::Admin);
        assert!(admin.require_admin().is_ok());

        let user = RequestUser::new(Uuid::new_v4(), "user@example.com", Role::User);
        let err = user.require_admin().unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.code(), "AUTH_004");
    }
}
