//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Use cases (login, register, reset, verification, accounts)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Stateless HS256 bearer tokens carrying subject, email and role
//! - Opaque random tokens with stored expiry for password reset and
//!   email verification
//! - Role checks performed explicitly in handlers, not by interception

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::postgres::PgIdentityRepository;
pub use presentation::middleware::{AuthState, require_auth};
pub use presentation::router::{auth_router, auth_state, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
