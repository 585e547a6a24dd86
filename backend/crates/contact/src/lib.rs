//! Contact Inbox Backend Module
//!
//! Public contact-form intake plus the admin triage surface
//! (status workflow, read flags, statistics).

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ContactError, ContactResult};
pub use infra::postgres::PgContactRepository;
pub use presentation::router::{contact_admin_router, contact_public_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
