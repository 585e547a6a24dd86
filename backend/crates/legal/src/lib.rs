//! Legal Documents Backend Module
//!
//! Static legal-document management: one document per type
//! (privacy policy, terms of service), publicly readable, admin-editable.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{LegalError, LegalResult};
pub use infra::postgres::PgLegalRepository;
pub use presentation::router::{legal_admin_router, legal_public_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
