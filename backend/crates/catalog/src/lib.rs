//! Machine Catalog Backend Module
//!
//! Read-mostly store of rentable machine listings with per-unit inventory
//! counts and tiered rental rates.
//!
//! Clean Architecture structure:
//! - `domain/` - Machine entity, inventory invariants, repository trait
//! - `application/` - Catalog service (CRUD + guards + image management)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Inventory invariants
//! - `0 <= rented_units <= total_units` at all times
//! - Available units are derived, never stored
//! - `total_units` can never be reduced below `rented_units`
//! - Machines with active rentals cannot be deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_admin_router, catalog_public_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
