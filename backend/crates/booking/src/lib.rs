//! Booking Engine Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Booking + message entities, the status state machine,
//!   price computation, repository traits
//! - `application/` - Use cases (create, transitions, message thread, queries)
//! - `infra/` - Database implementations (transactional transitions)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Workflow Model
//! Payment is an off-chain crypto transfer, so the state machine encodes a
//! human-in-the-loop handshake: an admin publishes a payment address, the
//! requester attests to having paid, and the admin independently confirms
//! before inventory is committed. Inventory is incremented only at final
//! approval, clamped at machine capacity; every transition appends a
//! system message so the thread is an append-only journal of the workflow.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{BookingError, BookingResult};
pub use infra::postgres::PgBookingRepository;
pub use presentation::router::booking_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
