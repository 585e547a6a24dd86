//! Wallet Backend Module
//!
//! Per-user, per-currency balance ledgers, created lazily on first
//! access. Crypto payment confirmation for bookings is manual, so the
//! booking engine never debits these balances in the current design.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{WalletError, WalletResult};
pub use infra::postgres::PgWalletRepository;
pub use presentation::router::wallet_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}
