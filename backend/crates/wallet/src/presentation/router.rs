//! Wallet Router
//!
//! Fully authenticated surface; the caller layers `require_auth` on top.

use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::domain::repository::WalletRepository;
use crate::infra::postgres::PgWalletRepository;
use crate::presentation::handlers::{self, WalletAppState};

/// Create the wallet router with PostgreSQL repository
pub fn wallet_router(repo: PgWalletRepository) -> Router {
    wallet_router_generic(repo)
}

/// Create a generic wallet router for any repository implementation
pub fn wallet_router_generic<R>(repo: R) -> Router
where
    R: WalletRepository + Clone + Send + Sync + 'static,
{
    let state = WalletAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::get_all_wallets::<R>))
        .route("/crypto-types", get(handlers::crypto_types::<R>))
        .route("/address", put(handlers::update_wallet_address::<R>))
        .route("/{cryptoType}", get(handlers::get_wallet::<R>))
        .with_state(state)
}
