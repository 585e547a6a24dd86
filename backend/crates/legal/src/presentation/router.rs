//! Legal Document Routers
//!
//! The public read surface and the admin surface are separate routers;
//! the caller layers the auth middleware onto the admin router.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

use crate::domain::repository::LegalRepository;
use crate::infra::postgres::PgLegalRepository;
use crate::presentation::handlers::{self, LegalAppState};

/// Public read router (no authentication)
pub fn legal_public_router(repo: PgLegalRepository) -> Router {
    legal_public_router_generic(repo)
}

/// Admin router; caller must layer `require_auth` on top
pub fn legal_admin_router(repo: PgLegalRepository) -> Router {
    legal_admin_router_generic(repo)
}

/// Generic public read router
pub fn legal_public_router_generic<R>(repo: R) -> Router
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    let state = LegalAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/public/privacy-policy",
            get(handlers::get_privacy_policy::<R>),
        )
        .route(
            "/public/terms-of-service",
            get(handlers::get_terms_of_service::<R>),
        )
        .with_state(state)
}

/// Generic admin router
pub fn legal_admin_router_generic<R>(repo: R) -> Router
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    let state = LegalAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", post(handlers::create_document::<R>))
        .route("/", get(handlers::list_documents::<R>))
        .route("/{id}", get(handlers::get_document::<R>))
        .route("/{id}", patch(handlers::update_document::<R>))
        .route("/{id}", delete(handlers::delete_document::<R>))
        .route(
            "/type/{type}",
            patch(handlers::update_document_by_type::<R>),
        )
        .with_state(state)
}
