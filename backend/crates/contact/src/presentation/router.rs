//! Contact Routers
//!
//! The public intake endpoint and the admin triage surface are separate
//! routers; the caller layers the auth middleware onto the admin router.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::ContactRepository;
use crate::infra::postgres::PgContactRepository;
use crate::presentation::handlers::{self, ContactAppState};

/// Public intake router (no authentication)
pub fn contact_public_router(repo: PgContactRepository) -> Router {
    contact_public_router_generic(repo)
}

/// Admin triage router; caller must layer `require_auth` on top
pub fn contact_admin_router(repo: PgContactRepository) -> Router {
    contact_admin_router_generic(repo)
}

/// Generic public intake router
pub fn contact_public_router_generic<R>(repo: R) -> Router
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let state = ContactAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", post(handlers::create_submission::<R>))
        .with_state(state)
}

/// Generic admin triage router
pub fn contact_admin_router_generic<R>(repo: R) -> Router
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let state = ContactAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/admin", get(handlers::admin_list::<R>))
        .route("/admin/statistics", get(handlers::admin_statistics::<R>))
        .route("/admin/recent", get(handlers::admin_recent::<R>))
        .route("/admin/{id}", get(handlers::admin_get::<R>))
        .route("/admin/{id}", put(handlers::admin_update::<R>))
        .route("/admin/{id}", delete(handlers::admin_delete::<R>))
        .route("/admin/{id}/mark-read", put(handlers::admin_mark_read::<R>))
        .route(
            "/admin/{id}/mark-unread",
            put(handlers::admin_mark_unread::<R>),
        )
        .with_state(state)
}
