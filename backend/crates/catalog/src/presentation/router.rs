//! Catalog Routers
//!
//! The public browse surface and the admin surface are separate routers;
//! the caller layers the auth middleware onto the admin router.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use platform::storage::{HttpObjectStore, ObjectStore};
use std::sync::Arc;

use crate::domain::repository::MachineRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Public browse router (no authentication)
pub fn catalog_public_router(repo: PgCatalogRepository, store: HttpObjectStore) -> Router {
    catalog_public_router_generic(repo, store)
}

/// Admin router; caller must layer `require_auth` on top
pub fn catalog_admin_router(repo: PgCatalogRepository, store: HttpObjectStore) -> Router {
    catalog_admin_router_generic(repo, store)
}

/// Generic public browse router
pub fn catalog_public_router_generic<R, S>(repo: R, store: S) -> Router
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
    };

    Router::new()
        .route("/public", get(handlers::public_machines::<R, S>))
        .route("/featured", get(handlers::featured_machines::<R, S>))
        .route("/public/{id}", get(handlers::public_machine::<R, S>))
        .with_state(state)
}

/// Generic admin router
pub fn catalog_admin_router_generic<R, S>(repo: R, store: S) -> Router
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
    };

    Router::new()
        .route("/", post(handlers::create_machine::<R, S>))
        .route("/", get(handlers::list_machines::<R, S>))
        .route("/{id}", get(handlers::get_machine::<R, S>))
        .route("/{id}", patch(handlers::update_machine::<R, S>))
        .route("/{id}", delete(handlers::delete_machine::<R, S>))
        .route("/{id}/toggle-active", patch(handlers::toggle_active::<R, S>))
        .route(
            "/{id}/toggle-featured",
            patch(handlers::toggle_featured::<R, S>),
        )
        .route("/{id}/status", patch(handlers::set_status::<R, S>))
        .route("/{id}/image", put(handlers::upload_image::<R, S>))
        .route("/{id}/image", delete(handlers::delete_image::<R, S>))
        .with_state(state)
}
