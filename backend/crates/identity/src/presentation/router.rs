//! Identity Routers
//!
//! Two routers share one state: the auth surface (mostly public) and the
//! users surface (fully protected). The caller layers `require_auth` onto
//! the protected routes.

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use platform::jwt::JwtManager;
use platform::mailer::{MailSender, ResendMailer};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgIdentityRepository;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware::{AuthState, require_auth};

/// Create the auth router with PostgreSQL repository and Resend mailer
pub fn auth_router(
    repo: PgIdentityRepository,
    mailer: ResendMailer,
    config: IdentityConfig,
) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create the users router with PostgreSQL repository and Resend mailer
pub fn users_router(
    repo: PgIdentityRepository,
    mailer: ResendMailer,
    config: IdentityConfig,
) -> Router {
    users_router_generic(repo, mailer, config)
}

/// Create a generic auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: IdentityConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let (state, auth_state) = build_states(repo, mailer, config);

    let protected = Router::new()
        .route("/me", get(handlers::me::<R, M>))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth::<R>));

    Router::new()
        .route("/login", post(handlers::login::<R, M>))
        .route("/register", post(handlers::register::<R, M>))
        .route("/forgot-password", post(handlers::forgot_password::<R, M>))
        .route(
            "/verify-reset-token",
            post(handlers::verify_reset_token::<R, M>),
        )
        .route("/reset-password", post(handlers::reset_password::<R, M>))
        .route("/verify-email", post(handlers::verify_email::<R, M>))
        .route(
            "/resend-verification-email",
            post(handlers::resend_verification_email::<R, M>),
        )
        .merge(protected)
        .with_state(state)
}

/// Create a generic users router for any repository/mailer implementation
pub fn users_router_generic<R, M>(repo: R, mailer: M, config: IdentityConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let (state, auth_state) = build_states(repo, mailer, config);

    Router::new()
        .route("/", post(handlers::create_user::<R, M>))
        .route("/", get(handlers::list_users::<R, M>))
        .route("/profile", get(handlers::get_profile::<R, M>))
        .route("/profile", patch(handlers::update_profile::<R, M>))
        .route("/change-password", post(handlers::change_password::<R, M>))
        .route("/{id}", get(handlers::get_user::<R, M>))
        .route("/{id}", patch(handlers::update_user::<R, M>))
        .route("/{id}", delete(handlers::delete_user::<R, M>))
        .route("/{id}/deactivate", post(handlers::deactivate_user::<R, M>))
        .route("/{id}/activate", post(handlers::activate_user::<R, M>))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth::<R>))
        .with_state(state)
}

fn build_states<R, M>(
    repo: R,
    mailer: M,
    config: IdentityConfig,
) -> (IdentityAppState<R, M>, AuthState<R>)
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: MailSender + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let jwt = Arc::new(JwtManager::new(&config.jwt_secret, config.jwt_ttl_secs()));

    let state = IdentityAppState {
        repo: repo.clone(),
        mailer: Arc::new(mailer),
        jwt: jwt.clone(),
        config: Arc::new(config),
    };
    let auth_state = AuthState { repo, jwt };

    (state, auth_state)
}

/// Build the middleware state used to protect routers of other crates.
pub fn auth_state(repo: PgIdentityRepository, config: &IdentityConfig) -> AuthState<PgIdentityRepository> {
    AuthState {
        repo: Arc::new(repo),
        jwt: Arc::new(JwtManager::new(&config.jwt_secret, config.jwt_ttl_secs())),
    }
}
