//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors use
//! `kernel::error::AppError` and the uniform response envelope.

use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use booking::{PgBookingRepository, booking_router};
use catalog::{PgCatalogRepository, catalog_admin_router, catalog_public_router};
use contact::{PgContactRepository, contact_admin_router, contact_public_router};
use identity::middleware::require_auth;
use identity::{IdentityConfig, PgIdentityRepository, auth_router, auth_state, users_router};
use legal::{PgLegalRepository, legal_admin_router, legal_public_router};
use platform::mailer::ResendMailer;
use platform::storage::HttpObjectStore;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet::{PgWalletRepository, wallet_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,identity=info,catalog=info,booking=info,wallet=info,contact=info,legal=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Identity configuration
    let identity_config = if cfg!(debug_assertions) {
        IdentityConfig::with_random_secret()
    } else {
        // In production, load the signing secret from environment
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        let mut config = IdentityConfig::new(jwt_secret.into_bytes());
        config.pepper = env::var("PASSWORD_PEPPER").ok().map(String::into_bytes);
        config
    };

    // External collaborators
    let mailer = ResendMailer::new(
        env::var("EMAIL_API").unwrap_or_default(),
        env::var("EMAIL_FROM").unwrap_or_else(|_| "HashRent <noreply@hashrent.io>".to_string()),
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3001".to_string()),
    );

    let object_store = HttpObjectStore::new(
        env::var("STORAGE_BASE_URL")
            .unwrap_or_else(|_| "https://hashrent-uploads.s3.amazonaws.com".to_string()),
        env::var("STORAGE_TOKEN").unwrap_or_default(),
    );

    // Repositories
    let identity_repo = PgIdentityRepository::new(pool.clone());
    let catalog_repo = PgCatalogRepository::new(pool.clone());
    let booking_repo = PgBookingRepository::new(pool.clone());
    let wallet_repo = PgWalletRepository::new(pool.clone());
    let contact_repo = PgContactRepository::new(pool.clone());
    let legal_repo = PgLegalRepository::new(pool.clone());

    // Bearer-token middleware shared by every protected surface
    let auth_layer = middleware::from_fn_with_state(
        auth_state(identity_repo.clone(), &identity_config),
        require_auth::<PgIdentityRepository>,
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3001,http://127.0.0.1:3001".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(identity_repo.clone(), mailer.clone(), identity_config.clone()),
        )
        .nest(
            "/api/users",
            users_router(identity_repo.clone(), mailer, identity_config),
        )
        .nest(
            "/api/machines",
            catalog_public_router(catalog_repo.clone(), object_store.clone()).merge(
                catalog_admin_router(catalog_repo.clone(), object_store)
                    .layer(auth_layer.clone()),
            ),
        )
        .nest(
            "/api/bookings",
            booking_router(booking_repo, catalog_repo).layer(auth_layer.clone()),
        )
        .nest(
            "/api/wallets",
            wallet_router(wallet_repo).layer(auth_layer.clone()),
        )
        .nest(
            "/api/contact-us",
            contact_public_router(contact_repo.clone())
                .merge(contact_admin_router(contact_repo).layer(auth_layer.clone())),
        )
        .nest(
            "/api/legal-documents",
            legal_public_router(legal_repo.clone())
                .merge(legal_admin_router(legal_repo).layer(auth_layer)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
