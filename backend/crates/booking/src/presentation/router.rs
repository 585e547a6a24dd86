//! Booking Router
//!
//! One router for both surfaces; the caller layers `require_auth` on top.
//! Admin routes re-check the role explicitly inside their handlers.

use axum::{
    Router,
    routing::{get, post, put},
};
use catalog::PgCatalogRepository;
use catalog::domain::repository::MachineRepository;
use std::sync::Arc;

use crate::domain::repository::{BookingRepository, MessageRepository};
use crate::infra::postgres::PgBookingRepository;
use crate::presentation::handlers::{self, BookingAppState};

/// Create the booking router with PostgreSQL repositories
pub fn booking_router(bookings: PgBookingRepository, machines: PgCatalogRepository) -> Router {
    booking_router_generic(bookings, machines)
}

/// Create a generic booking router for any repository implementations
pub fn booking_router_generic<B, M>(bookings: B, machines: M) -> Router
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let state = BookingAppState {
        bookings: Arc::new(bookings),
        machines: Arc::new(machines),
    };

    Router::new()
        // Requester surface
        .route("/", post(handlers::create_booking::<B, M>))
        .route("/my-bookings", get(handlers::my_bookings::<B, M>))
        .route("/my-bookings/{id}", get(handlers::my_booking::<B, M>))
        .route(
            "/my-bookings/{id}/mark-payment-sent",
            put(handlers::mark_payment_sent::<B, M>),
        )
        .route(
            "/my-bookings/{id}/cancel",
            put(handlers::cancel_booking::<B, M>),
        )
        .route(
            "/my-bookings/{id}/messages",
            post(handlers::send_message::<B, M>).get(handlers::get_messages::<B, M>),
        )
        .route(
            "/my-bookings/{id}/messages/mark-read",
            put(handlers::mark_messages_read::<B, M>),
        )
        .route("/unread-count", get(handlers::unread_count::<B, M>))
        // Admin surface (role checked in handlers)
        .route("/admin", get(handlers::admin_list::<B, M>))
        .route("/admin/statistics", get(handlers::admin_statistics::<B, M>))
        .route(
            "/admin/unread-count",
            get(handlers::admin_unread_count::<B, M>),
        )
        .route("/admin/{id}", get(handlers::admin_get_booking::<B, M>))
        .route(
            "/admin/{id}/send-payment-address",
            put(handlers::send_payment_address::<B, M>),
        )
        .route("/admin/{id}/approve", put(handlers::approve_booking::<B, M>))
        .route("/admin/{id}/reject", put(handlers::reject_booking::<B, M>))
        .route(
            "/admin/{id}/messages",
            post(handlers::admin_send_message::<B, M>).get(handlers::admin_get_messages::<B, M>),
        )
        .route(
            "/admin/{id}/messages/mark-read",
            put(handlers::admin_mark_messages_read::<B, M>),
        )
        .with_state(state)
}
