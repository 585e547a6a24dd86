//! HTTP Handlers
//!
//! Requester routes are scoped to the caller's own bookings; admin routes
//! check the role explicitly before touching the engine.

use axum::Json;
use axum::extract::{Path, Query, State};
use catalog::domain::repository::MachineRepository;
use kernel::context::RequestUser;
use kernel::error::app_error::AppResult;
use kernel::id::{BookingId, MachineId};
use kernel::response::{ApiResponse, Paged};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    BookingQueryUseCase, BookingTransitionUseCase, CreateBookingInput, CreateBookingUseCase,
    MessageThreadUseCase,
};
use crate::domain::repository::{BookingRepository, MessageRepository};
use crate::presentation::dto::{
    AdminListQuery, BookingResponse, CreateBookingRequest, CreateMessageRequest,
    MarkPaymentSentRequest, MessageResponse, ReviewRequest, SendPaymentAddressRequest,
    StatisticsResponse, UnreadCountResponse,
};

/// Shared state for booking handlers
#[derive(Clone)]
pub struct BookingAppState<B, M>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    pub bookings: Arc<B>,
    pub machines: Arc<M>,
}

// ============================================================================
// Requester endpoints
// ============================================================================

/// POST /api/bookings
pub async fn create_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = CreateBookingUseCase::new(state.bookings.clone(), state.machines.clone());
    let created = use_case
        .execute(
            user.user_id,
            CreateBookingInput {
                machine_id: MachineId::from_uuid(req.machine_id),
                rental_duration: req.rental_duration,
                quantity: req.quantity,
                user_notes: req.user_notes,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking request created successfully. Please wait for admin to provide payment details.",
        BookingResponse::from_entity(&created),
    )))
}

/// GET /api/bookings/my-bookings
pub async fn my_bookings<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<Vec<BookingResponse>>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let use_case = BookingQueryUseCase::new(state.bookings.clone());
    let bookings = use_case.my_bookings(&user.user_id).await?;

    Ok(Json(ApiResponse::ok(
        "Bookings retrieved successfully",
        bookings.iter().map(BookingResponse::from_entity).collect(),
    )))
}

/// GET /api/bookings/my-bookings/:id
pub async fn my_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let booking_id = BookingId::from_uuid(id);
    let queries = BookingQueryUseCase::new(state.bookings.clone());
    let found = queries.get(&booking_id, &user).await?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let messages = thread.list(&booking_id, &user).await?;

    Ok(Json(ApiResponse::ok(
        "Booking retrieved successfully",
        BookingResponse::from_entity(&found).with_messages(&messages),
    )))
}

/// PUT /api/bookings/my-bookings/:id/mark-payment-sent
pub async fn mark_payment_sent<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MarkPaymentSentRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let use_case = BookingTransitionUseCase::new(state.bookings.clone());
    let updated = use_case
        .mark_payment_sent(&BookingId::from_uuid(id), user.user_id, req.transaction_hash)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Payment marked as sent. Admin will review and approve.",
        BookingResponse::from_entity(&updated),
    )))
}

/// PUT /api/bookings/my-bookings/:id/cancel
pub async fn cancel_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let use_case = BookingTransitionUseCase::new(state.bookings.clone());
    let updated = use_case
        .cancel(&BookingId::from_uuid(id), user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking cancelled successfully",
        BookingResponse::from_entity(&updated),
    )))
}

/// POST /api/bookings/my-bookings/:id/messages
pub async fn send_message<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateMessageRequest>,
) -> AppResult<Json<ApiResponse<MessageResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let message = thread
        .send(&BookingId::from_uuid(id), &user, req.content, req.message_type)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Message sent successfully",
        MessageResponse::from_entity(&message),
    )))
}

/// GET /api/bookings/my-bookings/:id/messages
pub async fn get_messages<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<MessageResponse>>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let messages = thread.list(&BookingId::from_uuid(id), &user).await?;

    Ok(Json(ApiResponse::ok(
        "Messages retrieved successfully",
        messages.iter().map(MessageResponse::from_entity).collect(),
    )))
}

/// PUT /api/bookings/my-bookings/:id/messages/mark-read
pub async fn mark_messages_read<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let thread = MessageThreadUseCase::new(state.bookings.clone());
    thread.mark_read(&BookingId::from_uuid(id), &user).await?;

    Ok(Json(ApiResponse::ok_empty("Messages marked as read")))
}

/// GET /api/bookings/unread-count
pub async fn unread_count<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<UnreadCountResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    let thread = MessageThreadUseCase::new(state.bookings.clone());
    // Requester semantics regardless of role on this route
    let count = thread
        .unread_count(&RequestUser {
            role: kernel::context::Role::User,
            ..user.clone()
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Unread count retrieved",
        UnreadCountResponse { count },
    )))
}

// ============================================================================
// Admin endpoints
// ============================================================================

/// GET /api/bookings/admin
pub async fn admin_list<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<ApiResponse<Paged<BookingResponse>>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = BookingQueryUseCase::new(state.bookings.clone());
    let (items, total, page, limit) = use_case
        .admin_list(query.status, query.page, query.limit)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Bookings retrieved successfully",
        Paged::new(
            items.iter().map(BookingResponse::from_entity).collect(),
            total,
            page,
            limit,
        ),
    )))
}

/// GET /api/bookings/admin/statistics
pub async fn admin_statistics<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<StatisticsResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = BookingQueryUseCase::new(state.bookings.clone());
    let stats = use_case.statistics().await?;

    Ok(Json(ApiResponse::ok(
        "Statistics retrieved successfully",
        StatisticsResponse::from_stats(&stats),
    )))
}

/// GET /api/bookings/admin/unread-count
pub async fn admin_unread_count<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<UnreadCountResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let count = thread.unread_count(&user).await?;

    Ok(Json(ApiResponse::ok(
        "Unread count retrieved",
        UnreadCountResponse { count },
    )))
}

/// GET /api/bookings/admin/:id
pub async fn admin_get_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let booking_id = BookingId::from_uuid(id);
    let queries = BookingQueryUseCase::new(state.bookings.clone());
    let found = queries.get(&booking_id, &user).await?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let messages = thread.list(&booking_id, &user).await?;

    Ok(Json(ApiResponse::ok(
        "Booking retrieved successfully",
        BookingResponse::from_entity(&found).with_messages(&messages),
    )))
}

/// PUT /api/bookings/admin/:id/send-payment-address
pub async fn send_payment_address<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SendPaymentAddressRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;
    req.validate()?;

    let use_case = BookingTransitionUseCase::new(state.bookings.clone());
    let updated = use_case
        .send_payment_address(&BookingId::from_uuid(id), user.user_id, req.payment_address)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Payment address sent successfully",
        BookingResponse::from_entity(&updated),
    )))
}

/// PUT /api/bookings/admin/:id/approve
pub async fn approve_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = BookingTransitionUseCase::new(state.bookings.clone());
    let updated = use_case
        .approve(&BookingId::from_uuid(id), user.user_id, req.admin_notes)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking approved successfully",
        BookingResponse::from_entity(&updated),
    )))
}

/// PUT /api/bookings/admin/:id/reject
pub async fn reject_booking<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<BookingResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let use_case = BookingTransitionUseCase::new(state.bookings.clone());
    let updated = use_case
        .reject(&BookingId::from_uuid(id), user.user_id, req.admin_notes)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking rejected",
        BookingResponse::from_entity(&updated),
    )))
}

/// POST /api/bookings/admin/:id/messages
pub async fn admin_send_message<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateMessageRequest>,
) -> AppResult<Json<ApiResponse<MessageResponse>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;
    req.validate()?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let message = thread
        .send(&BookingId::from_uuid(id), &user, req.content, req.message_type)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Message sent successfully",
        MessageResponse::from_entity(&message),
    )))
}

/// GET /api/bookings/admin/:id/messages
pub async fn admin_get_messages<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<MessageResponse>>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    let messages = thread.list(&BookingId::from_uuid(id), &user).await?;

    Ok(Json(ApiResponse::ok(
        "Messages retrieved successfully",
        messages.iter().map(MessageResponse::from_entity).collect(),
    )))
}

/// PUT /api/bookings/admin/:id/messages/mark-read
pub async fn admin_mark_messages_read<B, M>(
    State(state): State<BookingAppState<B, M>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    B: BookingRepository + MessageRepository + Clone + Send + Sync + 'static,
    M: MachineRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let thread = MessageThreadUseCase::new(state.bookings.clone());
    thread.mark_read(&BookingId::from_uuid(id), &user).await?;

    Ok(Json(ApiResponse::ok_empty("Messages marked as read")))
}
