//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::HeaderMap;
use kernel::context::RequestUser;
use kernel::error::app_error::AppResult;
use kernel::id::{ContactId, UserId};
use kernel::response::{ApiResponse, Paged};
use platform::client::{extract_client_ip, extract_user_agent};
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{ContactService, CreateSubmissionInput, UpdateSubmissionInput};
use crate::domain::repository::{ContactFilter, ContactRepository};
use crate::presentation::dto::{
    AdminListQuery, ContactStatisticsResponse, CreateSubmissionRequest, RecentQuery,
    SubmissionResponse, UpdateSubmissionRequest,
};

/// Shared state for contact handlers
#[derive(Clone)]
pub struct ContactAppState<R>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/contact-us (public)
pub async fn create_submission<R>(
    State(state): State<ContactAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<CreateSubmissionRequest>,
) -> AppResult<Json<ApiResponse<SubmissionResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let ip_address = extract_client_ip(&headers, Some(addr.ip())).map(|ip| ip.to_string());
    let user_agent = extract_user_agent(&headers);

    let service = ContactService::new(state.repo.clone());
    let submission = service
        .create(CreateSubmissionInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            subject: req.subject,
            message: req.message,
            ip_address,
            user_agent,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Thank you for contacting us. We will get back to you soon.",
        SubmissionResponse::from_entity(&submission),
    )))
}

/// GET /api/contact-us/admin
pub async fn admin_list<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<ApiResponse<Paged<SubmissionResponse>>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let service = ContactService::new(state.repo.clone());
    let (items, total) = service
        .list(
            &ContactFilter {
                status: query.status,
                subject: query.subject,
                search: query.search,
            },
            page,
            limit,
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Contact submissions retrieved successfully",
        Paged::new(
            items.iter().map(SubmissionResponse::from_entity).collect(),
            total,
            page,
            limit,
        ),
    )))
}

/// GET /api/contact-us/admin/statistics
pub async fn admin_statistics<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<ContactStatisticsResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    let stats = service.statistics().await?;

    Ok(Json(ApiResponse::ok(
        "Statistics retrieved successfully",
        ContactStatisticsResponse::from_stats(&stats),
    )))
}

/// GET /api/contact-us/admin/recent
pub async fn admin_recent<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<ApiResponse<Vec<SubmissionResponse>>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let service = ContactService::new(state.repo.clone());
    let recent = service.recent(limit).await?;

    Ok(Json(ApiResponse::ok(
        "Recent submissions retrieved",
        recent.iter().map(SubmissionResponse::from_entity).collect(),
    )))
}

/// GET /api/contact-us/admin/:id
pub async fn admin_get<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubmissionResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    let submission = service.get(&ContactId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Contact submission retrieved successfully",
        SubmissionResponse::from_entity(&submission),
    )))
}

/// PUT /api/contact-us/admin/:id
pub async fn admin_update<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSubmissionRequest>,
) -> AppResult<Json<ApiResponse<SubmissionResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    let submission = service
        .update(
            &ContactId::from_uuid(id),
            UpdateSubmissionInput {
                status: req.status,
                admin_notes: req.admin_notes,
                assigned_to_id: req.assigned_to_id.map(UserId::from_uuid),
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Contact submission updated successfully",
        SubmissionResponse::from_entity(&submission),
    )))
}

/// PUT /api/contact-us/admin/:id/mark-read
pub async fn admin_mark_read<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubmissionResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    let submission = service.set_read(&ContactId::from_uuid(id), true).await?;

    Ok(Json(ApiResponse::ok(
        "Submission marked as read",
        SubmissionResponse::from_entity(&submission),
    )))
}

/// PUT /api/contact-us/admin/:id/mark-unread
pub async fn admin_mark_unread<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubmissionResponse>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    let submission = service.set_read(&ContactId::from_uuid(id), false).await?;

    Ok(Json(ApiResponse::ok(
        "Submission marked as unread",
        SubmissionResponse::from_entity(&submission),
    )))
}

/// DELETE /api/contact-us/admin/:id
pub async fn admin_delete<R>(
    State(state): State<ContactAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = ContactService::new(state.repo.clone());
    service.remove(&ContactId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok_empty(
        "Contact submission deleted successfully",
    )))
}
