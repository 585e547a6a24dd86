//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use kernel::context::RequestUser;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::MachineId;
use kernel::response::ApiResponse;
use platform::storage::ObjectStore;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::service::{CatalogService, CreateMachineInput, UpdateMachineInput};
use crate::domain::repository::{MachineFilter, MachineRepository};
use crate::presentation::dto::{
    CreateMachineRequest, ListMachinesQuery, MachineResponse, SetStatusRequest,
    UpdateMachineRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R, S>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<S>,
}

// ============================================================================
// Public endpoints
// ============================================================================

/// GET /api/machines/public
pub async fn public_machines<R, S>(
    State(state): State<CatalogAppState<R, S>>,
) -> AppResult<Json<ApiResponse<Vec<MachineResponse>>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let service = CatalogService::new(state.repo.clone());
    let machines = service.public_machines().await?;

    Ok(Json(ApiResponse::ok(
        "Machines retrieved successfully",
        machines.iter().map(MachineResponse::from_entity).collect(),
    )))
}

/// GET /api/machines/featured
pub async fn featured_machines<R, S>(
    State(state): State<CatalogAppState<R, S>>,
) -> AppResult<Json<ApiResponse<Vec<MachineResponse>>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let service = CatalogService::new(state.repo.clone());
    let machines = service.featured_machines().await?;

    Ok(Json(ApiResponse::ok(
        "Featured machines retrieved successfully",
        machines.iter().map(MachineResponse::from_entity).collect(),
    )))
}

/// GET /api/machines/public/:id
pub async fn public_machine<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let service = CatalogService::new(state.repo.clone());
    let machine = service.get(&MachineId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Machine retrieved successfully",
        MachineResponse::from_entity(&machine),
    )))
}

// ============================================================================
// Admin endpoints
// ============================================================================

/// POST /api/machines (admin)
pub async fn create_machine<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Json(req): Json<CreateMachineRequest>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;
    req.validate()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service
        .create(CreateMachineInput {
            name: req.name,
            description: req.description,
            machine_type: req.machine_type,
            manufacturer: req.manufacturer,
            model: req.model,
            hash_rate: req.hash_rate,
            hash_rate_unit: req.hash_rate_unit,
            power_consumption: req.power_consumption,
            algorithm: req.algorithm,
            mining_coin: req.mining_coin,
            efficiency: req.efficiency,
            price_per_hour: req.price_per_hour,
            price_per_day: req.price_per_day,
            price_per_week: req.price_per_week,
            price_per_month: req.price_per_month,
            profit_per_hour: req.profit_per_hour,
            profit_per_day: req.profit_per_day,
            profit_per_week: req.profit_per_week,
            profit_per_month: req.profit_per_month,
            total_units: req.total_units,
            sort_order: req.sort_order,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machine created successfully",
        MachineResponse::from_entity(&machine),
    )))
}

/// GET /api/machines (admin)
pub async fn list_machines<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Query(query): Query<ListMachinesQuery>,
) -> AppResult<Json<ApiResponse<Vec<MachineResponse>>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machines = service
        .list(&MachineFilter {
            is_active: query.is_active,
            is_featured: query.is_featured,
            machine_type: query.machine_type,
            status: query.status,
        })
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machines retrieved successfully",
        machines.iter().map(MachineResponse::from_entity).collect(),
    )))
}

/// GET /api/machines/:id (admin)
pub async fn get_machine<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service.get(&MachineId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Machine retrieved successfully",
        MachineResponse::from_entity(&machine),
    )))
}

/// PATCH /api/machines/:id (admin)
pub async fn update_machine<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMachineRequest>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service
        .update(
            &MachineId::from_uuid(id),
            UpdateMachineInput {
                name: req.name,
                description: req.description,
                machine_type: req.machine_type,
                manufacturer: req.manufacturer,
                model: req.model,
                hash_rate: req.hash_rate,
                hash_rate_unit: req.hash_rate_unit,
                power_consumption: req.power_consumption,
                algorithm: req.algorithm,
                mining_coin: req.mining_coin,
                efficiency: req.efficiency,
                price_per_hour: req.price_per_hour,
                price_per_day: req.price_per_day,
                price_per_week: req.price_per_week,
                price_per_month: req.price_per_month,
                profit_per_hour: req.profit_per_hour,
                profit_per_day: req.profit_per_day,
                profit_per_week: req.profit_per_week,
                profit_per_month: req.profit_per_month,
                total_units: req.total_units,
                sort_order: req.sort_order,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machine updated successfully",
        MachineResponse::from_entity(&machine),
    )))
}

/// DELETE /api/machines/:id (admin)
pub async fn delete_machine<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    service.remove(&MachineId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok_empty("Machine deleted successfully")))
}

/// PATCH /api/machines/:id/toggle-active (admin)
pub async fn toggle_active<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service.toggle_active(&MachineId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Machine active flag toggled",
        MachineResponse::from_entity(&machine),
    )))
}

/// PATCH /api/machines/:id/toggle-featured (admin)
pub async fn toggle_featured<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service.toggle_featured(&MachineId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Machine featured flag toggled",
        MachineResponse::from_entity(&machine),
    )))
}

/// PATCH /api/machines/:id/status (admin)
pub async fn set_status<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service
        .set_status(&MachineId::from_uuid(id), req.status)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machine status updated",
        MachineResponse::from_entity(&machine),
    )))
}

/// PUT /api/machines/:id/image (admin) - raw image body
pub async fn upload_image<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::bad_request("Missing Content-Type header").with_code("FILE_001")
        })?
        .to_string();

    let service = CatalogService::new(state.repo.clone());
    let machine = service
        .set_image(
            state.store.as_ref(),
            &MachineId::from_uuid(id),
            &content_type,
            body.to_vec(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machine image uploaded",
        MachineResponse::from_entity(&machine),
    )))
}

/// DELETE /api/machines/:id/image (admin)
pub async fn delete_image<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MachineResponse>>>
where
    R: MachineRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = CatalogService::new(state.repo.clone());
    let machine = service
        .remove_image(state.store.as_ref(), &MachineId::from_uuid(id))
        .await?;

    Ok(Json(ApiResponse::ok(
        "Machine image removed",
        MachineResponse::from_entity(&machine),
    )))
}
