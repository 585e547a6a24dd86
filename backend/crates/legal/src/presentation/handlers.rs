//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use kernel::context::RequestUser;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::DocumentId;
use kernel::response::ApiResponse;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::LegalService;
use crate::domain::entities::DocumentType;
use crate::domain::repository::LegalRepository;
use crate::error::LegalError;
use crate::presentation::dto::{
    CreateDocumentRequest, DocumentResponse, UpdateDocumentRequest,
};

/// Shared state for legal handlers
#[derive(Clone)]
pub struct LegalAppState<R>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

async fn public_document<R>(
    state: &LegalAppState<R>,
    doc_type: DocumentType,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    let service = LegalService::new(state.repo.clone());
    let document = service
        .find_by_type(doc_type)
        .await?
        .ok_or(LegalError::DocumentNotFound)?;

    Ok(Json(ApiResponse::ok(
        "Document retrieved successfully",
        DocumentResponse::from_entity(&document),
    )))
}

/// GET /api/legal-documents/public/privacy-policy
pub async fn get_privacy_policy<R>(
    State(state): State<LegalAppState<R>>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    public_document(&state, DocumentType::PrivacyPolicy).await
}

/// GET /api/legal-documents/public/terms-of-service
pub async fn get_terms_of_service<R>(
    State(state): State<LegalAppState<R>>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    public_document(&state, DocumentType::TermsOfService).await
}

/// POST /api/legal-documents (admin)
pub async fn create_document<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
    Json(req): Json<CreateDocumentRequest>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;
    req.validate()?;

    let service = LegalService::new(state.repo.clone());
    let document = service
        .create(req.doc_type, req.content, req.content_ar)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Legal document created successfully",
        DocumentResponse::from_entity(&document),
    )))
}

/// GET /api/legal-documents (admin)
pub async fn list_documents<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
) -> AppResult<Json<ApiResponse<Vec<DocumentResponse>>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = LegalService::new(state.repo.clone());
    let documents = service.list().await?;

    Ok(Json(ApiResponse::ok(
        "Legal documents retrieved successfully",
        documents.iter().map(DocumentResponse::from_entity).collect(),
    )))
}

/// GET /api/legal-documents/:id (admin)
pub async fn get_document<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = LegalService::new(state.repo.clone());
    let document = service.get(&DocumentId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok(
        "Legal document retrieved successfully",
        DocumentResponse::from_entity(&document),
    )))
}

/// PATCH /api/legal-documents/:id (admin)
pub async fn update_document<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = LegalService::new(state.repo.clone());
    let document = service
        .update(&DocumentId::from_uuid(id), req.content, req.content_ar)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Legal document updated successfully",
        DocumentResponse::from_entity(&document),
    )))
}

/// PATCH /api/legal-documents/type/:type (admin)
pub async fn update_document_by_type<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
    Path(doc_type): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> AppResult<Json<ApiResponse<DocumentResponse>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let doc_type = DocumentType::from_code(&doc_type).ok_or_else(|| {
        AppError::bad_request(format!("Unknown document type: {}", doc_type))
            .with_code("LEGAL_003")
    })?;

    let service = LegalService::new(state.repo.clone());
    let document = service
        .update_by_type(doc_type, req.content, req.content_ar)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Legal document updated successfully",
        DocumentResponse::from_entity(&document),
    )))
}

/// DELETE /api/legal-documents/:id (admin)
pub async fn delete_document<R>(
    State(state): State<LegalAppState<R>>,
    user: RequestUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: LegalRepository + Clone + Send + Sync + 'static,
{
    user.require_admin()?;

    let service = LegalService::new(state.repo.clone());
    service.remove(&DocumentId::from_uuid(id)).await?;

    Ok(Json(ApiResponse::ok_empty(
        "Legal document deleted successfully",
    )))
}
