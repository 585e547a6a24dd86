//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::DocumentId;

use crate::domain::entities::{DocumentType, LegalDocument};
use crate::error::LegalResult;

/// Legal document repository trait
#[trait_variant::make(LegalRepository: Send)]
pub trait LocalLegalRepository {
    async fn create(&self, document: &LegalDocument) -> LegalResult<()>;

    async fn find_by_id(&self, document_id: &DocumentId) -> LegalResult<Option<LegalDocument>>;

    async fn find_by_type(&self, doc_type: DocumentType) -> LegalResult<Option<LegalDocument>>;

    /// All documents, newest first
    async fn list(&self) -> LegalResult<Vec<LegalDocument>>;

    async fn update(&self, document: &LegalDocument) -> LegalResult<()>;

    async fn delete(&self, document_id: &DocumentId) -> LegalResult<()>;
}
