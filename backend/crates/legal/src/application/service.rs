//! Legal Document Service

use std::sync::Arc;

use kernel::id::DocumentId;

use crate::domain::entities::{DocumentType, LegalDocument};
use crate::domain::repository::LegalRepository;
use crate::error::{LegalError, LegalResult};

/// Legal document service
pub struct LegalService<R>
where
    R: LegalRepository,
{
    repo: Arc<R>,
}

impl<R> LegalService<R>
where
    R: LegalRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a document; each type may exist at most once.
    pub async fn create(
        &self,
        doc_type: DocumentType,
        content: String,
        content_ar: Option<String>,
    ) -> LegalResult<LegalDocument> {
        if self.repo.find_by_type(doc_type).await?.is_some() {
            return Err(LegalError::TypeExists(doc_type));
        }

        let document = LegalDocument::new(doc_type, content, content_ar);
        self.repo.create(&document).await?;

        tracing::info!(document_id = %document.document_id, doc_type = %doc_type, "Legal document created");
        Ok(document)
    }

    pub async fn list(&self) -> LegalResult<Vec<LegalDocument>> {
        self.repo.list().await
    }

    pub async fn get(&self, document_id: &DocumentId) -> LegalResult<LegalDocument> {
        self.repo
            .find_by_id(document_id)
            .await?
            .ok_or(LegalError::DocumentNotFound)
    }

    pub async fn find_by_type(&self, doc_type: DocumentType) -> LegalResult<Option<LegalDocument>> {
        self.repo.find_by_type(doc_type).await
    }

    pub async fn update(
        &self,
        document_id: &DocumentId,
        content: Option<String>,
        content_ar: Option<String>,
    ) -> LegalResult<LegalDocument> {
        let mut document = self.get(document_id).await?;
        document.set_content(content, content_ar);
        self.repo.update(&document).await?;
        Ok(document)
    }

    pub async fn update_by_type(
        &self,
        doc_type: DocumentType,
        content: Option<String>,
        content_ar: Option<String>,
    ) -> LegalResult<LegalDocument> {
        let mut document = self
            .repo
            .find_by_type(doc_type)
            .await?
            .ok_or(LegalError::DocumentNotFound)?;

        document.set_content(content, content_ar);
        self.repo.update(&document).await?;
        Ok(document)
    }

    pub async fn remove(&self, document_id: &DocumentId) -> LegalResult<()> {
        self.get(document_id).await?;
        self.repo.delete(document_id).await?;

        tracing::info!(document_id = %document_id, "Legal document deleted");
        Ok(())
    }
}
