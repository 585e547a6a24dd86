//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::DocumentId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{DocumentType, LegalDocument};
use crate::domain::repository::LegalRepository;
use crate::error::{LegalError, LegalResult};

const DOCUMENT_COLUMNS: &str = r#"
    document_id,
    doc_type,
    content,
    content_ar,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed legal document repository
#[derive(Clone)]
pub struct PgLegalRepository {
    pool: PgPool,
}

impl PgLegalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LegalRepository for PgLegalRepository {
    async fn create(&self, document: &LegalDocument) -> LegalResult<()> {
        sqlx::query(
            r#"
            INSERT INTO legal_documents (
                document_id,
                doc_type,
                content,
                content_ar,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.document_id.as_uuid())
        .bind(document.doc_type.code())
        .bind(&document.content)
        .bind(&document.content_ar)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, document_id: &DocumentId) -> LegalResult<Option<LegalDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM legal_documents WHERE document_id = $1"
        ))
        .bind(document_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_document()).transpose()
    }

    async fn find_by_type(&self, doc_type: DocumentType) -> LegalResult<Option<LegalDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM legal_documents WHERE doc_type = $1"
        ))
        .bind(doc_type.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_document()).transpose()
    }

    async fn list(&self) -> LegalResult<Vec<LegalDocument>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM legal_documents ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_document()).collect()
    }

    async fn update(&self, document: &LegalDocument) -> LegalResult<()> {
        sqlx::query(
            r#"
            UPDATE legal_documents SET
                content = $2,
                content_ar = $3,
                updated_at = $4
            WHERE document_id = $1
            "#,
        )
        .bind(document.document_id.as_uuid())
        .bind(&document.content)
        .bind(&document.content_ar)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, document_id: &DocumentId) -> LegalResult<()> {
        sqlx::query("DELETE FROM legal_documents WHERE document_id = $1")
            .bind(document_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct DocumentRow {
    document_id: Uuid,
    doc_type: String,
    content: String,
    content_ar: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self) -> LegalResult<LegalDocument> {
        let doc_type = DocumentType::from_code(&self.doc_type)
            .ok_or_else(|| LegalError::Internal(format!("Invalid document type: {}", self.doc_type)))?;

        Ok(LegalDocument {
            document_id: DocumentId::from_uuid(self.document_id),
            doc_type,
            content: self.content,
            content_ar: self.content_ar,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
