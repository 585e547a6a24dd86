//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{DocumentType, LegalDocument};

/// Create-document request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub content: String,
    pub content_ar: Option<String>,
}

impl CreateDocumentRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.content, "content");
        v.finish()
    }
}

/// Update-document request; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub content: Option<String>,
    pub content_ar: Option<String>,
}

/// Document representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub content: String,
    pub content_ar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentResponse {
    pub fn from_entity(document: &LegalDocument) -> Self {
        Self {
            id: *document.document_id.as_uuid(),
            doc_type: document.doc_type,
            content: document.content.clone(),
            content_ar: document.content_ar.clone(),
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let req: CreateDocumentRequest = serde_json::from_str(
            r#"{"type":"privacy_policy","content":"We collect nothing."}"#,
        )
        .unwrap();
        assert_eq!(req.doc_type, DocumentType::PrivacyPolicy);
        assert!(req.validate().is_ok());

        let empty: CreateDocumentRequest =
            serde_json::from_str(r#"{"type":"terms_of_service","content":"  "}"#).unwrap();
        assert!(empty.validate().is_err());
    }
}
