//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Legal document type; unique per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    PrivacyPolicy,
    TermsOfService,
}

impl DocumentType {
    pub const fn code(&self) -> &'static str {
        match self {
            DocumentType::PrivacyPolicy => "privacy_policy",
            DocumentType::TermsOfService => "terms_of_service",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "privacy_policy" => Some(DocumentType::PrivacyPolicy),
            "terms_of_service" => Some(DocumentType::TermsOfService),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// LegalDocument entity
#[derive(Debug, Clone)]
pub struct LegalDocument {
    pub document_id: DocumentId,
    pub doc_type: DocumentType,
    pub content: String,
    /// Arabic localization of the content
    pub content_ar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LegalDocument {
    pub fn new(doc_type: DocumentType, content: String, content_ar: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            document_id: DocumentId::new(),
            doc_type,
            content,
            content_ar,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_content(&mut self, content: Option<String>, content_ar: Option<String>) {
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(content_ar) = content_ar {
            self.content_ar = Some(content_ar);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_roundtrip() {
        assert_eq!(
            DocumentType::from_code("privacy_policy"),
            Some(DocumentType::PrivacyPolicy)
        );
        assert_eq!(
            DocumentType::from_code("terms_of_service"),
            Some(DocumentType::TermsOfService)
        );
        assert_eq!(DocumentType::from_code("eula"), None);
    }

    #[test]
    fn test_set_content_partial_update() {
        let mut doc = LegalDocument::new(DocumentType::PrivacyPolicy, "v1".to_string(), None);
        doc.set_content(None, Some("نسخة".to_string()));
        assert_eq!(doc.content, "v1");
        assert!(doc.content_ar.is_some());

        doc.set_content(Some("v2".to_string()), None);
        assert_eq!(doc.content, "v2");
    }
}
