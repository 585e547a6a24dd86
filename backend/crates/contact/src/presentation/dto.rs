//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{ContactStatus, ContactSubject, ContactSubmission};
use crate::domain::repository::ContactStatistics;

/// Public contact-form request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: ContactSubject,
    pub message: String,
}

impl CreateSubmissionRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.first_name, "firstName")
            .require_non_empty(&self.last_name, "lastName")
            .require_email(&self.email, "email")
            .require_non_empty(&self.message, "message");
        v.finish()
    }
}

/// Admin triage update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionRequest {
    pub status: Option<ContactStatus>,
    pub admin_notes: Option<String>,
    pub assigned_to_id: Option<Uuid>,
}

/// Admin listing query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ContactStatus>,
    pub subject: Option<ContactSubject>,
    pub search: Option<String>,
}

/// Recent-list query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<u32>,
}

/// Submission representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
    pub status: ContactStatus,
    pub admin_notes: Option<String>,
    pub assigned_to_id: Option<Uuid>,
    pub is_read: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionResponse {
    pub fn from_entity(submission: &ContactSubmission) -> Self {
        Self {
            id: *submission.contact_id.as_uuid(),
            first_name: submission.first_name.clone(),
            last_name: submission.last_name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            subject: submission.subject,
            message: submission.message.clone(),
            status: submission.status,
            admin_notes: submission.admin_notes.clone(),
            assigned_to_id: submission.assigned_to_id.map(|id| *id.as_uuid()),
            is_read: submission.is_read,
            ip_address: submission.ip_address.clone(),
            user_agent: submission.user_agent.clone(),
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        }
    }
}

/// Statistics payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatisticsResponse {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
    pub unread: i64,
    pub today: i64,
    pub this_week: i64,
    pub this_month: i64,
}

impl ContactStatisticsResponse {
    pub fn from_stats(stats: &ContactStatistics) -> Self {
        Self {
            total: stats.total,
            new: stats.new,
            in_progress: stats.in_progress,
            resolved: stats.resolved,
            closed: stats.closed,
            unread: stats.unread,
            today: stats.today,
            this_week: stats.this_week,
            this_month: stats.this_month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let req = CreateSubmissionRequest {
            first_name: "".to_string(),
            last_name: "Doe".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            subject: ContactSubject::General,
            message: "".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(err.description().contains("firstName"));
        assert!(err.description().contains("email"));
        assert!(err.description().contains("message"));
    }

    #[test]
    fn test_subject_defaults_to_general() {
        let req: CreateSubmissionRequest = serde_json::from_str(
            r#"{"firstName":"A","lastName":"B","email":"a@b.co","message":"hi"}"#,
        )
        .unwrap();
        assert_eq!(req.subject, ContactSubject::General);
    }
}
