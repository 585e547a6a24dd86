//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{ContactId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage status of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Closed => "closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(ContactStatus::New),
            "in_progress" => Some(ContactStatus::InProgress),
            "resolved" => Some(ContactStatus::Resolved),
            "closed" => Some(ContactStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Submission topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSubject {
    #[default]
    General,
    Booking,
    Complaint,
    Feedback,
    Partnership,
    Other,
}

impl ContactSubject {
    pub const fn code(&self) -> &'static str {
        match self {
            ContactSubject::General => "general",
            ContactSubject::Booking => "booking",
            ContactSubject::Complaint => "complaint",
            ContactSubject::Feedback => "feedback",
            ContactSubject::Partnership => "partnership",
            ContactSubject::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "general" => Some(ContactSubject::General),
            "booking" => Some(ContactSubject::Booking),
            "complaint" => Some(ContactSubject::Complaint),
            "feedback" => Some(ContactSubject::Feedback),
            "partnership" => Some(ContactSubject::Partnership),
            "other" => Some(ContactSubject::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// ContactSubmission entity - one contact-form entry.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub contact_id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
    pub status: ContactStatus,
    pub admin_notes: Option<String>,
    pub assigned_to_id: Option<UserId>,
    pub is_read: bool,
    /// Audit metadata captured at intake
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        subject: ContactSubject,
        message: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            contact_id: ContactId::new(),
            first_name,
            last_name,
            email,
            phone,
            subject,
            message,
            status: ContactStatus::New,
            admin_notes: None,
            assigned_to_id: None,
            is_read: false,
            ip_address,
            user_agent,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_read(&mut self, read: bool) {
        self.is_read = read;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_submission_defaults() {
        let submission = ContactSubmission::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            None,
            ContactSubject::General,
            "Hello".to_string(),
            Some("203.0.113.7".to_string()),
            None,
        );
        assert_eq!(submission.status, ContactStatus::New);
        assert!(!submission.is_read);
        assert!(submission.assigned_to_id.is_none());
    }

    #[test]
    fn test_status_and_subject_codes() {
        for status in [
            ContactStatus::New,
            ContactStatus::InProgress,
            ContactStatus::Resolved,
            ContactStatus::Closed,
        ] {
            assert_eq!(ContactStatus::from_code(status.code()), Some(status));
        }
        for subject in [
            ContactSubject::General,
            ContactSubject::Booking,
            ContactSubject::Complaint,
            ContactSubject::Feedback,
            ContactSubject::Partnership,
            ContactSubject::Other,
        ] {
            assert_eq!(ContactSubject::from_code(subject.code()), Some(subject));
        }
    }
}
