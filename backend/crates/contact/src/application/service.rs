//! Contact Service

use std::sync::Arc;

use kernel::id::{ContactId, UserId};

use crate::domain::entities::{ContactStatus, ContactSubject, ContactSubmission};
use crate::domain::repository::{ContactFilter, ContactRepository, ContactStatistics};
use crate::error::{ContactError, ContactResult};

/// Input for public submission intake
pub struct CreateSubmissionInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Input for admin triage updates; `None` leaves a field untouched.
#[derive(Default)]
pub struct UpdateSubmissionInput {
    pub status: Option<ContactStatus>,
    pub admin_notes: Option<String>,
    pub assigned_to_id: Option<UserId>,
}

/// Contact service
pub struct ContactService<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> ContactService<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateSubmissionInput) -> ContactResult<ContactSubmission> {
        let submission = ContactSubmission::new(
            input.first_name,
            input.last_name,
            input.email,
            input.phone,
            input.subject,
            input.message,
            input.ip_address,
            input.user_agent,
        );

        self.repo.create(&submission).await?;

        tracing::info!(
            contact_id = %submission.contact_id,
            subject = %submission.subject,
            "Contact submission received"
        );
        Ok(submission)
    }

    pub async fn list(
        &self,
        filter: &ContactFilter,
        page: u32,
        limit: u32,
    ) -> ContactResult<(Vec<ContactSubmission>, u64)> {
        self.repo.list_paged(filter, page, limit).await
    }

    pub async fn get(&self, contact_id: &ContactId) -> ContactResult<ContactSubmission> {
        self.repo
            .find_by_id(contact_id)
            .await?
            .ok_or(ContactError::SubmissionNotFound)
    }

    pub async fn update(
        &self,
        contact_id: &ContactId,
        input: UpdateSubmissionInput,
    ) -> ContactResult<ContactSubmission> {
        let mut submission = self.get(contact_id).await?;

        if let Some(status) = input.status {
            submission.status = status;
        }
        if let Some(admin_notes) = input.admin_notes {
            submission.admin_notes = Some(admin_notes);
        }
        if let Some(assigned_to) = input.assigned_to_id {
            submission.assigned_to_id = Some(assigned_to);
        }
        submission.updated_at = chrono::Utc::now();

        self.repo.update(&submission).await?;
        Ok(submission)
    }

    pub async fn set_read(
        &self,
        contact_id: &ContactId,
        read: bool,
    ) -> ContactResult<ContactSubmission> {
        let mut submission = self.get(contact_id).await?;
        submission.set_read(read);
        self.repo.update(&submission).await?;
        Ok(submission)
    }

    pub async fn remove(&self, contact_id: &ContactId) -> ContactResult<()> {
        self.get(contact_id).await?;
        self.repo.delete(contact_id).await?;

        tracing::info!(contact_id = %contact_id, "Contact submission deleted");
        Ok(())
    }

    pub async fn statistics(&self) -> ContactResult<ContactStatistics> {
        self.repo.statistics().await
    }

    pub async fn recent(&self, limit: u32) -> ContactResult<Vec<ContactSubmission>> {
        self.repo.recent(limit).await
    }
}
