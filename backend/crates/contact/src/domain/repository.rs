//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::ContactId;

use crate::domain::entities::{ContactStatus, ContactSubject, ContactSubmission};
use crate::error::ContactResult;

/// Inbox listing filters
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub status: Option<ContactStatus>,
    pub subject: Option<ContactSubject>,
    /// Substring match on first name
    pub search: Option<String>,
}

/// Inbox statistics, computed on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStatistics {
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

/// Contact repository trait
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn create(&self, submission: &ContactSubmission) -> ContactResult<()>;

    async fn find_by_id(&self, contact_id: &ContactId)
    -> ContactResult<Option<ContactSubmission>>;

    /// Filtered listing, newest first
    async fn list_paged(
        &self,
        filter: &ContactFilter,
        page: u32,
        limit: u32,
    ) -> ContactResult<(Vec<ContactSubmission>, u64)>;

    /// Latest N submissions
    async fn recent(&self, limit: u32) -> ContactResult<Vec<ContactSubmission>>;

    async fn update(&self, submission: &ContactSubmission) -> ContactResult<()>;

    async fn delete(&self, contact_id: &ContactId) -> ContactResult<()>;

    async fn statistics(&self) -> ContactResult<ContactStatistics>;
}
