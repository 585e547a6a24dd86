//! Message Thread Use Case
//!
//! The thread has two partitions per booking (requester-authored and
//! reviewer-authored); each party marks the *other* partition read.

use std::sync::Arc;

use kernel::context::RequestUser;
use kernel::id::BookingId;

use crate::domain::entities::{BookingMessage, MessageType};
use crate::domain::repository::{BookingRepository, MessageRepository};
use crate::error::{BookingError, BookingResult};

/// Message thread use case
pub struct MessageThreadUseCase<R>
where
    R: BookingRepository + MessageRepository,
{
    repo: Arc<R>,
}

impl<R> MessageThreadUseCase<R>
where
    R: BookingRepository + MessageRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Reviewers see every thread; requesters only their own.
    async fn authorize(&self, booking_id: &BookingId, caller: &RequestUser) -> BookingResult<()> {
        let found = self
            .repo
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound)?;

        if !caller.role.is_admin() {
            found.booking.ensure_owned_by(&caller.user_id)?;
        }
        Ok(())
    }

    /// Append a message to the thread.
    pub async fn send(
        &self,
        booking_id: &BookingId,
        caller: &RequestUser,
        content: String,
        message_type: Option<MessageType>,
    ) -> BookingResult<BookingMessage> {
        self.authorize(booking_id, caller).await?;

        let message = BookingMessage::new(
            *booking_id,
            caller.user_id,
            content,
            message_type.unwrap_or_default(),
            caller.role.is_admin(),
        );
        self.repo.add_message(&message).await?;

        tracing::info!(
            booking_id = %booking_id,
            from_admin = message.is_from_admin,
            "Thread message sent"
        );
        Ok(message)
    }

    /// Thread entries ordered by creation time ascending.
    pub async fn list(
        &self,
        booking_id: &BookingId,
        caller: &RequestUser,
    ) -> BookingResult<Vec<BookingMessage>> {
        self.authorize(booking_id, caller).await?;
        self.repo.list_messages(booking_id).await
    }

    /// Mark the other party's messages in one thread read.
    pub async fn mark_read(
        &self,
        booking_id: &BookingId,
        caller: &RequestUser,
    ) -> BookingResult<u64> {
        self.authorize(booking_id, caller).await?;
        // A reviewer reads requester messages and vice versa
        self.repo
            .mark_read(booking_id, !caller.role.is_admin())
            .await
    }

    /// Unread count: reviewers count requester-authored messages across
    /// all bookings; requesters count reviewer-authored messages across
    /// their own bookings only.
    pub async fn unread_count(&self, caller: &RequestUser) -> BookingResult<i64> {
        if caller.role.is_admin() {
            self.repo.unread_count_for_admin().await
        } else {
            self.repo.unread_count_for_user(&caller.user_id).await
        }
    }
}
