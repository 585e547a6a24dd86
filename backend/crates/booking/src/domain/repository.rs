//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Multi-step transition writes (status + messages, and for
//! approval also the inventory clamp) are single repository operations so
//! the implementation can run them in one transaction.

use kernel::id::{BookingId, UserId};

use crate::domain::entities::{Booking, BookingMessage, BookingStatus};
use crate::error::BookingResult;

/// A booking joined with its machine's display name.
#[derive(Debug, Clone)]
pub struct BookingWithMachine {
    pub booking: Booking,
    pub machine_name: String,
}

/// On-demand aggregate counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStatistics {
    pub total: i64,
    pub pending: i64,
    pub awaiting_payment: i64,
    pub payment_sent: i64,
    pub approved: i64,
    pub rejected: i64,
    pub cancelled: i64,
}

/// Booking repository trait
#[trait_variant::make(BookingRepository: Send)]
pub trait LocalBookingRepository {
    /// Insert a booking together with its opening system message (one tx)
    async fn create(
        &self,
        booking: &Booking,
        opening_message: &BookingMessage,
    ) -> BookingResult<()>;

    async fn find_by_id(&self, booking_id: &BookingId) -> BookingResult<Option<BookingWithMachine>>;

    /// All bookings of one requester, newest first
    async fn list_for_user(&self, user_id: &UserId) -> BookingResult<Vec<BookingWithMachine>>;

    /// Admin listing, newest first, optional status filter
    async fn list_paged(
        &self,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> BookingResult<(Vec<BookingWithMachine>, u64)>;

    /// Persist a transition: booking fields + appended messages (one tx)
    async fn update_with_messages(
        &self,
        booking: &Booking,
        messages: &[BookingMessage],
    ) -> BookingResult<()>;

    /// Persist an approval: clamped inventory increment on the machine,
    /// booking fields, and the system message (one tx)
    async fn commit_approval(
        &self,
        booking: &Booking,
        message: &BookingMessage,
    ) -> BookingResult<()>;

    /// Aggregate counts by status, computed on demand
    async fn count_by_status(&self) -> BookingResult<BookingStatistics>;
}

/// Message thread repository trait
#[trait_variant::make(MessageRepository: Send)]
pub trait LocalMessageRepository {
    async fn add_message(&self, message: &BookingMessage) -> BookingResult<()>;

    /// Thread entries ordered by creation time ascending
    async fn list_messages(&self, booking_id: &BookingId) -> BookingResult<Vec<BookingMessage>>;

    /// Mark one partition of a thread read; returns affected rows
    async fn mark_read(&self, booking_id: &BookingId, from_admin: bool) -> BookingResult<u64>;

    /// Unread requester-authored messages across ALL bookings
    async fn unread_count_for_admin(&self) -> BookingResult<i64>;

    /// Unread reviewer-authored messages across one requester's bookings
    async fn unread_count_for_user(&self, user_id: &UserId) -> BookingResult<i64>;
}
