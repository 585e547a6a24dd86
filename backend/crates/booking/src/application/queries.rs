//! Booking Query Use Case
//!
//! Read-only surface: requester-scoped reads, the admin listing, and the
//! on-demand statistics.

use std::sync::Arc;

use kernel::context::RequestUser;
use kernel::id::{BookingId, UserId};

use crate::domain::entities::BookingStatus;
use crate::domain::repository::{
    BookingRepository, BookingStatistics, BookingWithMachine,
};
use crate::error::{BookingError, BookingResult};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Booking query use case
pub struct BookingQueryUseCase<B>
where
    B: BookingRepository,
{
    bookings: Arc<B>,
}

impl<B> BookingQueryUseCase<B>
where
    B: BookingRepository,
{
    pub fn new(bookings: Arc<B>) -> Self {
        Self { bookings }
    }

    /// All bookings of the caller, newest first.
    pub async fn my_bookings(&self, user_id: &UserId) -> BookingResult<Vec<BookingWithMachine>> {
        self.bookings.list_for_user(user_id).await
    }

    /// One booking; reviewers see all, requesters only their own.
    pub async fn get(
        &self,
        booking_id: &BookingId,
        caller: &RequestUser,
    ) -> BookingResult<BookingWithMachine> {
        let found = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound)?;

        if !caller.role.is_admin() {
            found.booking.ensure_owned_by(&caller.user_id)?;
        }
        Ok(found)
    }

    /// Admin listing, newest first, optional status filter.
    pub async fn admin_list(
        &self,
        status: Option<BookingStatus>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> BookingResult<(Vec<BookingWithMachine>, u64, u32, u32)> {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);

        let (items, total) = self.bookings.list_paged(status, page, limit).await?;
        Ok((items, total, page, limit))
    }

    /// On-demand counts by status.
    pub async fn statistics(&self) -> BookingResult<BookingStatistics> {
        self.bookings.count_by_status().await
    }
}
