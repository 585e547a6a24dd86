//! Booking Transition Use Case
//!
//! Drives the status state machine. Every successful transition persists
//! the booking update together with its system message(s) in one
//! transaction; approval additionally commits the clamped inventory
//! increment on the machine in the same transaction.

use std::sync::Arc;

use kernel::id::{BookingId, UserId};

use crate::domain::entities::{BookingMessage, MessageType};
use crate::domain::repository::{BookingRepository, BookingWithMachine};
use crate::error::{BookingError, BookingResult};

/// Booking transition use case
pub struct BookingTransitionUseCase<B>
where
    B: BookingRepository,
{
    bookings: Arc<B>,
}

impl<B> BookingTransitionUseCase<B>
where
    B: BookingRepository,
{
    pub fn new(bookings: Arc<B>) -> Self {
        Self { bookings }
    }

    async fn load(&self, booking_id: &BookingId) -> BookingResult<BookingWithMachine> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound)
    }

    /// Reviewer: PENDING -> AWAITING_PAYMENT.
    ///
    /// Appends the payment-address message plus the narrating system
    /// message, as one transaction with the status change.
    pub async fn send_payment_address(
        &self,
        booking_id: &BookingId,
        admin_id: UserId,
        payment_address: String,
    ) -> BookingResult<BookingWithMachine> {
        let mut found = self.load(booking_id).await?;

        found.booking.send_payment_address(payment_address.clone())?;

        let address_message = BookingMessage::new(
            found.booking.booking_id,
            admin_id,
            payment_address,
            MessageType::PaymentAddress,
            true,
        );
        let system_message = BookingMessage::system(
            found.booking.booking_id,
            admin_id,
            "Payment address has been provided. Please send the payment and mark it as sent."
                .to_string(),
        );

        self.bookings
            .update_with_messages(&found.booking, &[address_message, system_message])
            .await?;

        tracing::info!(booking_id = %booking_id, "Payment address sent");
        Ok(found)
    }

    /// Requester: AWAITING_PAYMENT -> PAYMENT_SENT.
    pub async fn mark_payment_sent(
        &self,
        booking_id: &BookingId,
        user_id: UserId,
        transaction_hash: Option<String>,
    ) -> BookingResult<BookingWithMachine> {
        let mut found = self.load(booking_id).await?;
        found.booking.ensure_owned_by(&user_id)?;

        found
            .booking
            .mark_payment_sent(transaction_hash.clone())?;

        let content = match &transaction_hash {
            Some(hash) => format!(
                "User has marked payment as sent. Transaction hash: {}",
                hash
            ),
            None => "User has marked payment as sent.".to_string(),
        };
        let system_message = BookingMessage::system(found.booking.booking_id, user_id, content);

        self.bookings
            .update_with_messages(&found.booking, &[system_message])
            .await?;

        tracing::info!(booking_id = %booking_id, "Payment marked as sent");
        Ok(found)
    }

    /// Reviewer: PAYMENT_SENT -> APPROVED, committing inventory.
    pub async fn approve(
        &self,
        booking_id: &BookingId,
        admin_id: UserId,
        admin_notes: Option<String>,
    ) -> BookingResult<BookingWithMachine> {
        let mut found = self.load(booking_id).await?;

        found.booking.approve(admin_id, admin_notes)?;

        let system_message = BookingMessage::system(
            found.booking.booking_id,
            admin_id,
            "Booking has been approved! Your mining rental is now active.".to_string(),
        );

        self.bookings
            .commit_approval(&found.booking, &system_message)
            .await?;

        tracing::info!(
            booking_id = %booking_id,
            quantity = found.booking.quantity,
            "Booking approved, inventory committed"
        );
        Ok(found)
    }

    /// Reviewer: any non-processed state -> REJECTED.
    pub async fn reject(
        &self,
        booking_id: &BookingId,
        admin_id: UserId,
        admin_notes: Option<String>,
    ) -> BookingResult<BookingWithMachine> {
        let mut found = self.load(booking_id).await?;

        found.booking.reject(admin_id, admin_notes.clone())?;

        let content = match &admin_notes {
            Some(notes) => format!("Booking has been rejected. Reason: {}", notes),
            None => "Booking has been rejected.".to_string(),
        };
        let system_message = BookingMessage::system(found.booking.booking_id, admin_id, content);

        self.bookings
            .update_with_messages(&found.booking, &[system_message])
            .await?;

        tracing::info!(booking_id = %booking_id, "Booking rejected");
        Ok(found)
    }

    /// Requester: any non-approved state -> CANCELLED.
    pub async fn cancel(
        &self,
        booking_id: &BookingId,
        user_id: UserId,
    ) -> BookingResult<BookingWithMachine> {
        let mut found = self.load(booking_id).await?;
        found.booking.ensure_owned_by(&user_id)?;

        found.booking.cancel()?;

        let system_message = BookingMessage::system(
            found.booking.booking_id,
            user_id,
            "Booking has been cancelled by the user.".to_string(),
        );

        self.bookings
            .update_with_messages(&found.booking, &[system_message])
            .await?;

        tracing::info!(booking_id = %booking_id, "Booking cancelled");
        Ok(found)
    }
}
