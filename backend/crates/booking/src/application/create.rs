//! Create Booking Use Case
//!
//! Validates the machine (exists, active, enough available units),
//! freezes the total price, and opens the thread with a system message.
//! The availability check does NOT reserve capacity; inventory is only
//! committed at approval.

use std::sync::Arc;

use catalog::domain::repository::MachineRepository;
use kernel::id::{MachineId, UserId};

use crate::domain::entities::{Booking, BookingMessage, RentalDuration};
use crate::domain::pricing;
use crate::domain::repository::{BookingRepository, BookingWithMachine};
use crate::error::{BookingError, BookingResult};

/// Create booking input
pub struct CreateBookingInput {
    pub machine_id: MachineId,
    pub rental_duration: RentalDuration,
    pub quantity: i32,
    pub user_notes: Option<String>,
}

/// Create booking use case
pub struct CreateBookingUseCase<B, M>
where
    B: BookingRepository,
    M: MachineRepository,
{
    bookings: Arc<B>,
    machines: Arc<M>,
}

impl<B, M> CreateBookingUseCase<B, M>
where
    B: BookingRepository,
    M: MachineRepository,
{
    pub fn new(bookings: Arc<B>, machines: Arc<M>) -> Self {
        Self { bookings, machines }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        input: CreateBookingInput,
    ) -> BookingResult<BookingWithMachine> {
        let machine = self
            .machines
            .find_by_id(&input.machine_id)
            .await
            .map_err(BookingError::from)?
            .ok_or(BookingError::MachineNotFound)?;

        if !machine.is_active {
            return Err(BookingError::MachineNotAvailable);
        }

        let available = machine.available_units();
        if input.quantity > available {
            return Err(BookingError::InsufficientUnits { available });
        }

        let total_price = pricing::total_price(&machine, input.rental_duration, input.quantity);

        let booking = Booking::new(
            user_id,
            input.machine_id,
            input.rental_duration,
            input.quantity,
            total_price,
            input.user_notes,
        );

        let opening_message = BookingMessage::system(
            booking.booking_id,
            user_id,
            format!(
                "Booking request created for {}. Waiting for admin to provide payment address.",
                machine.name
            ),
        );

        self.bookings.create(&booking, &opening_message).await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            machine_id = %booking.machine_id,
            quantity = booking.quantity,
            total_price = %booking.total_price,
            "Booking created"
        );

        Ok(BookingWithMachine {
            booking,
            machine_name: machine.name,
        })
    }
}
