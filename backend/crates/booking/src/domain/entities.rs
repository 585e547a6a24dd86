//! Domain Entities
//!
//! The booking request, its status state machine, and the embedded
//! message thread. Transitions are entity methods with guard checks, so
//! the state machine is fully testable without a database.
//!
//! ```text
//! PENDING -> AWAITING_PAYMENT -> PAYMENT_SENT -> APPROVED
//!    \----------- reject (any non-terminal) -----> REJECTED
//!     \---------- cancel (any non-approved) -----> CANCELLED
//! ```

use chrono::{DateTime, Utc};
use kernel::id::{BookingId, MachineId, MessageId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BookingError, BookingResult};

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    AwaitingPayment,
    PaymentSent,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::AwaitingPayment => "awaiting_payment",
            BookingStatus::PaymentSent => "payment_sent",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(BookingStatus::Pending),
            "awaiting_payment" => Some(BookingStatus::AwaitingPayment),
            "payment_sent" => Some(BookingStatus::PaymentSent),
            "approved" => Some(BookingStatus::Approved),
            "rejected" => Some(BookingStatus::Rejected),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal states accept no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Approved | BookingStatus::Rejected | BookingStatus::Cancelled
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rental billing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalDuration {
    Hour,
    /// Default and defensive fallback for unrecognized stored values
    #[default]
    Day,
    Week,
    Month,
}

impl RentalDuration {
    pub const fn code(&self) -> &'static str {
        match self {
            RentalDuration::Hour => "hour",
            RentalDuration::Day => "day",
            RentalDuration::Week => "week",
            RentalDuration::Month => "month",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "hour" => Some(RentalDuration::Hour),
            "day" => Some(RentalDuration::Day),
            "week" => Some(RentalDuration::Week),
            "month" => Some(RentalDuration::Month),
            _ => None,
        }
    }
}

impl fmt::Display for RentalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Message thread entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Text,
    PaymentAddress,
    System,
}

impl MessageType {
    pub const fn code(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::PaymentAddress => "payment_address",
            MessageType::System => "system",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "text" => Some(MessageType::Text),
            "payment_address" => Some(MessageType::PaymentAddress),
            "system" => Some(MessageType::System),
            _ => None,
        }
    }
}

/// Booking entity - a single rental request.
///
/// The total price is computed once at creation and frozen here; later
/// catalog price changes never affect existing bookings.
#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    /// Requester
    pub user_id: UserId,
    pub machine_id: MachineId,
    pub rental_duration: RentalDuration,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    /// Set by the reviewer on PENDING -> AWAITING_PAYMENT
    pub payment_address: Option<String>,
    /// Set by the requester on AWAITING_PAYMENT -> PAYMENT_SENT
    pub transaction_hash: Option<String>,
    pub user_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub payment_sent_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    /// Reviewer who approved or rejected
    pub approved_by_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new PENDING booking request.
    pub fn new(
        user_id: UserId,
        machine_id: MachineId,
        rental_duration: RentalDuration,
        quantity: i32,
        total_price: Decimal,
        user_notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            booking_id: BookingId::new(),
            user_id,
            machine_id,
            rental_duration,
            quantity,
            total_price,
            status: BookingStatus::Pending,
            payment_address: None,
            transaction_hash: None,
            user_notes,
            admin_notes: None,
            payment_sent_at: None,
            approved_at: None,
            rejected_at: None,
            approved_by_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Requester-scoped access check.
    pub fn ensure_owned_by(&self, user_id: &UserId) -> BookingResult<()> {
        if &self.user_id == user_id {
            Ok(())
        } else {
            Err(BookingError::AccessDenied)
        }
    }

    // ========================================================================
    // State machine transitions
    // ========================================================================

    /// PENDING -> AWAITING_PAYMENT (reviewer supplies the payment address).
    pub fn send_payment_address(&mut self, address: String) -> BookingResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(BookingError::NotPending);
        }
        self.payment_address = Some(address);
        self.status = BookingStatus::AwaitingPayment;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// AWAITING_PAYMENT -> PAYMENT_SENT (requester attests to the transfer).
    pub fn mark_payment_sent(&mut self, transaction_hash: Option<String>) -> BookingResult<()> {
        if self.status != BookingStatus::AwaitingPayment {
            return Err(BookingError::NotAwaitingPayment);
        }
        if transaction_hash.is_some() {
            self.transaction_hash = transaction_hash;
        }
        self.status = BookingStatus::PaymentSent;
        self.payment_sent_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// PAYMENT_SENT -> APPROVED (reviewer confirms the transfer).
    ///
    /// Inventory commitment happens alongside in the same transaction; the
    /// entity only records who approved and when.
    pub fn approve(&mut self, reviewer: UserId, admin_notes: Option<String>) -> BookingResult<()> {
        if self.status != BookingStatus::PaymentSent {
            return Err(BookingError::NotPaymentSent);
        }
        self.status = BookingStatus::Approved;
        self.approved_at = Some(Utc::now());
        self.approved_by_id = Some(reviewer);
        if admin_notes.is_some() {
            self.admin_notes = admin_notes;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// any except APPROVED / REJECTED -> REJECTED.
    pub fn reject(&mut self, reviewer: UserId, admin_notes: Option<String>) -> BookingResult<()> {
        if matches!(
            self.status,
            BookingStatus::Approved | BookingStatus::Rejected
        ) {
            return Err(BookingError::AlreadyProcessed);
        }
        self.status = BookingStatus::Rejected;
        self.rejected_at = Some(Utc::now());
        self.approved_by_id = Some(reviewer);
        if admin_notes.is_some() {
            self.admin_notes = admin_notes;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// any except APPROVED -> CANCELLED (requester side-exit).
    pub fn cancel(&mut self) -> BookingResult<()> {
        if self.status == BookingStatus::Approved {
            return Err(BookingError::CannotCancelApproved);
        }
        self.status = BookingStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Message entity - an entry in a booking's communication thread.
///
/// Immutable once created except for the read flag.
#[derive(Debug, Clone)]
pub struct BookingMessage {
    pub message_id: MessageId,
    pub booking_id: BookingId,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: MessageType,
    pub is_read: bool,
    pub is_from_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl BookingMessage {
    pub fn new(
        booking_id: BookingId,
        sender_id: UserId,
        content: String,
        message_type: MessageType,
        is_from_admin: bool,
    ) -> Self {
        Self {
            message_id: MessageId::new(),
            booking_id,
            sender_id,
            content,
            message_type,
            is_read: false,
            is_from_admin,
            created_at: Utc::now(),
        }
    }

    /// System-authored entry narrating a state transition. Attributed to
    /// the acting user but rendered as the platform's own voice.
    pub fn system(booking_id: BookingId, sender_id: UserId, content: String) -> Self {
        Self::new(booking_id, sender_id, content, MessageType::System, true)
    }
}
