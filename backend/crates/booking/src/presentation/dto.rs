//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    Booking, BookingMessage, BookingStatus, MessageType, RentalDuration,
};
use crate::domain::repository::{BookingStatistics, BookingWithMachine};

/// Create-booking request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub machine_id: Uuid,
    pub rental_duration: RentalDuration,
    pub quantity: i32,
    pub user_notes: Option<String>,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_positive(self.quantity, "quantity");
        v.finish()
    }
}

/// Send-payment-address request (reviewer)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentAddressRequest {
    pub payment_address: String,
}

impl SendPaymentAddressRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.payment_address, "paymentAddress");
        v.finish()
    }
}

/// Mark-payment-sent request (requester)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaymentSentRequest {
    pub transaction_hash: Option<String>,
}

/// Approve / reject request body (reviewer)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub admin_notes: Option<String>,
}

/// Send-message request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub content: String,
    pub message_type: Option<MessageType>,
}

impl CreateMessageRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.content, "content");
        v.finish()
    }
}

/// Admin listing query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<BookingStatus>,
}

/// Thread message representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub message_type: MessageType,
    pub is_read: bool,
    pub is_from_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn from_entity(message: &BookingMessage) -> Self {
        Self {
            id: *message.message_id.as_uuid(),
            booking_id: *message.booking_id.as_uuid(),
            sender_id: *message.sender_id.as_uuid(),
            content: message.content.clone(),
            message_type: message.message_type,
            is_read: message.is_read,
            is_from_admin: message.is_from_admin,
            created_at: message.created_at,
        }
    }
}

/// Booking representation; `messages` is populated on detail reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub machine_id: Uuid,
    pub machine_name: String,
    pub rental_duration: RentalDuration,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_address: Option<String>,
    pub transaction_hash: Option<String>,
    pub user_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub payment_sent_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub approved_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageResponse>>,
}

impl BookingResponse {
    pub fn from_entity(found: &BookingWithMachine) -> Self {
        let booking: &Booking = &found.booking;
        Self {
            id: *booking.booking_id.as_uuid(),
            user_id: *booking.user_id.as_uuid(),
            machine_id: *booking.machine_id.as_uuid(),
            machine_name: found.machine_name.clone(),
            rental_duration: booking.rental_duration,
            quantity: booking.quantity,
            total_price: booking.total_price,
            status: booking.status,
            payment_address: booking.payment_address.clone(),
            transaction_hash: booking.transaction_hash.clone(),
            user_notes: booking.user_notes.clone(),
            admin_notes: booking.admin_notes.clone(),
            payment_sent_at: booking.payment_sent_at,
            approved_at: booking.approved_at,
            rejected_at: booking.rejected_at,
            approved_by_id: booking.approved_by_id.map(|id| *id.as_uuid()),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            messages: None,
        }
    }

    pub fn with_messages(mut self, messages: &[BookingMessage]) -> Self {
        self.messages = Some(messages.iter().map(MessageResponse::from_entity).collect());
        self
    }
}

/// Statistics payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total: i64,
    pub pending: i64,
    pub awaiting_payment: i64,
    pub payment_sent: i64,
    pub approved: i64,
    pub rejected: i64,
    pub cancelled: i64,
}

impl StatisticsResponse {
    pub fn from_stats(stats: &BookingStatistics) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            awaiting_payment: stats.awaiting_payment,
            payment_sent: stats.payment_sent,
            approved: stats.approved,
            rejected: stats.rejected,
            cancelled: stats.cancelled,
        }
    }
}

/// Unread-count payload
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}
