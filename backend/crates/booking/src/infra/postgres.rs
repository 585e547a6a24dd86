//! PostgreSQL Repository Implementations
//!
//! Every transition persists its whole effect in one transaction: the
//! booking update, appended messages, and for approval the clamped
//! inventory increment. A crash can no longer leave an APPROVED booking
//! with uncommitted inventory or a status change without its journal
//! entry.

use chrono::{DateTime, Utc};
use kernel::id::{BookingId, MachineId, MessageId, UserId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{
    Booking, BookingMessage, BookingStatus, MessageType, RentalDuration,
};
use crate::domain::repository::{
    BookingRepository, BookingStatistics, BookingWithMachine, MessageRepository,
};
use crate::error::BookingResult;

const BOOKING_COLUMNS: &str = r#"
    b.booking_id,
    b.user_id,
    b.machine_id,
    b.rental_duration,
    b.quantity,
    b.total_price,
    b.status,
    b.payment_address,
    b.transaction_hash,
    b.user_notes,
    b.admin_notes,
    b.payment_sent_at,
    b.approved_at,
    b.rejected_at,
    b.approved_by_id,
    b.created_at,
    b.updated_at,
    m.name AS machine_name
"#;

/// PostgreSQL-backed booking repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_message(
        tx: &mut Transaction<'_, Postgres>,
        message: &BookingMessage,
    ) -> BookingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO booking_messages (
                message_id,
                booking_id,
                sender_id,
                content,
                message_type,
                is_read,
                is_from_admin,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.message_id.as_uuid())
        .bind(message.booking_id.as_uuid())
        .bind(message.sender_id.as_uuid())
        .bind(&message.content)
        .bind(message.message_type.code())
        .bind(message.is_read)
        .bind(message.is_from_admin)
        .bind(message.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn update_booking(
        tx: &mut Transaction<'_, Postgres>,
        booking: &Booking,
    ) -> BookingResult<()> {
        sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2,
                payment_address = $3,
                transaction_hash = $4,
                user_notes = $5,
                admin_notes = $6,
                payment_sent_at = $7,
                approved_at = $8,
                rejected_at = $9,
                approved_by_id = $10,
                updated_at = $11
            WHERE booking_id = $1
            "#,
        )
        .bind(booking.booking_id.as_uuid())
        .bind(booking.status.code())
        .bind(&booking.payment_address)
        .bind(&booking.transaction_hash)
        .bind(&booking.user_notes)
        .bind(&booking.admin_notes)
        .bind(booking.payment_sent_at)
        .bind(booking.approved_at)
        .bind(booking.rejected_at)
        .bind(booking.approved_by_id.map(|id| *id.as_uuid()))
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

impl BookingRepository for PgBookingRepository {
    async fn create(
        &self,
        booking: &Booking,
        opening_message: &BookingMessage,
    ) -> BookingResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                user_id,
                machine_id,
                rental_duration,
                quantity,
                total_price,
                status,
                payment_address,
                transaction_hash,
                user_notes,
                admin_notes,
                payment_sent_at,
                approved_at,
                rejected_at,
                approved_by_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(booking.booking_id.as_uuid())
        .bind(booking.user_id.as_uuid())
        .bind(booking.machine_id.as_uuid())
        .bind(booking.rental_duration.code())
        .bind(booking.quantity)
        .bind(booking.total_price)
        .bind(booking.status.code())
        .bind(&booking.payment_address)
        .bind(&booking.transaction_hash)
        .bind(&booking.user_notes)
        .bind(&booking.admin_notes)
        .bind(booking.payment_sent_at)
        .bind(booking.approved_at)
        .bind(booking.rejected_at)
        .bind(booking.approved_by_id.map(|id| *id.as_uuid()))
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await?;

        Self::insert_message(&mut tx, opening_message).await?;

        tx.commit().await?;

        tracing::info!(booking_id = %booking.booking_id, "Booking row created");
        Ok(())
    }

    async fn find_by_id(&self, booking_id: &BookingId) -> BookingResult<Option<BookingWithMachine>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            JOIN mining_machines m ON m.machine_id = b.machine_id
            WHERE b.booking_id = $1
            "#
        ))
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_booking_with_machine()))
    }

    async fn list_for_user(&self, user_id: &UserId) -> BookingResult<Vec<BookingWithMachine>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            JOIN mining_machines m ON m.machine_id = b.machine_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| r.into_booking_with_machine())
            .collect())
    }

    async fn list_paged(
        &self,
        status: Option<BookingStatus>,
        page: u32,
        limit: u32,
    ) -> BookingResult<(Vec<BookingWithMachine>, u64)> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let status_code = status.map(|s| s.code());

        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            JOIN mining_machines m ON m.machine_id = b.machine_id
            WHERE ($1::TEXT IS NULL OR b.status = $1)
            ORDER BY b.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status_code)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status_code)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            rows.into_iter()
                .map(|r| r.into_booking_with_machine())
                .collect(),
            total as u64,
        ))
    }

    async fn update_with_messages(
        &self,
        booking: &Booking,
        messages: &[BookingMessage],
    ) -> BookingResult<()> {
        let mut tx = self.pool.begin().await?;

        Self::update_booking(&mut tx, booking).await?;
        for message in messages {
            Self::insert_message(&mut tx, message).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn commit_approval(
        &self,
        booking: &Booking,
        message: &BookingMessage,
    ) -> BookingResult<()> {
        let mut tx = self.pool.begin().await?;

        // Clamp: concurrent approvals racing past capacity are absorbed,
        // rented_units never exceeds total_units
        sqlx::query(
            r#"
            UPDATE mining_machines
            SET rented_units = LEAST(total_units, rented_units + $2),
                updated_at = $3
            WHERE machine_id = $1
            "#,
        )
        .bind(booking.machine_id.as_uuid())
        .bind(booking.quantity)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        Self::update_booking(&mut tx, booking).await?;
        Self::insert_message(&mut tx, message).await?;

        tx.commit().await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            machine_id = %booking.machine_id,
            quantity = booking.quantity,
            "Approval committed"
        );
        Ok(())
    }

    async fn count_by_status(&self) -> BookingResult<BookingStatistics> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'awaiting_payment') AS awaiting_payment,
                COUNT(*) FILTER (WHERE status = 'payment_sent') AS payment_sent,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled
            FROM bookings
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(BookingStatistics {
            total: row.total,
            pending: row.pending,
            awaiting_payment: row.awaiting_payment,
            payment_sent: row.payment_sent,
            approved: row.approved,
            rejected: row.rejected,
            cancelled: row.cancelled,
        })
    }
}

impl MessageRepository for PgBookingRepository {
    async fn add_message(&self, message: &BookingMessage) -> BookingResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_message(&mut tx, message).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_messages(&self, booking_id: &BookingId) -> BookingResult<Vec<BookingMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT
                message_id,
                booking_id,
                sender_id,
                content,
                message_type,
                is_read,
                is_from_admin,
                created_at
            FROM booking_messages
            WHERE booking_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_message()).collect())
    }

    async fn mark_read(&self, booking_id: &BookingId, from_admin: bool) -> BookingResult<u64> {
        let affected = sqlx::query(
            r#"
            UPDATE booking_messages
            SET is_read = TRUE
            WHERE booking_id = $1 AND is_from_admin = $2 AND is_read = FALSE
            "#,
        )
        .bind(booking_id.as_uuid())
        .bind(from_admin)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected)
    }

    async fn unread_count_for_admin(&self) -> BookingResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM booking_messages
            WHERE is_from_admin = FALSE AND is_read = FALSE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn unread_count_for_user(&self, user_id: &UserId) -> BookingResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM booking_messages msg
            JOIN bookings b ON b.booking_id = msg.booking_id
            WHERE b.user_id = $1
              AND msg.is_from_admin = TRUE
              AND msg.is_read = FALSE
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// Internal row types for sqlx mapping

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    user_id: Uuid,
    machine_id: Uuid,
    rental_duration: String,
    quantity: i32,
    total_price: Decimal,
    status: String,
    payment_address: Option<String>,
    transaction_hash: Option<String>,
    user_notes: Option<String>,
    admin_notes: Option<String>,
    payment_sent_at: Option<DateTime<Utc>>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
    approved_by_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    machine_name: String,
}

impl BookingRow {
    fn into_booking_with_machine(self) -> BookingWithMachine {
        // Unrecognized stored codes fall back to the enum defaults (DAY
        // for duration, matching the pricing fallback)
        let booking = Booking {
            booking_id: BookingId::from_uuid(self.booking_id),
            user_id: UserId::from_uuid(self.user_id),
            machine_id: MachineId::from_uuid(self.machine_id),
            rental_duration: RentalDuration::from_code(&self.rental_duration).unwrap_or_default(),
            quantity: self.quantity,
            total_price: self.total_price,
            status: BookingStatus::from_code(&self.status).unwrap_or_default(),
            payment_address: self.payment_address,
            transaction_hash: self.transaction_hash,
            user_notes: self.user_notes,
            admin_notes: self.admin_notes,
            payment_sent_at: self.payment_sent_at,
            approved_at: self.approved_at,
            rejected_at: self.rejected_at,
            approved_by_id: self.approved_by_id.map(UserId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        BookingWithMachine {
            booking,
            machine_name: self.machine_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    message_id: Uuid,
    booking_id: Uuid,
    sender_id: Uuid,
    content: String,
    message_type: String,
    is_read: bool,
    is_from_admin: bool,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> BookingMessage {
        BookingMessage {
            message_id: MessageId::from_uuid(self.message_id),
            booking_id: BookingId::from_uuid(self.booking_id),
            sender_id: UserId::from_uuid(self.sender_id),
            content: self.content,
            message_type: MessageType::from_code(&self.message_type).unwrap_or_default(),
            is_read: self.is_read,
            is_from_admin: self.is_from_admin,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatisticsRow {
    total: i64,
    pending: i64,
    awaiting_payment: i64,
    payment_sent: i64,
    approved: i64,
    rejected: i64,
    cancelled: i64,
}
