//! PostgreSQL Repository Implementations

use chrono::{DateTime, Duration, Utc};
use kernel::id::{ContactId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{ContactStatus, ContactSubject, ContactSubmission};
use crate::domain::repository::{ContactFilter, ContactRepository, ContactStatistics};
use crate::error::ContactResult;

const CONTACT_COLUMNS: &str = r#"
    contact_id,
    first_name,
    last_name,
    email,
    phone,
    subject,
    message,
    status,
    admin_notes,
    assigned_to_id,
    is_read,
    ip_address,
    user_agent,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed contact repository
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for PgContactRepository {
    async fn create(&self, submission: &ContactSubmission) -> ContactResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (
                contact_id,
                first_name,
                last_name,
                email,
                phone,
                subject,
                message,
                status,
                admin_notes,
                assigned_to_id,
                is_read,
                ip_address,
                user_agent,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(submission.contact_id.as_uuid())
        .bind(&submission.first_name)
        .bind(&submission.last_name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(submission.subject.code())
        .bind(&submission.message)
        .bind(submission.status.code())
        .bind(&submission.admin_notes)
        .bind(submission.assigned_to_id.map(|id| *id.as_uuid()))
        .bind(submission.is_read)
        .bind(&submission.ip_address)
        .bind(&submission.user_agent)
        .bind(submission.created_at)
        .bind(submission.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        contact_id: &ContactId,
    ) -> ContactResult<Option<ContactSubmission>> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_submissions WHERE contact_id = $1"
        ))
        .bind(contact_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_submission()))
    }

    async fn list_paged(
        &self,
        filter: &ContactFilter,
        page: u32,
        limit: u32,
    ) -> ContactResult<(Vec<ContactSubmission>, u64)> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let status_code = filter.status.map(|s| s.code());
        let subject_code = filter.subject.map(|s| s.code());
        let search = filter.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            SELECT {CONTACT_COLUMNS} FROM contact_submissions
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR subject = $2)
              AND ($3::TEXT IS NULL OR first_name ILIKE $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(status_code)
        .bind(subject_code)
        .bind(&search)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM contact_submissions
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR subject = $2)
              AND ($3::TEXT IS NULL OR first_name ILIKE $3)
            "#,
        )
        .bind(status_code)
        .bind(subject_code)
        .bind(&search)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(|r| r.into_submission()).collect(),
            total as u64,
        ))
    }

    async fn recent(&self, limit: u32) -> ContactResult<Vec<ContactSubmission>> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            SELECT {CONTACT_COLUMNS} FROM contact_submissions
            ORDER BY created_at DESC
            LIMIT $1
            "#
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_submission()).collect())
    }

    async fn update(&self, submission: &ContactSubmission) -> ContactResult<()> {
        sqlx::query(
            r#"
            UPDATE contact_submissions SET
                status = $2,
                admin_notes = $3,
                assigned_to_id = $4,
                is_read = $5,
                updated_at = $6
            WHERE contact_id = $1
            "#,
        )
        .bind(submission.contact_id.as_uuid())
        .bind(submission.status.code())
        .bind(&submission.admin_notes)
        .bind(submission.assigned_to_id.map(|id| *id.as_uuid()))
        .bind(submission.is_read)
        .bind(submission.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, contact_id: &ContactId) -> ContactResult<()> {
        sqlx::query("DELETE FROM contact_submissions WHERE contact_id = $1")
            .bind(contact_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn statistics(&self) -> ContactResult<ContactStatistics> {
        let now = Utc::now();
        let today = now.date_naive().and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let row = sqlx::query_as::<_, StatisticsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'new') AS new,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE status = 'closed') AS closed,
                COUNT(*) FILTER (WHERE is_read = FALSE) AS unread,
                COUNT(*) FILTER (WHERE created_at >= $1) AS today,
                COUNT(*) FILTER (WHERE created_at >= $2) AS this_week,
                COUNT(*) FILTER (WHERE created_at >= $3) AS this_month
            FROM contact_submissions
            "#,
        )
        .bind(today)
        .bind(week_ago)
        .bind(month_ago)
        .fetch_one(&self.pool)
        .await?;

        Ok(ContactStatistics {
            total: row.total,
            new: row.new,
            in_progress: row.in_progress,
            resolved: row.resolved,
            closed: row.closed,
            unread: row.unread,
            today: row.today,
            this_week: row.this_week,
            this_month: row.this_month,
        })
    }
}

// Internal row types for sqlx mapping

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    status: String,
    admin_notes: Option<String>,
    assigned_to_id: Option<Uuid>,
    is_read: bool,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_submission(self) -> ContactSubmission {
        ContactSubmission {
            contact_id: ContactId::from_uuid(self.contact_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            subject: ContactSubject::from_code(&self.subject).unwrap_or_default(),
            message: self.message,
            status: ContactStatus::from_code(&self.status).unwrap_or_default(),
            admin_notes: self.admin_notes,
            assigned_to_id: self.assigned_to_id.map(UserId::from_uuid),
            is_read: self.is_read,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatisticsRow {
    total: i64,
    new: i64,
    in_progress: i64,
    resolved: i64,
    closed: i64,
    unread: i64,
    today: i64,
    this_week: i64,
    this_month: i64,
}
