//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::context::Role;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{IdentityError, IdentityResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    first_name,
    last_name,
    phone,
    user_role,
    avatar,
    is_active,
    email_verified,
    email_verification_token,
    email_verification_expires,
    password_reset_token,
    password_reset_expires,
    last_login_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgIdentityRepository {
    async fn create(&self, user: &User) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                first_name,
                last_name,
                phone,
                user_role,
                avatar,
                is_active,
                email_verified,
                email_verification_token,
                email_verification_expires,
                password_reset_token,
                password_reset_expires,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.role.id())
        .bind(&user.avatar)
        .bind(user.is_active)
        .bind(user.email_verified)
        .bind(&user.email_verification_token)
        .bind(user.email_verification_expires)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_expires)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(user_id = %user.user_id, "User row created");
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_reset_token(&self, token: &str) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password_reset_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_verification_token(&self, token: &str) -> IdentityResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email_verification_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list(&self) -> IdentityResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> IdentityResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                first_name = $4,
                last_name = $5,
                phone = $6,
                user_role = $7,
                avatar = $8,
                is_active = $9,
                email_verified = $10,
                email_verification_token = $11,
                email_verification_expires = $12,
                password_reset_token = $13,
                password_reset_expires = $14,
                last_login_at = $15,
                updated_at = $16
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(user.role.id())
        .bind(&user.avatar)
        .bind(user.is_active)
        .bind(user.email_verified)
        .bind(&user.email_verification_token)
        .bind(user.email_verification_expires)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_expires)
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> IdentityResult<()> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %user_id, "User row deleted");
        Ok(())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    user_role: i16,
    avatar: Option<String>,
    is_active: bool,
    email_verified: bool,
    email_verification_token: Option<String>,
    email_verification_expires: Option<DateTime<Utc>>,
    password_reset_token: Option<String>,
    password_reset_expires: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> IdentityResult<User> {
        let role = Role::from_id(self.user_role)
            .ok_or_else(|| IdentityError::Internal(format!("Invalid role id: {}", self.user_role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role,
            avatar: self.avatar,
            is_active: self.is_active,
            email_verified: self.email_verified,
            email_verification_token: self.email_verification_token,
            email_verification_expires: self.email_verification_expires,
            password_reset_token: self.password_reset_token,
            password_reset_expires: self.password_reset_expires,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
