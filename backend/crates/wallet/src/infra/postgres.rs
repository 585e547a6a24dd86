//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WalletId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CryptoType, Wallet};
use crate::domain::repository::WalletRepository;
use crate::error::{WalletError, WalletResult};

const WALLET_COLUMNS: &str = r#"
    wallet_id,
    user_id,
    crypto_type,
    balance,
    pending_balance,
    wallet_address,
    is_active,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed wallet repository
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WalletRepository for PgWalletRepository {
    async fn create(&self, wallet: &Wallet) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO wallets (
                wallet_id,
                user_id,
                crypto_type,
                balance,
                pending_balance,
                wallet_address,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, crypto_type) DO NOTHING
            "#,
        )
        .bind(wallet.wallet_id.as_uuid())
        .bind(wallet.user_id.as_uuid())
        .bind(wallet.crypto_type.code())
        .bind(wallet.balance)
        .bind(wallet.pending_balance)
        .bind(&wallet.wallet_address)
        .bind(wallet.is_active)
        .bind(wallet.created_at)
        .bind(wallet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        crypto_type: CryptoType,
    ) -> WalletResult<Option<Wallet>> {
        let row = sqlx::query_as::<_, WalletRow>(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1 AND crypto_type = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(crypto_type.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_wallet()).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> WalletResult<Vec<Wallet>> {
        let rows = sqlx::query_as::<_, WalletRow>(&format!(
            r#"
            SELECT {WALLET_COLUMNS} FROM wallets
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY crypto_type ASC
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_wallet()).collect()
    }

    async fn find_by_address(
        &self,
        crypto_type: CryptoType,
        address: &str,
    ) -> WalletResult<Option<Wallet>> {
        let row = sqlx::query_as::<_, WalletRow>(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE crypto_type = $1 AND wallet_address = $2"
        ))
        .bind(crypto_type.code())
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_wallet()).transpose()
    }

    async fn update(&self, wallet: &Wallet) -> WalletResult<()> {
        sqlx::query(
            r#"
            UPDATE wallets SET
                balance = $2,
                pending_balance = $3,
                wallet_address = $4,
                is_active = $5,
                updated_at = $6
            WHERE wallet_id = $1
            "#,
        )
        .bind(wallet.wallet_id.as_uuid())
        .bind(wallet.balance)
        .bind(wallet.pending_balance)
        .bind(&wallet.wallet_address)
        .bind(wallet.is_active)
        .bind(wallet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct WalletRow {
    wallet_id: Uuid,
    user_id: Uuid,
    crypto_type: String,
    balance: Decimal,
    pending_balance: Decimal,
    wallet_address: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WalletRow {
    fn into_wallet(self) -> WalletResult<Wallet> {
        let crypto_type = CryptoType::from_code(&self.crypto_type)
            .ok_or_else(|| WalletError::Internal(format!("Invalid crypto type: {}", self.crypto_type)))?;

        Ok(Wallet {
            wallet_id: WalletId::from_uuid(self.wallet_id),
            user_id: UserId::from_uuid(self.user_id),
            crypto_type,
            balance: self.balance,
            pending_balance: self.pending_balance,
            wallet_address: self.wallet_address,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
