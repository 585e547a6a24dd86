//! Wallet Service
//!
//! Wallets are created lazily: the first read of a (user, currency) pair
//! materializes a zero-balance row.

use std::sync::Arc;

use kernel::id::UserId;
use rust_decimal::Decimal;

use crate::domain::entities::{CryptoType, Wallet};
use crate::domain::repository::WalletRepository;
use crate::error::{WalletError, WalletResult};

/// Wallet service
pub struct WalletService<R>
where
    R: WalletRepository,
{
    repo: Arc<R>,
}

impl<R> WalletService<R>
where
    R: WalletRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn get_or_create(&self, user_id: &UserId, crypto_type: CryptoType) -> WalletResult<Wallet> {
        if let Some(wallet) = self.repo.find(user_id, crypto_type).await? {
            return Ok(wallet);
        }

        let wallet = Wallet::new(*user_id, crypto_type);
        self.repo.create(&wallet).await?;

        tracing::info!(user_id = %user_id, crypto = %crypto_type, "Wallet created lazily");
        Ok(wallet)
    }

    /// All wallets of one user, materializing any missing currencies.
    ///
    /// The USD total is a placeholder until live price feeds exist.
    pub async fn get_all(&self, user_id: &UserId) -> WalletResult<(Vec<Wallet>, Decimal)> {
        for crypto_type in CryptoType::ALL {
            self.get_or_create(user_id, crypto_type).await?;
        }

        let wallets = self.repo.list_for_user(user_id).await?;
        let total_balance_usd = Decimal::ZERO;

        Ok((wallets, total_balance_usd))
    }

    pub async fn get(&self, user_id: &UserId, crypto_type: CryptoType) -> WalletResult<Wallet> {
        self.get_or_create(user_id, crypto_type).await
    }

    pub async fn update_address(
        &self,
        user_id: &UserId,
        crypto_type: CryptoType,
        address: String,
    ) -> WalletResult<Wallet> {
        let mut wallet = self.get_or_create(user_id, crypto_type).await?;
        wallet.set_address(address);
        self.repo.update(&wallet).await?;
        Ok(wallet)
    }

    pub async fn add_balance(
        &self,
        user_id: &UserId,
        crypto_type: CryptoType,
        amount: Decimal,
    ) -> WalletResult<Wallet> {
        let mut wallet = self.get_or_create(user_id, crypto_type).await?;
        wallet.credit(amount);
        self.repo.update(&wallet).await?;

        tracing::info!(user_id = %user_id, crypto = %crypto_type, amount = %amount, "Balance credited");
        Ok(wallet)
    }

    pub async fn subtract_balance(
        &self,
        user_id: &UserId,
        crypto_type: CryptoType,
        amount: Decimal,
    ) -> WalletResult<Wallet> {
        let mut wallet = self
            .repo
            .find(user_id, crypto_type)
            .await?
            .ok_or(WalletError::WalletNotFound)?;

        wallet.debit(amount)?;
        self.repo.update(&wallet).await?;

        tracing::info!(user_id = %user_id, crypto = %crypto_type, amount = %amount, "Balance debited");
        Ok(wallet)
    }

    pub async fn find_by_address(
        &self,
        crypto_type: CryptoType,
        address: &str,
    ) -> WalletResult<Option<Wallet>> {
        self.repo.find_by_address(crypto_type, address).await
    }
}
