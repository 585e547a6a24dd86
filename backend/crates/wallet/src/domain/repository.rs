//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::{CryptoType, Wallet};
use crate::error::WalletResult;

/// Wallet repository trait
#[trait_variant::make(WalletRepository: Send)]
pub trait LocalWalletRepository {
    async fn create(&self, wallet: &Wallet) -> WalletResult<()>;

    async fn find(&self, user_id: &UserId, crypto_type: CryptoType)
    -> WalletResult<Option<Wallet>>;

    /// Active wallets of one user, ordered by currency code
    async fn list_for_user(&self, user_id: &UserId) -> WalletResult<Vec<Wallet>>;

    /// Lookup by receive address within one currency
    async fn find_by_address(
        &self,
        crypto_type: CryptoType,
        address: &str,
    ) -> WalletResult<Option<Wallet>>;

    async fn update(&self, wallet: &Wallet) -> WalletResult<()>;
}
