//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{CryptoInfo, CryptoType, Wallet};

/// Update-receive-address request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWalletAddressRequest {
    pub crypto_type: CryptoType,
    pub wallet_address: String,
}

impl UpdateWalletAddressRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.wallet_address, "walletAddress");
        v.finish()
    }
}

/// Wallet representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub id: Uuid,
    pub crypto_type: CryptoType,
    pub balance: Decimal,
    pub pending_balance: Decimal,
    pub wallet_address: Option<String>,
    pub is_active: bool,
    pub info: CryptoInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WalletResponse {
    pub fn from_entity(wallet: &Wallet) -> Self {
        Self {
            id: *wallet.wallet_id.as_uuid(),
            crypto_type: wallet.crypto_type,
            balance: wallet.balance,
            pending_balance: wallet.pending_balance,
            wallet_address: wallet.wallet_address.clone(),
            is_active: wallet.is_active,
            info: wallet.crypto_type.info(),
            created_at: wallet.created_at,
            updated_at: wallet.updated_at,
        }
    }
}

/// All wallets of one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllWalletsResponse {
    pub wallets: Vec<WalletResponse>,
    pub total_balance_usd: Decimal,
}

/// Supported-currency metadata entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoTypeResponse {
    pub crypto_type: CryptoType,
    #[serde(flatten)]
    pub info: CryptoInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_response_serialization() {
        let wallet = Wallet::new(kernel::id::UserId::new(), CryptoType::BTC);
        let json = serde_json::to_string(&WalletResponse::from_entity(&wallet)).unwrap();
        assert!(json.contains(r#""cryptoType":"BTC""#));
        assert!(json.contains(r#""name":"Bitcoin""#));
        assert!(json.contains(r#""balance":"0""#));
    }

    #[test]
    fn test_update_address_validation() {
        let req = UpdateWalletAddressRequest {
            crypto_type: CryptoType::ETH,
            wallet_address: "  ".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
