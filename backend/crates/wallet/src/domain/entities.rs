//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{WalletError, WalletResult};

/// Supported wallet currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoType {
    BTC,
    ETH,
    USDT,
    LTC,
    XRP,
    DOGE,
    BNB,
    SOL,
}

/// Static display metadata for a currency.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CryptoInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub decimals: u8,
}

impl CryptoType {
    /// All supported currencies, in display order.
    pub const ALL: [CryptoType; 8] = [
        CryptoType::BTC,
        CryptoType::ETH,
        CryptoType::USDT,
        CryptoType::LTC,
        CryptoType::XRP,
        CryptoType::DOGE,
        CryptoType::BNB,
        CryptoType::SOL,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            CryptoType::BTC => "BTC",
            CryptoType::ETH => "ETH",
            CryptoType::USDT => "USDT",
            CryptoType::LTC => "LTC",
            CryptoType::XRP => "XRP",
            CryptoType::DOGE => "DOGE",
            CryptoType::BNB => "BNB",
            CryptoType::SOL => "SOL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BTC" => Some(CryptoType::BTC),
            "ETH" => Some(CryptoType::ETH),
            "USDT" => Some(CryptoType::USDT),
            "LTC" => Some(CryptoType::LTC),
            "XRP" => Some(CryptoType::XRP),
            "DOGE" => Some(CryptoType::DOGE),
            "BNB" => Some(CryptoType::BNB),
            "SOL" => Some(CryptoType::SOL),
            _ => None,
        }
    }

    pub const fn info(&self) -> CryptoInfo {
        match self {
            CryptoType::BTC => CryptoInfo {
                name: "Bitcoin",
                symbol: "BTC",
                icon: "₿",
                color: "#F7931A",
                decimals: 8,
            },
            CryptoType::ETH => CryptoInfo {
                name: "Ethereum",
                symbol: "ETH",
                icon: "Ξ",
                color: "#627EEA",
                decimals: 18,
            },
            CryptoType::USDT => CryptoInfo {
                name: "Tether",
                symbol: "USDT",
                icon: "₮",
                color: "#26A17B",
                decimals: 6,
            },
            CryptoType::LTC => CryptoInfo {
                name: "Litecoin",
                symbol: "LTC",
                icon: "Ł",
                color: "#BFBBBB",
                decimals: 8,
            },
            CryptoType::XRP => CryptoInfo {
                name: "Ripple",
                symbol: "XRP",
                icon: "✕",
                color: "#23292F",
                decimals: 6,
            },
            CryptoType::DOGE => CryptoInfo {
                name: "Dogecoin",
                symbol: "DOGE",
                icon: "Ð",
                color: "#C2A633",
                decimals: 8,
            },
            CryptoType::BNB => CryptoInfo {
                name: "Binance Coin",
                symbol: "BNB",
                icon: "◆",
                color: "#F3BA2F",
                decimals: 18,
            },
            CryptoType::SOL => CryptoInfo {
                name: "Solana",
                symbol: "SOL",
                icon: "◎",
                color: "#9945FF",
                decimals: 9,
            },
        }
    }
}

impl fmt::Display for CryptoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wallet entity - one (user, currency) balance ledger.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub wallet_id: WalletId,
    pub user_id: UserId,
    pub crypto_type: CryptoType,
    pub balance: Decimal,
    pub pending_balance: Decimal,
    /// User-supplied receive address
    pub wallet_address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Fresh zero-balance wallet, created lazily on first access.
    pub fn new(user_id: UserId, crypto_type: CryptoType) -> Self {
        let now = Utc::now();
        Self {
            wallet_id: WalletId::new(),
            user_id,
            crypto_type,
            balance: Decimal::ZERO,
            pending_balance: Decimal::ZERO,
            wallet_address: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_address(&mut self, address: String) {
        self.wallet_address = Some(address);
        self.updated_at = Utc::now();
    }

    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    pub fn debit(&mut self, amount: Decimal) -> WalletResult<()> {
        if self.balance < amount {
            return Err(WalletError::InsufficientBalance);
        }
        self.balance -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_wallet_is_empty() {
        let wallet = Wallet::new(UserId::new(), CryptoType::BTC);
        assert_eq!(wallet.balance, Decimal::ZERO);
        assert_eq!(wallet.pending_balance, Decimal::ZERO);
        assert!(wallet.wallet_address.is_none());
        assert!(wallet.is_active);
    }

    #[test]
    fn test_credit_and_debit() {
        let mut wallet = Wallet::new(UserId::new(), CryptoType::ETH);
        wallet.credit(dec!(1.5));
        assert_eq!(wallet.balance, dec!(1.5));

        wallet.debit(dec!(0.5)).unwrap();
        assert_eq!(wallet.balance, dec!(1));

        assert!(matches!(
            wallet.debit(dec!(2)).unwrap_err(),
            WalletError::InsufficientBalance
        ));
        assert_eq!(wallet.balance, dec!(1));
    }

    #[test]
    fn test_crypto_codes_roundtrip() {
        for crypto in CryptoType::ALL {
            assert_eq!(CryptoType::from_code(crypto.code()), Some(crypto));
        }
        assert_eq!(CryptoType::from_code("SHIB"), None);
    }

    #[test]
    fn test_crypto_info() {
        assert_eq!(CryptoType::BTC.info().name, "Bitcoin");
        assert_eq!(CryptoType::BTC.info().decimals, 8);
        assert_eq!(CryptoType::SOL.info().symbol, "SOL");
    }
}
