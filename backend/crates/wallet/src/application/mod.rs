pub mod service;

pub use service::WalletService;
