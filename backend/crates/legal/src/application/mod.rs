pub mod service;

pub use service::LegalService;
