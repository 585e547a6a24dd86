//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, opaque tokens)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Bearer token issuance and validation (JWT, HS256)
//! - Transactional email delivery
//! - Object storage for uploaded assets

pub mod client;
pub mod crypto;
pub mod jwt;
pub mod mailer;
pub mod password;
pub mod storage;
