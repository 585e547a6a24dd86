//! Input Validation
//!
//! Explicit, ordered field checks per input type. Each request DTO exposes
//! a `validate()` that runs its checks through a [`Validator`] and returns
//! the collected violations as a single 422 error, before any business
//! logic runs.

use crate::error::app_error::{AppError, AppResult};

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Collects field violations in declaration order.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.violations.push(Violation {
                field,
                message: message.into(),
            });
        }
        self
    }

    /// Non-empty after trimming.
    pub fn require_non_empty(&mut self, value: &str, field: &'static str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            format!("{} must not be empty", field),
        )
    }

    /// Minimal plausible email shape; full canonicalization happens in the
    /// Email value object.
    pub fn require_email(&mut self, value: &str, field: &'static str) -> &mut Self {
        let plausible = value.contains('@') && !value.trim().is_empty();
        self.check(plausible, field, format!("{} must be a valid email", field))
    }

    /// Minimum length in characters.
    pub fn require_min_len(&mut self, value: &str, min: usize, field: &'static str) -> &mut Self {
        self.check(
            value.chars().count() >= min,
            field,
            format!("{} must be at least {} characters", field, min),
        )
    }

    /// Positive integer (quantity-style fields).
    pub fn require_positive(&mut self, value: i32, field: &'static str) -> &mut Self {
        self.check(value >= 1, field, format!("{} must be at least 1", field))
    }

    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Fold violations into one 422 error, or `Ok(())` when clean.
    pub fn finish(self) -> AppResult<()> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let description = self
            .violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(AppError::unprocessable("Validation failed")
            .with_code("VALIDATION_001")
            .with_description(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_passes() {
        let mut v = Validator::new();
        v.require_non_empty("hello", "name")
            .require_positive(3, "quantity");
        assert!(v.is_ok());
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_violations_collected_in_order() {
        let mut v = Validator::new();
        v.require_non_empty("", "firstName")
            .require_email("not-an-email", "email")
            .require_positive(0, "quantity");
        assert_eq!(v.violations().len(), 3);
        assert_eq!(v.violations()[0].field, "firstName");
        assert_eq!(v.violations()[2].field, "quantity");

        let err = v.finish().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.code(), "VALIDATION_001");
        assert!(err.description().contains("quantity must be at least 1"));
    }

    #[test]
    fn test_min_len_counts_chars() {
        let mut v = Validator::new();
        v.require_min_len("pässwörd", 8, "password");
        assert!(v.is_ok());

        let mut v = Validator::new();
        v.require_min_len("short", 8, "password");
        assert!(!v.is_ok());
    }
}
