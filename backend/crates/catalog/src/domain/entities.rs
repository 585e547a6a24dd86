//! Domain Entities
//!
//! The rentable machine listing and its inventory invariants.

use chrono::{DateTime, Utc};
use kernel::id::MachineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
    Inactive,
}

impl MachineStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            MachineStatus::Available => "available",
            MachineStatus::Rented => "rented",
            MachineStatus::Maintenance => "maintenance",
            MachineStatus::Inactive => "inactive",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "available" => Some(MachineStatus::Available),
            "rented" => Some(MachineStatus::Rented),
            "maintenance" => Some(MachineStatus::Maintenance),
            "inactive" => Some(MachineStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Hardware class of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineType {
    #[default]
    Asic,
    Gpu,
}

impl MachineType {
    pub const fn code(&self) -> &'static str {
        match self {
            MachineType::Asic => "asic",
            MachineType::Gpu => "gpu",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "asic" => Some(MachineType::Asic),
            "gpu" => Some(MachineType::Gpu),
            _ => None,
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Machine entity - a rentable unit type with inventory counts.
#[derive(Debug, Clone)]
pub struct Machine {
    pub machine_id: MachineId,
    pub name: String,
    pub description: Option<String>,
    /// Public image URL in object storage
    pub image: Option<String>,
    pub machine_type: MachineType,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub hash_rate: Option<Decimal>,
    /// TH/s, GH/s, MH/s
    pub hash_rate_unit: Option<String>,
    /// Watts
    pub power_consumption: Option<Decimal>,
    pub algorithm: Option<String>,
    pub mining_coin: Option<String>,
    /// J/TH
    pub efficiency: Option<Decimal>,
    pub price_per_hour: Decimal,
    pub price_per_day: Decimal,
    pub price_per_week: Decimal,
    pub price_per_month: Decimal,
    pub profit_per_hour: Decimal,
    pub profit_per_day: Decimal,
    pub profit_per_week: Decimal,
    pub profit_per_month: Decimal,
    pub status: MachineStatus,
    pub total_units: i32,
    pub rented_units: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Machine {
    /// Remaining bookable capacity; derived, never stored.
    pub fn available_units(&self) -> i32 {
        self.total_units - self.rented_units
    }

    /// Commit approved rental quantity to inventory, clamped so that
    /// `rented_units` can never exceed `total_units`. Concurrent approvals
    /// racing past capacity are absorbed, not rejected.
    pub fn commit_rental(&mut self, quantity: i32) {
        self.rented_units = self.total_units.min(self.rented_units + quantity);
        self.updated_at = Utc::now();
    }

    pub fn toggle_active(&mut self) {
        self.is_active = !self.is_active;
        self.updated_at = Utc::now();
    }

    pub fn toggle_featured(&mut self) {
        self.is_featured = !self.is_featured;
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: MachineStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_machine(total_units: i32, rented_units: i32) -> Machine {
        let now = Utc::now();
        Machine {
            machine_id: MachineId::new(),
            name: "Antminer S19".to_string(),
            description: None,
            image: None,
            machine_type: MachineType::Asic,
            manufacturer: Some("Bitmain".to_string()),
            model: Some("S19 Pro".to_string()),
            hash_rate: Some(dec!(110)),
            hash_rate_unit: Some("TH/s".to_string()),
            power_consumption: Some(dec!(3250)),
            algorithm: Some("SHA-256".to_string()),
            mining_coin: Some("BTC".to_string()),
            efficiency: Some(dec!(29.5)),
            price_per_hour: dec!(5),
            price_per_day: dec!(120),
            price_per_week: dec!(750),
            price_per_month: dec!(2800),
            profit_per_hour: dec!(0.5),
            profit_per_day: dec!(12),
            profit_per_week: dec!(80),
            profit_per_month: dec!(310),
            status: MachineStatus::Available,
            total_units,
            rented_units,
            is_active: true,
            is_featured: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_available_units_derived() {
        let machine = sample_machine(5, 3);
        assert_eq!(machine.available_units(), 2);
    }

    #[test]
    fn test_commit_rental_increments() {
        let mut machine = sample_machine(5, 3);
        machine.commit_rental(2);
        assert_eq!(machine.rented_units, 5);
        assert_eq!(machine.available_units(), 0);
    }

    #[test]
    fn test_commit_rental_clamps_at_total() {
        // Two overlapping approvals can exceed capacity; the commit clamps
        // at total_units instead of rejecting.
        let mut machine = sample_machine(5, 3);
        machine.commit_rental(4);
        assert_eq!(machine.rented_units, 5);
    }

    #[test]
    fn test_status_codes_roundtrip() {
        for status in [
            MachineStatus::Available,
            MachineStatus::Rented,
            MachineStatus::Maintenance,
            MachineStatus::Inactive,
        ] {
            assert_eq!(MachineStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(MachineStatus::from_code("scrapped"), None);

        assert_eq!(MachineType::from_code("asic"), Some(MachineType::Asic));
        assert_eq!(MachineType::from_code("fpga"), None);
    }
}
