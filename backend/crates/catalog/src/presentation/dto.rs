//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Machine, MachineStatus, MachineType};

/// Create-machine request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMachineRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub machine_type: MachineType,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub hash_rate: Option<Decimal>,
    pub hash_rate_unit: Option<String>,
    pub power_consumption: Option<Decimal>,
    pub algorithm: Option<String>,
    pub mining_coin: Option<String>,
    pub efficiency: Option<Decimal>,
    pub price_per_hour: Decimal,
    pub price_per_day: Decimal,
    pub price_per_week: Decimal,
    pub price_per_month: Decimal,
    pub profit_per_hour: Decimal,
    pub profit_per_day: Decimal,
    pub profit_per_week: Decimal,
    pub profit_per_month: Decimal,
    #[serde(default = "default_total_units")]
    pub total_units: i32,
    pub sort_order: Option<i32>,
}

fn default_total_units() -> i32 {
    1
}

impl CreateMachineRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.name, "name")
            .require_positive(self.total_units, "totalUnits")
            .check(
                self.price_per_hour >= Decimal::ZERO
                    && self.price_per_day >= Decimal::ZERO
                    && self.price_per_week >= Decimal::ZERO
                    && self.price_per_month >= Decimal::ZERO,
                "prices",
                "prices must not be negative",
            );
        v.finish()
    }
}

/// Update-machine request; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMachineRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub machine_type: Option<MachineType>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub hash_rate: Option<Decimal>,
    pub hash_rate_unit: Option<String>,
    pub power_consumption: Option<Decimal>,
    pub algorithm: Option<String>,
    pub mining_coin: Option<String>,
    pub efficiency: Option<Decimal>,
    pub price_per_hour: Option<Decimal>,
    pub price_per_day: Option<Decimal>,
    pub price_per_week: Option<Decimal>,
    pub price_per_month: Option<Decimal>,
    pub profit_per_hour: Option<Decimal>,
    pub profit_per_day: Option<Decimal>,
    pub profit_per_week: Option<Decimal>,
    pub profit_per_month: Option<Decimal>,
    pub total_units: Option<i32>,
    pub sort_order: Option<i32>,
}

/// Set-status request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub status: MachineStatus,
}

/// Admin list query filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMachinesQuery {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(rename = "type")]
    pub machine_type: Option<MachineType>,
    pub status: Option<MachineStatus>,
}

/// Machine representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub hash_rate: Option<Decimal>,
    pub hash_rate_unit: Option<String>,
    pub power_consumption: Option<Decimal>,
    pub algorithm: Option<String>,
    pub mining_coin: Option<String>,
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
    /// Derived: total - rented
    pub available_units: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MachineResponse {
    pub fn from_entity(machine: &Machine) -> Self {
        Self {
            id: *machine.machine_id.as_uuid(),
            name: machine.name.clone(),
            description: machine.description.clone(),
            image: machine.image.clone(),
            machine_type: machine.machine_type,
            manufacturer: machine.manufacturer.clone(),
            model: machine.model.clone(),
            hash_rate: machine.hash_rate,
            hash_rate_unit: machine.hash_rate_unit.clone(),
            power_consumption: machine.power_consumption,
            algorithm: machine.algorithm.clone(),
            mining_coin: machine.mining_coin.clone(),
            efficiency: machine.efficiency,
            price_per_hour: machine.price_per_hour,
            price_per_day: machine.price_per_day,
            price_per_week: machine.price_per_week,
            price_per_month: machine.price_per_month,
            profit_per_hour: machine.profit_per_hour,
            profit_per_day: machine.profit_per_day,
            profit_per_week: machine.profit_per_week,
            profit_per_month: machine.profit_per_month,
            status: machine.status,
            total_units: machine.total_units,
            rented_units: machine.rented_units,
            available_units: machine.available_units(),
            is_active: machine.is_active,
            is_featured: machine.is_featured,
            sort_order: machine.sort_order,
            created_at: machine.created_at,
            updated_at: machine.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let json = r#"{
            "name": "",
            "pricePerHour": "-1",
            "pricePerDay": "120",
            "pricePerWeek": "750",
            "pricePerMonth": "2800",
            "profitPerHour": "0.5",
            "profitPerDay": "12",
            "profitPerWeek": "80",
            "profitPerMonth": "310",
            "totalUnits": 0
        }"#;
        let req: CreateMachineRequest = serde_json::from_str(json).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(err.description().contains("name"));
        assert!(err.description().contains("totalUnits"));
        assert!(err.description().contains("prices"));
    }

    #[test]
    fn test_status_enum_deserialization() {
        let q: ListMachinesQuery =
            serde_json::from_str(r#"{"status":"maintenance","type":"gpu"}"#).unwrap();
        assert_eq!(q.status, Some(MachineStatus::Maintenance));
        assert_eq!(q.machine_type, Some(MachineType::Gpu));
    }
}
