//! Catalog Service
//!
//! CRUD over listings plus the two inventory guards and image management.
//! One service struct with operation methods; handlers stay thin.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::MachineId;
use platform::storage::{ObjectStore, validate_image};
use rust_decimal::Decimal;

use crate::domain::entities::{Machine, MachineStatus, MachineType};
use crate::domain::repository::{MachineFilter, MachineRepository};
use crate::error::{CatalogError, CatalogResult};

/// Input for machine creation
pub struct CreateMachineInput {
    pub name: String,
    pub description: Option<String>,
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
    pub total_units: i32,
    pub sort_order: Option<i32>,
}

/// Input for machine update; `None` leaves a field untouched.
#[derive(Default)]
pub struct UpdateMachineInput {
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

/// Catalog service
pub struct CatalogService<R>
where
    R: MachineRepository,
{
    repo: Arc<R>,
}

impl<R> CatalogService<R>
where
    R: MachineRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateMachineInput) -> CatalogResult<Machine> {
        let now = Utc::now();
        let machine = Machine {
            machine_id: MachineId::new(),
            name: input.name,
            description: input.description,
            image: None,
            machine_type: input.machine_type,
            manufacturer: input.manufacturer,
            model: input.model,
            hash_rate: input.hash_rate,
            hash_rate_unit: input.hash_rate_unit,
            power_consumption: input.power_consumption,
            algorithm: input.algorithm,
            mining_coin: input.mining_coin,
            efficiency: input.efficiency,
            price_per_hour: input.price_per_hour,
            price_per_day: input.price_per_day,
            price_per_week: input.price_per_week,
            price_per_month: input.price_per_month,
            profit_per_hour: input.profit_per_hour,
            profit_per_day: input.profit_per_day,
            profit_per_week: input.profit_per_week,
            profit_per_month: input.profit_per_month,
            status: MachineStatus::Available,
            total_units: input.total_units,
            rented_units: 0,
            is_active: true,
            is_featured: false,
            sort_order: input.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&machine).await?;

        tracing::info!(machine_id = %machine.machine_id, name = %machine.name, "Machine created");
        Ok(machine)
    }

    pub async fn list(&self, filter: &MachineFilter) -> CatalogResult<Vec<Machine>> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, machine_id: &MachineId) -> CatalogResult<Machine> {
        self.repo
            .find_by_id(machine_id)
            .await?
            .ok_or(CatalogError::MachineNotFound)
    }

    pub async fn update(
        &self,
        machine_id: &MachineId,
        input: UpdateMachineInput,
    ) -> CatalogResult<Machine> {
        let mut machine = self.get(machine_id).await?;

        // Inventory guard: capacity can never drop below committed rentals
        if let Some(total_units) = input.total_units {
            if total_units < machine.rented_units {
                return Err(CatalogError::UnitsBelowRented {
                    rented: machine.rented_units,
                    requested: total_units,
                });
            }
            machine.total_units = total_units;
        }

        if let Some(name) = input.name {
            machine.name = name;
        }
        if let Some(description) = input.description {
            machine.description = Some(description);
        }
        if let Some(machine_type) = input.machine_type {
            machine.machine_type = machine_type;
        }
        if let Some(manufacturer) = input.manufacturer {
            machine.manufacturer = Some(manufacturer);
        }
        if let Some(model) = input.model {
            machine.model = Some(model);
        }
        if let Some(hash_rate) = input.hash_rate {
            machine.hash_rate = Some(hash_rate);
        }
        if let Some(hash_rate_unit) = input.hash_rate_unit {
            machine.hash_rate_unit = Some(hash_rate_unit);
        }
        if let Some(power_consumption) = input.power_consumption {
            machine.power_consumption = Some(power_consumption);
        }
        if let Some(algorithm) = input.algorithm {
            machine.algorithm = Some(algorithm);
        }
        if let Some(mining_coin) = input.mining_coin {
            machine.mining_coin = Some(mining_coin);
        }
        if let Some(efficiency) = input.efficiency {
            machine.efficiency = Some(efficiency);
        }
        if let Some(v) = input.price_per_hour {
            machine.price_per_hour = v;
        }
        if let Some(v) = input.price_per_day {
            machine.price_per_day = v;
        }
        if let Some(v) = input.price_per_week {
            machine.price_per_week = v;
        }
        if let Some(v) = input.price_per_month {
            machine.price_per_month = v;
        }
        if let Some(v) = input.profit_per_hour {
            machine.profit_per_hour = v;
        }
        if let Some(v) = input.profit_per_day {
            machine.profit_per_day = v;
        }
        if let Some(v) = input.profit_per_week {
            machine.profit_per_week = v;
        }
        if let Some(v) = input.profit_per_month {
            machine.profit_per_month = v;
        }
        if let Some(sort_order) = input.sort_order {
            machine.sort_order = sort_order;
        }
        machine.updated_at = Utc::now();

        self.repo.update(&machine).await?;
        Ok(machine)
    }

    pub async fn remove(&self, machine_id: &MachineId) -> CatalogResult<()> {
        let machine = self.get(machine_id).await?;

        if machine.rented_units > 0 {
            return Err(CatalogError::HasActiveRentals {
                rented: machine.rented_units,
            });
        }

        self.repo.delete(machine_id).await?;

        tracing::info!(machine_id = %machine_id, "Machine deleted");
        Ok(())
    }

    pub async fn toggle_active(&self, machine_id: &MachineId) -> CatalogResult<Machine> {
        let mut machine = self.get(machine_id).await?;
        machine.toggle_active();
        self.repo.update(&machine).await?;
        Ok(machine)
    }

    pub async fn toggle_featured(&self, machine_id: &MachineId) -> CatalogResult<Machine> {
        let mut machine = self.get(machine_id).await?;
        machine.toggle_featured();
        self.repo.update(&machine).await?;
        Ok(machine)
    }

    pub async fn set_status(
        &self,
        machine_id: &MachineId,
        status: MachineStatus,
    ) -> CatalogResult<Machine> {
        let mut machine = self.get(machine_id).await?;
        machine.set_status(status);
        self.repo.update(&machine).await?;
        Ok(machine)
    }

    /// Active + available listings for the public browse surface
    pub async fn public_machines(&self) -> CatalogResult<Vec<Machine>> {
        self.repo
            .list(&MachineFilter {
                is_active: Some(true),
                status: Some(MachineStatus::Available),
                ..Default::default()
            })
            .await
    }

    /// Active + featured listings
    pub async fn featured_machines(&self) -> CatalogResult<Vec<Machine>> {
        self.repo
            .list(&MachineFilter {
                is_active: Some(true),
                is_featured: Some(true),
                ..Default::default()
            })
            .await
    }

    /// Validate and store a listing image, replacing any previous one.
    pub async fn set_image<S>(
        &self,
        store: &S,
        machine_id: &MachineId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CatalogResult<Machine>
    where
        S: ObjectStore + Sync,
    {
        validate_image(content_type, bytes.len())?;

        let mut machine = self.get(machine_id).await?;

        let url = store.put("machines", content_type, bytes).await?;

        // Old image is best-effort cleanup; the new URL is already committed
        if let Some(old) = machine.image.clone() {
            if let Err(e) = store.delete(&old).await {
                tracing::warn!(error = %e, old, "Failed to delete replaced machine image");
            }
        }

        machine.set_image(Some(url));
        self.repo.update(&machine).await?;
        Ok(machine)
    }

    /// Remove a listing image from storage and the listing.
    pub async fn remove_image<S>(
        &self,
        store: &S,
        machine_id: &MachineId,
    ) -> CatalogResult<Machine>
    where
        S: ObjectStore + Sync,
    {
        let mut machine = self.get(machine_id).await?;

        if let Some(old) = machine.image.clone() {
            store.delete(&old).await?;
            machine.set_image(None);
            self.repo.update(&machine).await?;
        }

        Ok(machine)
    }
}
