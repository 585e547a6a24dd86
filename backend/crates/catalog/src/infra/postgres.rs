//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::MachineId;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Machine, MachineStatus, MachineType};
use crate::domain::repository::{MachineFilter, MachineRepository};
use crate::error::{CatalogError, CatalogResult};

const MACHINE_COLUMNS: &str = r#"
    machine_id,
    name,
    description,
    image,
    machine_type,
    manufacturer,
    model,
    hash_rate,
    hash_rate_unit,
    power_consumption,
    algorithm,
    mining_coin,
    efficiency,
    price_per_hour,
    price_per_day,
    price_per_week,
    price_per_month,
    profit_per_hour,
    profit_per_day,
    profit_per_week,
    profit_per_month,
    status,
    total_units,
    rented_units,
    is_active,
    is_featured,
    sort_order,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed machine repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl MachineRepository for PgCatalogRepository {
    async fn create(&self, machine: &Machine) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO mining_machines (
                machine_id,
                name,
                description,
                image,
                machine_type,
                manufacturer,
                model,
                hash_rate,
                hash_rate_unit,
                power_consumption,
                algorithm,
                mining_coin,
                efficiency,
                price_per_hour,
                price_per_day,
                price_per_week,
                price_per_month,
                profit_per_hour,
                profit_per_day,
                profit_per_week,
                profit_per_month,
                status,
                total_units,
                rented_units,
                is_active,
                is_featured,
                sort_order,
                created_at,
                updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29
            )
            "#,
        )
        .bind(machine.machine_id.as_uuid())
        .bind(&machine.name)
        .bind(&machine.description)
        .bind(&machine.image)
        .bind(machine.machine_type.code())
        .bind(&machine.manufacturer)
        .bind(&machine.model)
        .bind(machine.hash_rate)
        .bind(&machine.hash_rate_unit)
        .bind(machine.power_consumption)
        .bind(&machine.algorithm)
        .bind(&machine.mining_coin)
        .bind(machine.efficiency)
        .bind(machine.price_per_hour)
        .bind(machine.price_per_day)
        .bind(machine.price_per_week)
        .bind(machine.price_per_month)
        .bind(machine.profit_per_hour)
        .bind(machine.profit_per_day)
        .bind(machine.profit_per_week)
        .bind(machine.profit_per_month)
        .bind(machine.status.code())
        .bind(machine.total_units)
        .bind(machine.rented_units)
        .bind(machine.is_active)
        .bind(machine.is_featured)
        .bind(machine.sort_order)
        .bind(machine.created_at)
        .bind(machine.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, machine_id: &MachineId) -> CatalogResult<Option<Machine>> {
        let row = sqlx::query_as::<_, MachineRow>(&format!(
            "SELECT {MACHINE_COLUMNS} FROM mining_machines WHERE machine_id = $1"
        ))
        .bind(machine_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_machine()).transpose()
    }

    async fn list(&self, filter: &MachineFilter) -> CatalogResult<Vec<Machine>> {
        // NULL filter parameters are skipped in the WHERE clause
        let rows = sqlx::query_as::<_, MachineRow>(&format!(
            r#"
            SELECT {MACHINE_COLUMNS} FROM mining_machines
            WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
              AND ($2::BOOLEAN IS NULL OR is_featured = $2)
              AND ($3::TEXT IS NULL OR machine_type = $3)
              AND ($4::TEXT IS NULL OR status = $4)
            ORDER BY sort_order ASC, created_at DESC
            "#
        ))
        .bind(filter.is_active)
        .bind(filter.is_featured)
        .bind(filter.machine_type.map(|t| t.code()))
        .bind(filter.status.map(|s| s.code()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_machine()).collect()
    }

    async fn update(&self, machine: &Machine) -> CatalogResult<()> {
        sqlx::query(
            r#"
            UPDATE mining_machines SET
                name = $2,
                description = $3,
                image = $4,
                machine_type = $5,
                manufacturer = $6,
                model = $7,
                hash_rate = $8,
                hash_rate_unit = $9,
                power_consumption = $10,
                algorithm = $11,
                mining_coin = $12,
                efficiency = $13,
                price_per_hour = $14,
                price_per_day = $15,
                price_per_week = $16,
                price_per_month = $17,
                profit_per_hour = $18,
                profit_per_day = $19,
                profit_per_week = $20,
                profit_per_month = $21,
                status = $22,
                total_units = $23,
                rented_units = $24,
                is_active = $25,
                is_featured = $26,
                sort_order = $27,
                updated_at = $28
            WHERE machine_id = $1
            "#,
        )
        .bind(machine.machine_id.as_uuid())
        .bind(&machine.name)
        .bind(&machine.description)
        .bind(&machine.image)
        .bind(machine.machine_type.code())
        .bind(&machine.manufacturer)
        .bind(&machine.model)
        .bind(machine.hash_rate)
        .bind(&machine.hash_rate_unit)
        .bind(machine.power_consumption)
        .bind(&machine.algorithm)
        .bind(&machine.mining_coin)
        .bind(machine.efficiency)
        .bind(machine.price_per_hour)
        .bind(machine.price_per_day)
        .bind(machine.price_per_week)
        .bind(machine.price_per_month)
        .bind(machine.profit_per_hour)
        .bind(machine.profit_per_day)
        .bind(machine.profit_per_week)
        .bind(machine.profit_per_month)
        .bind(machine.status.code())
        .bind(machine.total_units)
        .bind(machine.rented_units)
        .bind(machine.is_active)
        .bind(machine.is_featured)
        .bind(machine.sort_order)
        .bind(machine.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, machine_id: &MachineId) -> CatalogResult<()> {
        sqlx::query("DELETE FROM mining_machines WHERE machine_id = $1")
            .bind(machine_id.as_uuid())
            .execute(&self.pool)
            .await?;

        tracing::info!(machine_id = %machine_id, "Machine row deleted");
        Ok(())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MachineRow {
    machine_id: Uuid,
    name: String,
    description: Option<String>,
    image: Option<String>,
    machine_type: String,
    manufacturer: Option<String>,
    model: Option<String>,
    hash_rate: Option<Decimal>,
    hash_rate_unit: Option<String>,
    power_consumption: Option<Decimal>,
    algorithm: Option<String>,
    mining_coin: Option<String>,
    efficiency: Option<Decimal>,
    price_per_hour: Decimal,
    price_per_day: Decimal,
    price_per_week: Decimal,
    price_per_month: Decimal,
    profit_per_hour: Decimal,
    profit_per_day: Decimal,
    profit_per_week: Decimal,
    profit_per_month: Decimal,
    status: String,
    total_units: i32,
    rented_units: i32,
    is_active: bool,
    is_featured: bool,
    sort_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MachineRow {
    fn into_machine(self) -> CatalogResult<Machine> {
        let machine_type = MachineType::from_code(&self.machine_type).ok_or_else(|| {
            CatalogError::Internal(format!("Invalid machine type: {}", self.machine_type))
        })?;
        let status = MachineStatus::from_code(&self.status)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid status: {}", self.status)))?;

        Ok(Machine {
            machine_id: MachineId::from_uuid(self.machine_id),
            name: self.name,
            description: self.description,
            image: self.image,
            machine_type,
            manufacturer: self.manufacturer,
            model: self.model,
            hash_rate: self.hash_rate,
            hash_rate_unit: self.hash_rate_unit,
            power_consumption: self.power_consumption,
            algorithm: self.algorithm,
            mining_coin: self.mining_coin,
            efficiency: self.efficiency,
            price_per_hour: self.price_per_hour,
            price_per_day: self.price_per_day,
            price_per_week: self.price_per_week,
            price_per_month: self.price_per_month,
            profit_per_hour: self.profit_per_hour,
            profit_per_day: self.profit_per_day,
            profit_per_week: self.profit_per_week,
            profit_per_month: self.profit_per_month,
            status,
            total_units: self.total_units,
            rented_units: self.rented_units,
            is_active: self.is_active,
            is_featured: self.is_featured,
            sort_order: self.sort_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
