//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::MachineId;

use crate::domain::entities::{Machine, MachineStatus, MachineType};
use crate::error::CatalogResult;

/// Listing filters; `None` means "don't filter on this".
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineFilter {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub machine_type: Option<MachineType>,
    pub status: Option<MachineStatus>,
}

/// Machine repository trait
#[trait_variant::make(MachineRepository: Send)]
pub trait LocalMachineRepository {
    async fn create(&self, machine: &Machine) -> CatalogResult<()>;

    async fn find_by_id(&self, machine_id: &MachineId) -> CatalogResult<Option<Machine>>;

    /// Filtered listing, ordered by sort_order asc then created_at desc
    async fn list(&self, filter: &MachineFilter) -> CatalogResult<Vec<Machine>>;

    /// Persist all mutable fields of an existing machine
    async fn update(&self, machine: &Machine) -> CatalogResult<()>;

    async fn delete(&self, machine_id: &MachineId) -> CatalogResult<()>;
}
