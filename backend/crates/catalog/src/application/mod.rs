pub mod service;

pub use service::{CatalogService, CreateMachineInput, UpdateMachineInput};
