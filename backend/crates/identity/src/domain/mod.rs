pub mod entities;
pub mod repository;
pub mod value_object;
