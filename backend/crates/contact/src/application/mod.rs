pub mod service;

pub use service::{ContactService, CreateSubmissionInput, UpdateSubmissionInput};
