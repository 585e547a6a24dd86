pub mod create;
pub mod messages;
pub mod queries;
pub mod transitions;

pub use create::{CreateBookingInput, CreateBookingUseCase};
pub use messages::MessageThreadUseCase;
pub use queries::BookingQueryUseCase;
pub use transitions::BookingTransitionUseCase;
