pub mod accounts;
pub mod config;
pub mod login;
pub mod password_reset;
pub mod register;
pub mod verify_email;

pub use accounts::{AccountUseCase, CreateUserInput, UpdateProfileInput, UpdateUserInput};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use password_reset::PasswordResetUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use verify_email::EmailVerificationUseCase;
