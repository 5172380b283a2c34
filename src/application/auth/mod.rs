//! Authentication use cases

mod add_user;
mod authenticate_user;

pub use add_user::{AddUserCommand, AddUserResponse, AddUserUseCase};
pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserUseCase};
