pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::User;
pub use errors::AuthError;
pub use ports::{PasswordHasher, UserRepository};
pub use services::AuthService;
pub use value_objects::{Password, PasswordHash, Username, ValueObjectError};
