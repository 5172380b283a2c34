pub mod auth;
pub mod company;
pub mod errors;
pub mod invoice;
pub mod product;
pub mod remit;

pub use errors::RepositoryError;
